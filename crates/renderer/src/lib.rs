//! Renderer crate for pixeltrail.
//!
//! Glues the `winit` window, the `wgpu` pipeline, and the core trail state
//! together. The overall flow is:
//!
//! ```text
//!   CLI / pixeltrail
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ WindowState ──▶ winit event loop ──▶ render_frame()
//!          ▲                                      │
//!          │                                      └─▶ FrameDriver::step() ─▶ GPU UBO
//! ```
//!
//! `WindowState` owns the GPU resources, the parameter panel, and the core
//! `FrameDriver`; `Renderer` is the thin entry point that opens the window
//! and runs the loop. One frame is rendered per redraw request and the next
//! redraw is queued as soon as the loop goes idle, so the effect animates for
//! the lifetime of the window. Exit is an explicit request — window close or
//! Escape — checked by the event loop on every iteration.

mod gpu;
mod panel;
mod shaders;
mod texture;
mod uniforms;

pub use panel::{
    EffectParams, ParamPanel, ParamRange, GRID_SIZE_RANGE, PIXELATION_RADIUS_RANGE,
    TRAIL_DECAY_RANGE,
};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use trail::{FrameDriver, ViewportSize};

use gpu::GpuState;

/// Immutable configuration passed to the renderer at start-up.
#[derive(Clone)]
pub struct RendererConfig {
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Background image revealed by the effect.
    pub image_path: PathBuf,
    /// Startup values for the live-editable parameters.
    pub params: EffectParams,
    /// Enable the parameter panel from the first frame.
    pub show_panel: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_size: (1600, 900),
            image_path: PathBuf::from("assets/bg.jpg"),
            params: EffectParams::default(),
            show_panel: false,
        }
    }
}

/// High-level entry point that owns the chosen configuration.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the window and drives the event loop until the host asks to
    /// exit. Initialisation failures (surface, adapter, image) are fatal and
    /// reported with context.
    pub fn run(&mut self) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to initialize event loop")?;
        let window_size = PhysicalSize::new(self.config.surface_size.0, self.config.surface_size.1);
        let window = WindowBuilder::new()
            .with_title("pixeltrail")
            .with_inner_size(window_size)
            .build(&event_loop)
            .context("failed to create effect window")?;
        let window = Arc::new(window);

        let mut state = WindowState::new(window.clone(), &self.config)?;
        state.window().request_redraw();

        event_loop
            .run(move |event, elwt| {
                // Drive redraws via vblank by waiting between events.
                elwt.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                        match event {
                            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                                elwt.exit();
                            }
                            WindowEvent::KeyboardInput { event, .. } => {
                                if state.handle_key(&event) {
                                    elwt.exit();
                                }
                            }
                            WindowEvent::CursorMoved { position, .. } => {
                                state.handle_cursor_moved(position);
                            }
                            WindowEvent::Resized(new_size) => {
                                state.resize(new_size);
                            }
                            WindowEvent::ScaleFactorChanged {
                                mut inner_size_writer,
                                ..
                            } => {
                                // Keep the current physical size when the scale factor changes.
                                let _ = inner_size_writer.request_inner_size(state.size());
                            }
                            WindowEvent::RedrawRequested => match state.render_frame() {
                                Ok(()) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    state.resize(state.size());
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    eprintln!("surface out of memory; exiting");
                                    elwt.exit();
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    eprintln!("surface timeout; retrying next frame");
                                }
                                Err(other) => {
                                    eprintln!("surface error: {other:?}; retrying next frame");
                                }
                            },
                            _ => {}
                        }
                    }
                    Event::AboutToWait => {
                        // Schedule the next frame once winit is about to idle.
                        state.window().request_redraw();
                    }
                    _ => {}
                }
            })
            .map_err(|err| anyhow!("event loop error: {err}"))
    }
}

/// Aggregates the window, GPU resources, parameter panel, and core state.
struct WindowState {
    window: Arc<Window>,
    gpu: GpuState,
    driver: FrameDriver,
    panel: ParamPanel,
}

impl WindowState {
    fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let size = window.inner_size();
        let panel = ParamPanel::new(config.params, config.show_panel);
        let gpu = GpuState::new(window.as_ref(), size, &config.image_path, panel.params())?;

        Ok(Self {
            window,
            gpu,
            driver: FrameDriver::new(),
            panel,
        })
    }

    fn window(&self) -> &Window {
        self.window.as_ref()
    }

    fn size(&self) -> PhysicalSize<u32> {
        self.gpu.size()
    }

    fn viewport(&self) -> ViewportSize {
        let size = self.gpu.size();
        ViewportSize::new(size.width, size.height)
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }

    fn handle_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.driver
            .pointer_moved(position.x, position.y, self.viewport());
    }

    /// Routes a key press; returns true when the host should exit.
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.state != ElementState::Pressed {
            return false;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Escape) => return true,
            Key::Named(NamedKey::Tab) if !event.repeat => self.panel.toggle(),
            Key::Character(value) => {
                let mut chars = value.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.panel.handle_character(ch);
                }
            }
            _ => {}
        }
        false
    }

    /// Runs one tick: advance the core state, then draw with the result.
    fn render_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let params = self.panel.params();
        let snapshot = self.driver.step(params.trail_decay);
        self.gpu.render(&snapshot, params)
    }
}
