use bytemuck::{Pod, Zeroable};
use trail::{FrameSnapshot, TRAIL_LENGTH};

use crate::panel::EffectParams;

/// CPU-side mirror of the effect uniform block.
///
/// The layout must match the `Params` struct in
/// [`crate::shaders::FRAGMENT_WGSL`]. WGSL uniform-buffer rules give array
/// elements a 16-byte stride, so trail positions and strengths are stored as
/// vec4 slots with only the leading components used. Strength element `i`
/// always describes position element `i`; `sync` writes both from the same
/// trail slot so the pairing cannot drift.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct EffectUniforms {
    time: f32,
    grid_size: i32,
    pixelation_radius: f32,
    trail_decay: f32,
    mouse: [f32; 2],
    canvas_size: [f32; 2],
    canvas_aspect: f32,
    image_aspect: f32,
    _padding: [f32; 2],
    trail_positions: [[f32; 4]; TRAIL_LENGTH],
    trail_strengths: [[f32; 4]; TRAIL_LENGTH],
}

unsafe impl Zeroable for EffectUniforms {}
unsafe impl Pod for EffectUniforms {}

impl EffectUniforms {
    /// Prepares a uniform block sized to the current surface: pointer and
    /// every trail slot start at the viewport center with zero strength.
    pub fn new(width: u32, height: u32, image_aspect: f32, params: EffectParams) -> Self {
        let mut uniforms = Self {
            time: 0.0,
            grid_size: params.grid_size,
            pixelation_radius: params.pixelation_radius,
            trail_decay: params.trail_decay,
            mouse: [0.5, 0.5],
            canvas_size: [0.0, 0.0],
            canvas_aspect: 1.0,
            image_aspect,
            _padding: [0.0; 2],
            trail_positions: [[0.5, 0.5, 0.0, 0.0]; TRAIL_LENGTH],
            trail_strengths: [[0.0; 4]; TRAIL_LENGTH],
        };
        uniforms.set_canvas_size(width as f32, height as f32);
        uniforms
    }

    /// Writes the surface dimensions and the derived aspect ratio. Called
    /// straight from the resize handler so the ratio is correct before the
    /// next scheduled frame.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.canvas_size = [width, height];
        self.canvas_aspect = width / height.max(1.0);
    }

    /// Refreshes the live-editable knobs.
    pub fn set_params(&mut self, params: EffectParams) {
        self.grid_size = params.grid_size;
        self.pixelation_radius = params.pixelation_radius;
        self.trail_decay = params.trail_decay;
    }

    /// Copies one frame snapshot into the block; pure flattening, no
    /// transformation.
    pub fn sync(&mut self, snapshot: &FrameSnapshot) {
        self.time = snapshot.time.seconds;
        self.mouse = [snapshot.pointer.x, snapshot.pointer.y];
        for (index, point) in snapshot.trail.iter().enumerate() {
            self.trail_positions[index][0] = point.x;
            self.trail_positions[index][1] = point.y;
            self.trail_strengths[index][0] = point.strength;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trail::{FixedTimeSource, FrameDriver, ViewportSize};

    fn snapshot_after_move() -> FrameSnapshot {
        let mut driver = FrameDriver::with_clock(Box::new(FixedTimeSource::new(2.5)));
        driver.pointer_moved(750.0, 250.0, ViewportSize::new(1000, 1000));
        driver.step(0.9)
    }

    #[test]
    fn layout_matches_wgsl_uniform_block() {
        // 48 bytes of scalars and vec2s, then two vec4 arrays of 15.
        assert_eq!(std::mem::size_of::<EffectUniforms>(), 48 + 2 * 16 * TRAIL_LENGTH);
        assert_eq!(std::mem::align_of::<EffectUniforms>(), 16);
    }

    #[test]
    fn sync_keeps_positions_and_strengths_parallel() {
        let mut uniforms =
            EffectUniforms::new(1600, 900, 1.5, EffectParams::default());
        let snapshot = snapshot_after_move();
        uniforms.sync(&snapshot);

        assert_eq!(uniforms.time, 2.5);
        assert!((uniforms.mouse[0] - 0.75).abs() < 1e-6);
        for (index, point) in snapshot.trail.iter().enumerate() {
            assert_eq!(uniforms.trail_positions[index][0], point.x);
            assert_eq!(uniforms.trail_positions[index][1], point.y);
            assert_eq!(uniforms.trail_strengths[index][0], point.strength);
        }
    }

    #[test]
    fn resize_updates_aspect_immediately() {
        let mut uniforms =
            EffectUniforms::new(1600, 900, 1.5, EffectParams::default());
        assert!((uniforms.canvas_aspect - 1600.0 / 900.0).abs() < 1e-6);

        // No sync in between: the resize handler alone refreshes the ratio.
        uniforms.set_canvas_size(800.0, 800.0);
        assert!((uniforms.canvas_aspect - 1.0).abs() < 1e-6);
        assert_eq!(uniforms.canvas_size, [800.0, 800.0]);
    }

    #[test]
    fn params_are_mirrored() {
        let mut uniforms =
            EffectUniforms::new(1600, 900, 1.5, EffectParams::default());
        uniforms.set_params(EffectParams {
            grid_size: 40,
            pixelation_radius: 0.2,
            trail_decay: 0.95,
        });
        assert_eq!(uniforms.grid_size, 40);
        assert_eq!(uniforms.pixelation_radius, 0.2);
        assert_eq!(uniforms.trail_decay, 0.95);
    }
}
