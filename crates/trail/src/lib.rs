//! Core state for the pixeltrail effect.
//!
//! Everything with real invariants lives here: pointer normalization, the
//! fixed-length decaying trail history, and the per-frame step that snapshots
//! both for the renderer. The flow per display refresh is:
//!
//! ```text
//!   winit events ──▶ PointerTracker ──▶ FrameDriver::step()
//!                                             │
//!                    TrailBuffer::advance() ◀─┘
//!                                             │
//!                                  FrameSnapshot ──▶ renderer uniforms
//! ```
//!
//! The crate is deliberately free of GPU and windowing concerns so the decay
//! recurrence can be exercised headless. All operations are total over their
//! numeric inputs: out-of-viewport pointer coordinates are valid extrapolated
//! samples, never an error.

pub mod buffer;
pub mod clock;
pub mod frame;
pub mod pointer;

pub use buffer::{TrailBuffer, TrailPoint, TRAIL_LENGTH};
pub use clock::{BoxedTimeSource, FixedTimeSource, SystemTimeSource, TimeSample, TimeSource};
pub use frame::{FrameDriver, FrameSnapshot};
pub use pointer::{PointerSample, PointerTracker, ViewportSize};
