use crate::buffer::{TrailBuffer, TrailPoint, TRAIL_LENGTH};
use crate::clock::{BoxedTimeSource, SystemTimeSource, TimeSample};
use crate::pointer::{PointerSample, PointerTracker, ViewportSize};

/// Immutable per-frame state handed to the renderer.
///
/// The renderer never sees the live buffers; each tick produces an owned copy
/// so nothing can alias the mutable history mid-frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    pub time: TimeSample,
    pub pointer: PointerSample,
    /// Trail samples, newest first.
    pub trail: [TrailPoint; TRAIL_LENGTH],
}

/// Owns the core state and advances it one discrete step per display refresh.
///
/// Pointer events may arrive at any rate between ticks; only the most recent
/// sample matters, so `pointer_moved` just overwrites the tracked position
/// and `step` reads it once.
pub struct FrameDriver {
    clock: BoxedTimeSource,
    tracker: PointerTracker,
    trail: TrailBuffer,
}

impl FrameDriver {
    /// Drives the effect off the system monotonic clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemTimeSource::new()))
    }

    /// Drives the effect off the supplied clock; tests use a fixed one.
    pub fn with_clock(clock: BoxedTimeSource) -> Self {
        Self {
            clock,
            tracker: PointerTracker::new(),
            trail: TrailBuffer::new(),
        }
    }

    /// Forwards a raw pointer event to the tracker.
    pub fn pointer_moved(&mut self, raw_x: f64, raw_y: f64, viewport: ViewportSize) {
        self.tracker.on_pointer_move(raw_x, raw_y, viewport);
    }

    /// Runs one frame: sample the clock, age the trail with the latest
    /// pointer position, and return the resulting state by value.
    pub fn step(&mut self, decay_factor: f32) -> FrameSnapshot {
        let time = self.clock.sample();
        let pointer = self.tracker.position();
        self.trail.advance(pointer, decay_factor);
        FrameSnapshot {
            time,
            pointer,
            trail: self.trail.snapshot(),
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
