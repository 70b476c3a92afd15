/// Window dimensions in device pixels, as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-over-height ratio. Zero-sized dimensions (a minimized window)
    /// are treated as one pixel so the ratio stays finite.
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Normalized pointer position with a bottom-left origin.
///
/// Values fall inside `[0, 1]` while the pointer is over the window and may
/// leave that range once it is dragged outside; downstream consumers treat
/// out-of-range samples as valid extrapolated coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    /// Viewport center, the position everything starts from.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another sample in normalized space.
    pub fn distance_to(&self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for PointerSample {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Normalizes raw pointer events into viewport-relative coordinates.
///
/// The windowing layer reports positions in device pixels with a top-left
/// origin; shaders sample with a bottom-left origin, so the Y axis is
/// flipped here. No clamping is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    position: PointerSample,
}

impl PointerTracker {
    /// Starts at the viewport center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest raw pointer position against the current viewport.
    pub fn on_pointer_move(&mut self, raw_x: f64, raw_y: f64, viewport: ViewportSize) {
        let width = viewport.width.max(1) as f64;
        let height = viewport.height.max(1) as f64;
        self.position = PointerSample::new(
            (raw_x / width) as f32,
            (1.0 - raw_y / height) as f32,
        );
    }

    /// The most recent normalized position.
    pub fn position(&self) -> PointerSample {
        self.position
    }
}
