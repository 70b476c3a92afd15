use crate::pointer::PointerSample;

/// Number of samples kept in the trail history.
pub const TRAIL_LENGTH: usize = 15;

/// Converts normalized-space movement into a head strength: moving 2% of the
/// viewport in one frame saturates the new sample at full strength.
const MOVEMENT_SENSITIVITY: f32 = 50.0;

/// One aged pointer sample: where it was and how strongly it still shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
}

impl TrailPoint {
    /// Startup value for every slot: viewport center with zero influence.
    pub const CENTERED: Self = Self {
        x: 0.5,
        y: 0.5,
        strength: 0.0,
    };
}

/// Fixed-capacity history of recent pointer positions with decaying strengths.
///
/// Logical slot 0 is always the most recent sample. Storage is a ring: instead
/// of shifting every slot each frame, `advance` rotates the head index onto
/// the oldest slot and overwrites it, which keeps the per-frame cost constant
/// while preserving the observable ordering of a shift-based history.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: [TrailPoint; TRAIL_LENGTH],
    /// Physical index of logical slot 0.
    head: usize,
    /// Position recorded by the previous `advance` call, seeding movement.
    previous: PointerSample,
}

impl TrailBuffer {
    /// All slots centered with zero strength; movement is measured from the
    /// viewport center until the first `advance`.
    pub fn new() -> Self {
        Self {
            points: [TrailPoint::CENTERED; TRAIL_LENGTH],
            head: 0,
            previous: PointerSample::CENTER,
        }
    }

    /// The sample at logical slot `index` (0 = most recent).
    pub fn get(&self, index: usize) -> TrailPoint {
        debug_assert!(index < TRAIL_LENGTH, "trail slot out of range");
        self.points[(self.head + index) % TRAIL_LENGTH]
    }

    /// Iterates samples from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = TrailPoint> + '_ {
        (0..TRAIL_LENGTH).map(move |index| self.get(index))
    }

    /// Copies the history, newest first, for handing out by value.
    pub fn snapshot(&self) -> [TrailPoint; TRAIL_LENGTH] {
        std::array::from_fn(|index| self.get(index))
    }

    /// Ages the history by one frame and inserts `current` at the front.
    ///
    /// Every surviving sample is multiplied by `decay_factor`, so a sample
    /// inserted `k` frames ago carries `initial * decay_factor^k`. The new
    /// head strength is the frame-to-frame movement scaled by
    /// [`MOVEMENT_SENSITIVITY`] and saturated at 1.0: fast sweeps cap out
    /// instead of growing unbounded, and a stationary pointer inserts zero —
    /// motion, not presence, drives visibility.
    pub fn advance(&mut self, current: PointerSample, decay_factor: f32) {
        let movement = current.distance_to(self.previous);

        for point in &mut self.points {
            point.strength = (point.strength * decay_factor).clamp(0.0, 1.0);
        }

        // Rotating the head backwards turns the oldest slot into the new front.
        self.head = (self.head + TRAIL_LENGTH - 1) % TRAIL_LENGTH;
        self.points[self.head] = TrailPoint {
            x: current.x,
            y: current.y,
            strength: (movement * MOVEMENT_SENSITIVITY).min(1.0),
        };

        self.previous = current;
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECAY: f32 = 0.9;

    fn sample(x: f32, y: f32) -> PointerSample {
        PointerSample::new(x, y)
    }

    #[test]
    fn length_is_fixed_across_advances() {
        let mut buffer = TrailBuffer::new();
        for step in 0..100 {
            buffer.advance(sample(0.5 + step as f32 * 0.001, 0.5), DECAY);
            assert_eq!(buffer.iter().count(), TRAIL_LENGTH);
        }
    }

    #[test]
    fn strengths_stay_within_unit_interval() {
        let mut buffer = TrailBuffer::new();
        // Wild sweeps, including samples far outside the viewport.
        let positions = [
            sample(0.0, 0.0),
            sample(3.0, -2.0),
            sample(-1.0, 4.0),
            sample(0.5, 0.5),
            sample(0.5001, 0.5),
        ];
        for position in positions {
            buffer.advance(position, DECAY);
            for point in buffer.iter() {
                assert!((0.0..=1.0).contains(&point.strength));
            }
        }
    }

    #[test]
    fn stationary_pointer_inserts_zero_head_and_decays_rest() {
        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.7, 0.5), DECAY);
        assert!((buffer.get(0).strength - 1.0).abs() < 1e-6);

        let mut last = buffer.get(1).strength;
        for _ in 0..10 {
            buffer.advance(sample(0.7, 0.5), DECAY);
            assert_eq!(buffer.get(0).strength, 0.0);
            // The full-strength sample from the first frame keeps aging down
            // the history.
            let strongest = buffer
                .iter()
                .map(|point| point.strength)
                .fold(0.0f32, f32::max);
            if last > 0.0 {
                assert!(strongest < last);
            }
            last = strongest;
        }
    }

    #[test]
    fn decay_follows_power_law() {
        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.9, 0.5), DECAY);
        let initial = buffer.get(0).strength;

        for frame in 1..TRAIL_LENGTH {
            buffer.advance(sample(0.9, 0.5), DECAY);
            let expected = initial * DECAY.powi(frame as i32);
            assert!(
                (buffer.get(frame).strength - expected).abs() < 1e-5,
                "slot {frame} expected {expected}, got {}",
                buffer.get(frame).strength
            );
        }
    }

    #[test]
    fn head_strength_scales_with_movement() {
        // 2% of the viewport saturates; 1% is half strength; no motion is zero.
        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.52, 0.5), DECAY);
        assert!((buffer.get(0).strength - 1.0).abs() < 1e-5);

        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.51, 0.5), DECAY);
        assert!((buffer.get(0).strength - 0.5).abs() < 1e-5);

        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.5, 0.5), DECAY);
        assert_eq!(buffer.get(0).strength, 0.0);
    }

    #[test]
    fn large_movement_saturates_exactly() {
        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.95, 0.5), DECAY);
        assert_eq!(buffer.get(0).strength, 1.0);
    }

    #[test]
    fn successive_inserts_keep_order() {
        let mut buffer = TrailBuffer::new();
        let p0 = sample(0.1, 0.2);
        let p1 = sample(0.3, 0.4);
        let p2 = sample(0.5, 0.6);
        buffer.advance(p0, DECAY);
        buffer.advance(p1, DECAY);
        buffer.advance(p2, DECAY);

        assert_eq!((buffer.get(0).x, buffer.get(0).y), (p2.x, p2.y));
        assert_eq!((buffer.get(1).x, buffer.get(1).y), (p1.x, p1.y));
        assert_eq!((buffer.get(2).x, buffer.get(2).y), (p0.x, p0.y));
        // Slots never written still hold the startup value.
        assert_eq!(buffer.get(3), TrailPoint::CENTERED);
    }

    #[test]
    fn single_move_then_rest_matches_recurrence() {
        let mut buffer = TrailBuffer::new();
        buffer.advance(sample(0.6, 0.5), DECAY);
        let head = buffer.get(0);
        assert!((head.x - 0.6).abs() < 1e-6);
        assert!((head.strength - 1.0).abs() < 1e-6);

        buffer.advance(sample(0.6, 0.5), DECAY);
        let aged = buffer.get(1);
        assert!((aged.x - 0.6).abs() < 1e-6);
        assert!((aged.strength - 0.9).abs() < 1e-6);
        assert_eq!(buffer.get(0).strength, 0.0);
        assert!((buffer.get(0).x - 0.6).abs() < 1e-6);
    }
}
