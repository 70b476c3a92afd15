use tracing::info;

/// Scalar knobs consumed by the fragment shader each frame.
///
/// These are the only runtime-tunable values; everything else about the
/// effect is fixed at startup. The trail system reads `trail_decay` and
/// nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// Vertical pixelation cell count; horizontal count follows the aspect.
    pub grid_size: i32,
    /// Normalized reveal radius around each trail sample.
    pub pixelation_radius: f32,
    /// Per-frame multiplier applied to aging trail strengths.
    pub trail_decay: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            grid_size: 28,
            pixelation_radius: 0.125,
            trail_decay: 0.9,
        }
    }
}

impl EffectParams {
    /// Returns a copy with every knob forced into its declared range.
    pub fn clamped(self) -> Self {
        Self {
            grid_size: GRID_SIZE_RANGE.clamp(self.grid_size as f32).round() as i32,
            pixelation_radius: PIXELATION_RADIUS_RANGE.clamp(self.pixelation_radius),
            trail_decay: TRAIL_DECAY_RANGE.clamp(self.trail_decay),
        }
    }
}

/// Declared editable range for a panel knob.
#[derive(Debug, Clone, Copy)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn nudged(&self, value: f32, direction: f32) -> f32 {
        self.clamp(value + direction * self.step)
    }
}

pub const GRID_SIZE_RANGE: ParamRange = ParamRange {
    min: 1.0,
    max: 100.0,
    step: 1.0,
};

pub const PIXELATION_RADIUS_RANGE: ParamRange = ParamRange {
    min: 0.05,
    max: 0.3,
    step: 0.005,
};

pub const TRAIL_DECAY_RANGE: ParamRange = ParamRange {
    min: 0.85,
    max: 0.99,
    step: 0.01,
};

/// Keyboard-driven tweak panel bound to the live [`EffectParams`].
///
/// Hidden by default. While enabled, lowercase keys step a knob down and
/// uppercase keys step it up, always clamped to the declared range:
/// `g`/`G` for grid size, `p`/`P` for pixelation radius, `d`/`D` for trail
/// decay. Changes are reported through `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct ParamPanel {
    visible: bool,
    params: EffectParams,
}

impl ParamPanel {
    pub fn new(params: EffectParams, visible: bool) -> Self {
        Self {
            visible,
            params: params.clamped(),
        }
    }

    pub fn params(&self) -> EffectParams {
        self.params
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        if self.visible {
            info!(
                grid_size = self.params.grid_size,
                pixelation_radius = self.params.pixelation_radius,
                trail_decay = self.params.trail_decay,
                "parameter panel enabled (g/G grid, p/P radius, d/D decay)"
            );
        } else {
            info!("parameter panel disabled");
        }
    }

    /// Applies one key press; returns true when a parameter changed.
    pub fn handle_character(&mut self, ch: char) -> bool {
        if !self.visible {
            return false;
        }

        let direction = if ch.is_ascii_uppercase() { 1.0 } else { -1.0 };
        let before = self.params;
        match ch.to_ascii_lowercase() {
            'g' => {
                self.params.grid_size = GRID_SIZE_RANGE
                    .nudged(self.params.grid_size as f32, direction)
                    .round() as i32;
            }
            'p' => {
                self.params.pixelation_radius =
                    PIXELATION_RADIUS_RANGE.nudged(self.params.pixelation_radius, direction);
            }
            'd' => {
                self.params.trail_decay =
                    TRAIL_DECAY_RANGE.nudged(self.params.trail_decay, direction);
            }
            _ => return false,
        }

        let changed = self.params != before;
        if changed {
            info!(
                grid_size = self.params.grid_size,
                pixelation_radius = self.params.pixelation_radius,
                trail_decay = self.params.trail_decay,
                "parameters updated"
            );
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_hidden_and_ignores_keys() {
        let mut panel = ParamPanel::new(EffectParams::default(), false);
        assert!(!panel.is_visible());
        assert!(!panel.handle_character('G'));
        assert_eq!(panel.params(), EffectParams::default());
    }

    #[test]
    fn steps_respect_declared_increments() {
        let mut panel = ParamPanel::new(EffectParams::default(), true);

        assert!(panel.handle_character('G'));
        assert_eq!(panel.params().grid_size, 29);

        assert!(panel.handle_character('p'));
        assert!((panel.params().pixelation_radius - 0.12).abs() < 1e-6);

        assert!(panel.handle_character('D'));
        assert!((panel.params().trail_decay - 0.91).abs() < 1e-6);
    }

    #[test]
    fn clamps_at_both_range_bounds() {
        let mut panel = ParamPanel::new(
            EffectParams {
                grid_size: 100,
                pixelation_radius: 0.05,
                trail_decay: 0.99,
            },
            true,
        );

        // Already at a bound: stepping outward is a no-op.
        assert!(!panel.handle_character('G'));
        assert_eq!(panel.params().grid_size, 100);
        assert!(!panel.handle_character('p'));
        assert!((panel.params().pixelation_radius - 0.05).abs() < 1e-6);
        assert!(!panel.handle_character('D'));
        assert!((panel.params().trail_decay - 0.99).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_startup_values_are_clamped() {
        let panel = ParamPanel::new(
            EffectParams {
                grid_size: 500,
                pixelation_radius: 2.0,
                trail_decay: 0.1,
            },
            false,
        );
        assert_eq!(panel.params().grid_size, 100);
        assert!((panel.params().pixelation_radius - 0.3).abs() < 1e-6);
        assert!((panel.params().trail_decay - 0.85).abs() < 1e-6);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut panel = ParamPanel::new(EffectParams::default(), true);
        assert!(!panel.handle_character('x'));
        assert_eq!(panel.params(), EffectParams::default());
    }
}
