use std::fs;
use std::path::{Path, PathBuf};

use renderer::{GRID_SIZE_RANGE, PIXELATION_RADIUS_RANGE, TRAIL_DECAY_RANGE};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Startup values for the demo, merged under any CLI overrides.
///
/// Unlike the runtime panel, which clamps key presses, a settings file with
/// out-of-range values is rejected outright so typos do not silently turn
/// into a different demo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub image: Option<PathBuf>,
    pub size: Option<String>,
    pub grid_size: Option<i32>,
    pub pixelation_radius: Option<f32>,
    pub trail_decay: Option<f32>,
    pub show_panel: Option<bool>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if let Some(cells) = self.grid_size {
            if !GRID_SIZE_RANGE.contains(cells as f32) {
                return Err(SettingsError::Invalid(format!(
                    "grid_size {cells} is outside {}..={}",
                    GRID_SIZE_RANGE.min, GRID_SIZE_RANGE.max
                )));
            }
        }
        if let Some(radius) = self.pixelation_radius {
            if !PIXELATION_RADIUS_RANGE.contains(radius) {
                return Err(SettingsError::Invalid(format!(
                    "pixelation_radius {radius} is outside {}..={}",
                    PIXELATION_RADIUS_RANGE.min, PIXELATION_RADIUS_RANGE.max
                )));
            }
        }
        if let Some(decay) = self.trail_decay {
            if !TRAIL_DECAY_RANGE.contains(decay) {
                return Err(SettingsError::Invalid(format!(
                    "trail_decay {decay} is outside {}..={}",
                    TRAIL_DECAY_RANGE.min, TRAIL_DECAY_RANGE.max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
image = "wallpapers/forest.png"
size = "1920x1080"
grid_size = 40
pixelation_radius = 0.2
trail_decay = 0.95
show_panel = true
"#;

    #[test]
    fn parses_sample_settings() {
        let settings = Settings::from_toml_str(SAMPLE).expect("parse settings");
        assert_eq!(
            settings.image.as_deref(),
            Some(Path::new("wallpapers/forest.png"))
        );
        assert_eq!(settings.size.as_deref(), Some("1920x1080"));
        assert_eq!(settings.grid_size, Some(40));
        assert_eq!(settings.pixelation_radius, Some(0.2));
        assert_eq!(settings.trail_decay, Some(0.95));
        assert_eq!(settings.show_panel, Some(true));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml_str("").expect("parse empty settings");
        assert!(settings.image.is_none());
        assert!(settings.grid_size.is_none());
        assert!(settings.show_panel.is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = Settings::from_toml_str("trail_decay = 0.5").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml_str("grid_size = 0").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml_str("pixelation_radius = 0.4").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Settings::from_toml_str("gird_size = 28").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
