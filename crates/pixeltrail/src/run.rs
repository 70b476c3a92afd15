use std::path::PathBuf;

use anyhow::{Context, Result};
use renderer::{EffectParams, Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::settings::Settings;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let settings = match cli.settings.as_ref() {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let config = resolve_config(&cli, &settings)?;
    tracing::info!(
        image = %config.image_path.display(),
        width = config.surface_size.0,
        height = config.surface_size.1,
        grid_size = config.params.grid_size,
        pixelation_radius = config.params.pixelation_radius,
        trail_decay = config.params.trail_decay,
        "starting pixeltrail"
    );

    let mut renderer = Renderer::new(config);
    renderer.run()
}

/// Builds the renderer configuration: CLI flags override the settings file,
/// which overrides the built-in defaults.
fn resolve_config(cli: &Cli, settings: &Settings) -> Result<RendererConfig> {
    let size_spec = cli.size.clone().or_else(|| settings.size.clone());
    let surface_size = size_spec
        .as_deref()
        .map(parse_surface_size)
        .transpose()?
        .unwrap_or((1600, 900));

    let defaults = EffectParams::default();
    let requested = EffectParams {
        grid_size: cli.grid_size.or(settings.grid_size).unwrap_or(defaults.grid_size),
        pixelation_radius: cli
            .pixelation_radius
            .or(settings.pixelation_radius)
            .unwrap_or(defaults.pixelation_radius),
        trail_decay: cli
            .trail_decay
            .or(settings.trail_decay)
            .unwrap_or(defaults.trail_decay),
    };
    let params = requested.clamped();
    if params != requested {
        tracing::warn!(
            grid_size = params.grid_size,
            pixelation_radius = params.pixelation_radius,
            trail_decay = params.trail_decay,
            "requested parameters clamped to their declared ranges"
        );
    }

    let image_path = cli
        .image
        .clone()
        .or_else(|| settings.image.clone())
        .unwrap_or_else(|| PathBuf::from("assets/bg.jpg"));

    Ok(RendererConfig {
        surface_size,
        image_path,
        params,
        show_panel: cli.panel || settings.show_panel.unwrap_or(false),
    })
}

fn parse_surface_size(spec: &str) -> Result<(u32, u32)> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow::anyhow!("expected WxH format, e.g. 1600x900"))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid width in size specification"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid height in size specification"))?;

    if width == 0 || height == 0 {
        anyhow::bail!("surface dimensions must be greater than zero");
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pixeltrail").chain(args.iter().copied()))
    }

    #[test]
    fn parses_surface_size_variants() {
        assert_eq!(parse_surface_size("1600x900").unwrap(), (1600, 900));
        assert_eq!(parse_surface_size(" 1280 X 720 ").unwrap(), (1280, 720));
        assert!(parse_surface_size("1600").is_err());
        assert!(parse_surface_size("0x900").is_err());
        assert!(parse_surface_size("wideXtall").is_err());
    }

    #[test]
    fn cli_overrides_settings_file() {
        let settings = Settings::from_toml_str(
            r#"
image = "from-settings.png"
grid_size = 10
trail_decay = 0.95
"#,
        )
        .unwrap();
        let config = resolve_config(&cli(&["cli.png", "--grid-size", "60"]), &settings).unwrap();

        assert_eq!(config.image_path, PathBuf::from("cli.png"));
        assert_eq!(config.params.grid_size, 60);
        // Untouched by the CLI: the settings file wins over defaults.
        assert_eq!(config.params.trail_decay, 0.95);
    }

    #[test]
    fn defaults_fill_everything_else() {
        let config = resolve_config(&cli(&[]), &Settings::default()).unwrap();
        assert_eq!(config.surface_size, (1600, 900));
        assert_eq!(config.image_path, PathBuf::from("assets/bg.jpg"));
        assert_eq!(config.params, EffectParams::default());
        assert!(!config.show_panel);
    }

    #[test]
    fn out_of_range_cli_values_are_clamped() {
        let config =
            resolve_config(&cli(&["--trail-decay", "0.2"]), &Settings::default()).unwrap();
        assert_eq!(config.params.trail_decay, 0.85);
    }

    #[test]
    fn panel_flag_enables_panel() {
        let config = resolve_config(&cli(&["--panel"]), &Settings::default()).unwrap();
        assert!(config.show_panel);
    }
}
