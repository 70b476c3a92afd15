use std::path::PathBuf;

use clap::Parser;

pub fn parse() -> Cli {
    Cli::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "pixeltrail",
    author,
    version,
    about = "Pointer-trail pixelation effect over a background image"
)]
pub struct Cli {
    /// Background image to reveal (PNG or JPEG).
    #[arg(value_name = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Settings file with startup values (TOML).
    #[arg(long, value_name = "FILE", env = "PIXELTRAIL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Override the window resolution (e.g. `1600x900`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Vertical pixelation cell count (1-100).
    #[arg(long, value_name = "CELLS")]
    pub grid_size: Option<i32>,

    /// Normalized reveal radius around each trail point (0.05-0.3).
    #[arg(long, value_name = "RADIUS")]
    pub pixelation_radius: Option<f32>,

    /// Per-frame decay factor for aging trail samples (0.85-0.99).
    #[arg(long, value_name = "FACTOR")]
    pub trail_decay: Option<f32>,

    /// Enable the keyboard parameter panel at startup.
    #[arg(long)]
    pub panel: bool,
}
