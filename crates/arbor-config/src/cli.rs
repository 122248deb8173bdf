//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "arbor", about = "Arbor camera navigation")]
pub struct CliArgs {
    /// Viewport width in logical pixels.
    #[arg(long)]
    pub width: Option<f32>,

    /// Viewport height in logical pixels.
    #[arg(long)]
    pub height: Option<f32>,

    /// Camera travel duration in milliseconds.
    #[arg(long)]
    pub tween_duration: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.camera.viewport_width = w;
        }
        if let Some(h) = args.height {
            self.camera.viewport_height = h;
        }
        if let Some(ms) = args.tween_duration {
            self.navigation.tween_duration_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
