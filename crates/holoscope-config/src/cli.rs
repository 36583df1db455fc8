//! Command-line argument parsing for Holoscope.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Holoscope command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "holoscope", about = "Holographic globe and pointing terminal")]
pub struct CliArgs {
    /// Observer latitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f32>,

    /// Observer longitude in degrees (east positive).
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f32>,

    /// Camera movement boundary radius.
    #[arg(long)]
    pub hub_radius: Option<f32>,

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
        if let Some(lat) = args.latitude {
            self.viewer.latitude = lat;
        }
        if let Some(lon) = args.longitude {
            self.viewer.longitude = lon;
        }
        if let Some(radius) = args.hub_radius {
            self.hub.radius = radius;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            latitude: Some(-12.5),
            hub_radius: Some(4.0),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert!((config.viewer.latitude + 12.5).abs() < 1e-6);
        assert!((config.hub.radius - 4.0).abs() < 1e-6);
        // Non-overridden fields retain defaults
        assert!((config.viewer.longitude - 6.99).abs() < 1e-6);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_negative_coordinates_parse() {
        let args =
            CliArgs::try_parse_from(["holoscope", "--latitude", "-33.9", "--longitude", "-70.6"])
                .unwrap();
        assert_eq!(args.latitude, Some(-33.9));
        assert_eq!(args.longitude, Some(-70.6));
    }
}
