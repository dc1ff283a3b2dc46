//! User settings for the cords launch sequence.
//!
//! Settings live in `config.toml` under the platform config directory.
//! Every field is optional; a missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{WrapErr, eyre};
use cords_core::ColorTheme;
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Name of the settings file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Lowest and highest accepted frame rates.
const FRAME_RATE_RANGE: (u32, u32) = (1, 240);

/// Upper bound on live cords.
const MAX_CORDS_LIMIT: usize = 1_000;

/// Project directories for cords, if the platform provides a home.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "cords")
}

/// Cord field tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Maximum number of live cords.
    pub max_cords: usize,
    /// Number of lanes across the screen.
    pub lanes: u32,
    /// Chance, out of 100, that a frame spawns a cord.
    pub spawn_chance_percent: u32,
    /// Rise speed in percent of the screen height per second.
    pub rise_speed: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            max_cords: 15,
            lanes: 25,
            spawn_chance_percent: 7,
            rise_speed: 50.0,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames per second.
    pub frame_rate: u32,
    /// Foreground color theme.
    pub theme: ColorTheme,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Draw the background grid behind the cords.
    pub show_grid: bool,
    /// Fixed seed for the cord field; random when unset.
    pub seed: Option<u64>,
    /// Cord field tunables.
    pub field: FieldSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            theme: ColorTheme::default(),
            log_level: "info".to_string(),
            show_grid: true,
            seed: None,
            field: FieldSettings::default(),
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load settings from the default location.
    ///
    /// Falls back to the defaults when the platform has no config
    /// directory or the file does not exist.
    pub fn load() -> color_eyre::Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from `path`, using the defaults if it does not exist.
    pub fn load_from(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let settings =
            Self::parse(&contents).wrap_err_with(|| format!("invalid settings in {}", path.display()))?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse settings from TOML text and normalize out-of-range values.
    pub fn parse(contents: &str) -> color_eyre::Result<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validated()
    }

    fn validated(mut self) -> color_eyre::Result<Self> {
        let (lo, hi) = FRAME_RATE_RANGE;
        self.frame_rate = self.frame_rate.clamp(lo, hi);
        self.field.spawn_chance_percent = self.field.spawn_chance_percent.min(100);
        self.field.max_cords = self.field.max_cords.min(MAX_CORDS_LIMIT);

        if self.field.lanes == 0 {
            return Err(eyre!("field.lanes must be at least 1"));
        }
        if !self.field.rise_speed.is_finite() || self.field.rise_speed < 0.0 {
            return Err(eyre!(
                "field.rise_speed must be a non-negative number, got {}",
                self.field.rise_speed
            ));
        }
        Ok(self)
    }

    /// Duration of a single frame at the configured rate.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.frame_rate.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.frame_rate, 60);
        assert_eq!(settings.field.max_cords, 15);
        assert_eq!(settings.field.lanes, 25);
        assert_eq!(settings.field.spawn_chance_percent, 7);
        assert_eq!(settings.field.rise_speed, 50.0);
        assert!(settings.show_grid);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_partial() {
        let settings = Settings::parse(
            r#"
            theme = "cyan"
            seed = 42

            [field]
            spawn_chance_percent = 12
            "#,
        )
        .unwrap();
        assert_eq!(settings.theme, ColorTheme::Cyan);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.field.spawn_chance_percent, 12);
        assert_eq!(settings.field.max_cords, 15);
        assert_eq!(settings.frame_rate, 60);
    }

    #[test]
    fn test_parse_normalizes_ranges() {
        let settings = Settings::parse("frame_rate = 1000\n[field]\nspawn_chance_percent = 250").unwrap();
        assert_eq!(settings.frame_rate, 240);
        assert_eq!(settings.field.spawn_chance_percent, 100);
        assert_eq!(Settings::parse("frame_rate = 0").unwrap().frame_rate, 1);
    }

    #[test]
    fn test_parse_caps_max_cords() {
        let settings = Settings::parse("[field]\nmax_cords = 9223372036854775807").unwrap();
        assert_eq!(settings.field.max_cords, MAX_CORDS_LIMIT);
        let settings = Settings::parse("[field]\nmax_cords = 40").unwrap();
        assert_eq!(settings.field.max_cords, 40);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(Settings::parse("[field]\nlanes = 0").is_err());
        assert!(Settings::parse("[field]\nrise_speed = -1.0").is_err());
        assert!(Settings::parse("theme = \"plaid\"").is_err());
        assert!(Settings::parse("frame_rate = \"fast\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("cords-settings-that-do-not-exist.toml");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cords-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "show_grid = false\nlog_level = \"debug\"\n").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!settings.show_grid);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_frame_budget() {
        let settings = Settings::default();
        assert_eq!(settings.frame_budget(), Duration::from_micros(16_666));
    }
}
