//! Configuration file handling for emberdrift.
//!
//! Settings live in `config.toml` under the platform config directory. A
//! missing file means defaults; every field is optional.

mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use directories::ProjectDirs;
use emberdrift_core::{BackgroundStyle, MAX_DEVICE_RATIO, Viewport};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{ConfigError, Result};

/// Logical pixels per terminal column when not configured.
pub const DEFAULT_PIXELS_PER_COLUMN: f64 = 8.0;

/// Upper bound on `pixels_per_column`. Particle counts grow with the logical
/// width, so larger values would flood the screen.
pub const MAX_PIXELS_PER_COLUMN: f64 = 64.0;

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation shown at startup.
    pub style: BackgroundStyle,
    /// Fixed random seed; a time-derived seed is used when absent.
    pub seed: Option<u64>,
    /// Logical pixels covered by one terminal column. A cell is twice as
    /// tall as it is wide and is drawn as two stacked pixels.
    pub pixels_per_column: f64,
    /// Write logs here. Logging is off when absent.
    pub log_file: Option<PathBuf>,
    /// Default log filter, e.g. `info` or `emberdrift_background=debug`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: BackgroundStyle::default(),
            seed: None,
            pixels_per_column: DEFAULT_PIXELS_PER_COLUMN,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Location of the config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "emberdrift").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        match Self::path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    /// Write as TOML, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// The configured seed, or one taken from the system clock.
    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    /// Logical viewport for a terminal of `cols` x `rows` cells.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        let ppc = if self.pixels_per_column.is_finite() {
            self.pixels_per_column
                .clamp(1.0 / MAX_DEVICE_RATIO, MAX_PIXELS_PER_COLUMN)
        } else {
            DEFAULT_PIXELS_PER_COLUMN
        };
        Viewport::new(
            f64::from(cols) * ppc,
            f64::from(rows) * 2.0 * ppc,
            1.0 / ppc,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "style = \"candles\"\nseed = 42\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.style, BackgroundStyle::Candles);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pixels_per_column, DEFAULT_PIXELS_PER_COLUMN);
        assert_eq!(config.seed_or_clock(), 42);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "style = \"sparkles\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            style: BackgroundStyle::None,
            log_file: Some(PathBuf::from("/tmp/emberdrift.log")),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_viewport_maps_cells_to_pixels() {
        let viewport = Config::default().viewport(100, 30);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 480.0);
        assert_eq!(viewport.backing_size(), (100, 60));
    }

    #[test]
    fn test_tiny_cell_size_respects_ratio_cap() {
        let config = Config {
            pixels_per_column: 0.1,
            ..Default::default()
        };
        let viewport = config.viewport(10, 10);
        assert_eq!(viewport.device_ratio, MAX_DEVICE_RATIO);
        assert_eq!(viewport.backing_size(), (10, 20));
    }

    #[test]
    fn test_huge_cell_size_is_capped() {
        let config = Config {
            pixels_per_column: 1e9,
            ..Default::default()
        };
        let viewport = config.viewport(200, 50);
        assert_eq!(viewport.width, 200.0 * MAX_PIXELS_PER_COLUMN);
        assert_eq!(viewport.height, 100.0 * MAX_PIXELS_PER_COLUMN);
        assert_eq!(viewport.backing_size(), (200, 100));
    }
}
