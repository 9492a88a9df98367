//! Game settings and preferences
//!
//! Persisted as `settings.json` in the working directory. The file
//! is read once per session and validated into a [`GameConfig`], which is the
//! only thing the simulation ever sees.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Grid;

/// Errors raised while loading, saving or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("bomb_behavior must be 1 (end game) or 2 (halve length), got {0}")]
    InvalidBombBehavior(u8),
    #[error("golden_apple_duration must be a positive number of seconds")]
    InvalidGoldenAppleDuration,
    #[error("speed_percentage must be a positive percentage")]
    InvalidSpeedPercentage,
}

/// What happens when the snake's head lands on a bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BombBehavior {
    /// Session ends immediately
    EndGame,
    /// Snake is cut to half its length and the bomb is consumed
    HalveLength,
}

impl BombBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            BombBehavior::EndGame => "End game",
            BombBehavior::HalveLength => "Halve length",
        }
    }

    /// Decode the numeric form used in `settings.json`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BombBehavior::EndGame),
            2 => Some(BombBehavior::HalveLength),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            BombBehavior::EndGame => 1,
            BombBehavior::HalveLength => 2,
        }
    }
}

/// Raw settings as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bombs appear on the grid
    pub bombs_enabled: bool,
    /// 1 = bombs end the game, 2 = bombs halve the snake
    pub bomb_behavior: u8,
    /// Golden apples appear on the grid
    pub golden_apple_enabled: bool,
    /// Golden apple lifetime in seconds
    pub golden_apple_duration: u32,
    /// Speed multiplier in percent (100 = normal)
    pub speed_percentage: u32,
    /// Screen size in pixels, raised to 1280x720 if smaller
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bombs_enabled: true,
            bomb_behavior: BombBehavior::HalveLength.code(),
            golden_apple_enabled: true,
            golden_apple_duration: 10,
            speed_percentage: 100,
            screen_width: MIN_SCREEN_WIDTH,
            screen_height: MIN_SCREEN_HEIGHT,
        }
    }
}

impl Settings {
    /// Default settings file, relative to the working directory
    pub const FILE_NAME: &'static str = "settings.json";

    /// Load `settings.json` from the working directory
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Self::FILE_NAME)
    }

    /// Load settings from `path`.
    ///
    /// Missing keys fall back to their defaults. When the file does not exist
    /// it is created with the default settings.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path)?;
            log::info!("Created default settings at {}", path.display());
            return Ok(settings);
        }

        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to `path` as pretty-printed JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let io_err = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| io_err(e.into()))?;
        fs::write(path, json).map_err(io_err)?;
        log::debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Screen width with the minimum resolution applied
    pub fn effective_screen_width(&self) -> u32 {
        self.screen_width.max(MIN_SCREEN_WIDTH)
    }

    /// Screen height with the minimum resolution applied
    pub fn effective_screen_height(&self) -> u32 {
        self.screen_height.max(MIN_SCREEN_HEIGHT)
    }

    /// Validate into the configuration consumed by the simulation
    pub fn to_config(&self) -> Result<GameConfig, SettingsError> {
        let bomb_behavior = BombBehavior::from_code(self.bomb_behavior)
            .ok_or(SettingsError::InvalidBombBehavior(self.bomb_behavior))?;
        if self.golden_apple_duration == 0 {
            return Err(SettingsError::InvalidGoldenAppleDuration);
        }
        if self.speed_percentage == 0 {
            return Err(SettingsError::InvalidSpeedPercentage);
        }

        let grid = Grid::new(
            (self.effective_screen_width() / CELL_SIZE) as i32,
            (self.effective_screen_height() / CELL_SIZE) as i32,
        );

        Ok(GameConfig {
            grid,
            bombs_enabled: self.bombs_enabled,
            bomb_behavior,
            golden_apple_enabled: self.golden_apple_enabled,
            golden_apple_duration_ticks: self.golden_apple_duration.saturating_mul(TICKS_PER_SECOND),
            speed_multiplier: self.speed_percentage as f32 / 100.0,
        })
    }
}

/// Validated per-session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub grid: Grid,
    pub bombs_enabled: bool,
    pub bomb_behavior: BombBehavior,
    pub golden_apple_enabled: bool,
    /// Golden apple lifetime in ticks
    pub golden_apple_duration_ticks: u32,
    /// `speed_percentage / 100`
    pub speed_multiplier: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: Grid::new(
                (MIN_SCREEN_WIDTH / CELL_SIZE) as i32,
                (MIN_SCREEN_HEIGHT / CELL_SIZE) as i32,
            ),
            bombs_enabled: true,
            bomb_behavior: BombBehavior::HalveLength,
            golden_apple_enabled: true,
            golden_apple_duration_ticks: 10 * TICKS_PER_SECOND,
            speed_multiplier: 1.0,
        }
    }
}

impl GameConfig {
    /// Ticks per second at the start of a session
    pub fn initial_speed(&self) -> f32 {
        BASE_SPEED * self.speed_multiplier
    }

    /// Speed gained per multiple-of-five score
    pub fn speed_increment(&self) -> f32 {
        self.speed_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nonspecial_snake_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_default_config_grid() {
        let config = Settings::default().to_config().unwrap();
        assert_eq!(config.grid, Grid::new(64, 36));
        assert_eq!(config.bomb_behavior, BombBehavior::HalveLength);
        assert_eq!(config.golden_apple_duration_ticks, 100);
        assert!((config.initial_speed() - 10.0).abs() < f32::EPSILON);
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_minimum_resolution_clamp() {
        let settings = Settings {
            screen_width: 640,
            screen_height: 480,
            ..Default::default()
        };
        let config = settings.to_config().unwrap();
        assert_eq!(config.grid, Grid::new(64, 36));

        let settings = Settings {
            screen_width: 1920,
            screen_height: 1080,
            ..Default::default()
        };
        assert_eq!(settings.to_config().unwrap().grid, Grid::new(96, 54));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_behavior = Settings {
            bomb_behavior: 3,
            ..Default::default()
        };
        assert!(matches!(
            bad_behavior.to_config(),
            Err(SettingsError::InvalidBombBehavior(3))
        ));

        let bad_speed = Settings {
            speed_percentage: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_speed.to_config(),
            Err(SettingsError::InvalidSpeedPercentage)
        ));

        let bad_duration = Settings {
            golden_apple_duration: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad_duration.to_config(),
            Err(SettingsError::InvalidGoldenAppleDuration)
        ));
    }

    #[test]
    fn test_speed_percentage_scales_speed() {
        let settings = Settings {
            speed_percentage: 150,
            ..Default::default()
        };
        let config = settings.to_config().unwrap();
        assert!((config.initial_speed() - 15.0).abs() < 1e-5);
        assert!((config.speed_increment() - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "bombs_enabled": false, "speed_percentage": 50 }"#).unwrap();
        assert!(!settings.bombs_enabled);
        assert_eq!(settings.speed_percentage, 50);
        assert_eq!(settings.bomb_behavior, 2);
        assert_eq!(settings.golden_apple_duration, 10);
        assert_eq!(settings.screen_width, 1280);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let reloaded = Settings::load_from(&path).unwrap();
        assert_eq!(reloaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_malformed_file() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
        let _ = fs::remove_file(&path);
    }
}
