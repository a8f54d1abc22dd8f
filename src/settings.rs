//! Game settings and preferences
//!
//! The player-facing knobs from the settings screen, persisted as JSON and
//! turned into a [`RoundConfig`] when a round starts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::{Difficulty, RoundConfig};

/// Slider ranges offered by the settings screen
pub const GAME_SPEED_RANGE: (f32, f32) = (0.5, 3.0);
pub const MAX_ENTITIES_RANGE: (u32, u32) = (5, 30);
pub const POWER_UP_INTERVAL_RANGE: (u32, u32) = (10, 60);
pub const ROUND_DURATION_RANGE: (u32, u32) = (30, 180);

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Global speed multiplier
    pub game_speed: f32,
    /// Entity cap
    pub max_entities: u32,
    /// Seconds between power-ups
    pub power_up_interval: u32,
    /// Round length in seconds
    pub round_duration: u32,
    /// Difficulty level (1-10)
    pub difficulty: u8,
    /// Fixed RNG seed for reproducible rounds
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_speed: 1.0,
            max_entities: 10,
            power_up_interval: 30,
            round_duration: 60,
            difficulty: 5,
            seed: None,
        }
    }
}

impl GameSettings {
    /// Snap every value into its slider range
    pub fn clamped(&self) -> Self {
        let speed = if self.game_speed.is_finite() {
            self.game_speed.clamp(GAME_SPEED_RANGE.0, GAME_SPEED_RANGE.1)
        } else {
            Self::default().game_speed
        };
        Self {
            game_speed: speed,
            max_entities: self.max_entities.clamp(MAX_ENTITIES_RANGE.0, MAX_ENTITIES_RANGE.1),
            power_up_interval: self
                .power_up_interval
                .clamp(POWER_UP_INTERVAL_RANGE.0, POWER_UP_INTERVAL_RANGE.1),
            round_duration: self
                .round_duration
                .clamp(ROUND_DURATION_RANGE.0, ROUND_DURATION_RANGE.1),
            difficulty: self.difficulty.clamp(1, 10),
            seed: self.seed,
        }
    }

    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            speed_multiplier: self.game_speed,
            max_entities: self.max_entities,
            power_up_interval_seconds: self.power_up_interval,
            round_duration_seconds: self.round_duration,
        }
    }

    /// Check the settings describe a playable round
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.round_config().validate()?;
        Difficulty::new(self.difficulty)?;
        Ok(())
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is absent
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("beetle_tap_{}_{name}.json", std::process::id()))
    }

    #[test]
    fn test_defaults_match_round_config() {
        assert_eq!(GameSettings::default().round_config(), RoundConfig::default());
    }

    #[test]
    fn test_clamped_snaps_to_ranges() {
        let wild = GameSettings {
            game_speed: 9.0,
            max_entities: 0,
            power_up_interval: 500,
            round_duration: 5,
            difficulty: 0,
            seed: Some(3),
        };
        let c = wild.clamped();
        assert_eq!(c.game_speed, 3.0);
        assert_eq!(c.max_entities, 5);
        assert_eq!(c.power_up_interval, 60);
        assert_eq!(c.round_duration, 30);
        assert_eq!(c.difficulty, 1);
        assert_eq!(c.seed, Some(3));

        let nan = GameSettings {
            game_speed: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan.clamped().game_speed, 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: GameSettings = serde_json::from_str(r#"{ "difficulty": 8 }"#).unwrap();
        assert_eq!(s.difficulty, 8);
        assert_eq!(s.round_duration, 60);
    }

    #[test]
    fn test_save_load_file() {
        let path = temp_path("roundtrip");
        let s = GameSettings {
            game_speed: 2.0,
            seed: Some(11),
            ..Default::default()
        };
        s.save(&path).unwrap();
        assert_eq!(GameSettings::load(&path).unwrap(), s);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let path = temp_path("invalid");
        fs::write(&path, r#"{ "difficulty": 12 }"#).unwrap();
        let err = GameSettings::load(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigError::DifficultyOutOfRange(12))
        ));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(GameSettings::load(&path), Err(SettingsError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(GameSettings::load_or_default(&path).unwrap(), GameSettings::default());
    }
}
