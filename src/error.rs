//! Error types
//!
//! The simulation itself does no I/O; the only failures are rejected round
//! configurations, unreadable settings files and incomplete player
//! registrations.

use std::error::Error;
use std::fmt;

use crate::consts::{MAX_DIFFICULTY, MIN_DIFFICULTY};

/// A round configuration that would produce undefined spawn/speed behavior.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Speed multiplier must be finite and greater than zero.
    InvalidSpeedMultiplier(f32),
    /// At least one entity must be allowed on the field.
    InvalidMaxEntities(u32),
    /// Power-up interval must be at least one second.
    InvalidPowerUpInterval(u32),
    /// Round duration must be at least one second.
    InvalidRoundDuration(u32),
    /// Difficulty outside `MIN_DIFFICULTY..=MAX_DIFFICULTY`.
    DifficultyOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeedMultiplier(v) => {
                write!(f, "speed multiplier must be positive, got {v}")
            }
            Self::InvalidMaxEntities(v) => {
                write!(f, "maximum concurrent entities must be at least 1, got {v}")
            }
            Self::InvalidPowerUpInterval(v) => {
                write!(f, "power-up interval must be at least 1 second, got {v}")
            }
            Self::InvalidRoundDuration(v) => {
                write!(f, "round duration must be at least 1 second, got {v}")
            }
            Self::DifficultyOutOfRange(v) => write!(
                f,
                "difficulty must be in {MIN_DIFFICULTY}..={MAX_DIFFICULTY}, got {v}"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Failure to load or save a settings file.
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read or written.
    Io(std::io::Error),
    /// The file is not valid settings JSON.
    Parse(serde_json::Error),
    /// The file parsed but describes an unplayable round.
    Invalid(ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings I/O failed: {e}"),
            Self::Parse(e) => write!(f, "settings file is malformed: {e}"),
            Self::Invalid(e) => write!(f, "settings rejected: {e}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        Self::Invalid(e)
    }
}

/// A player registration that cannot be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    /// Full name is empty or whitespace.
    BlankName,
    /// Gender is empty or whitespace.
    BlankGender,
    /// Course outside `1..=6`.
    CourseOutOfRange(u8),
    /// Day/month pair that is not a calendar date.
    InvalidBirthDate { day: u8, month: u8 },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "full name must not be blank"),
            Self::BlankGender => write!(f, "gender must not be blank"),
            Self::CourseOutOfRange(c) => write!(f, "course must be in 1..=6, got {c}"),
            Self::InvalidBirthDate { day, month } => {
                write!(f, "{day}.{month} is not a valid birth date")
            }
        }
    }
}

impl Error for RegistrationError {}
