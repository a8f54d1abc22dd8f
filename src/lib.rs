//! Beetle Tap - a timed tap-the-target arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (spawning, motion, power-up, scoring)
//! - `settings`: Player-facing game settings and round configuration
//! - `highscores`: In-memory leaderboard fed by finished rounds
//! - `players`: Registered player profiles
//! - `error`: Configuration, settings and registration errors

pub mod error;
pub mod highscores;
pub mod players;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, RegistrationError, SettingsError};
pub use highscores::HighScores;
pub use players::{Player, Players};
pub use settings::GameSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Base scheduler period at speed multiplier 1.0
    pub const BASE_TICK_MS: f32 = 50.0;
    /// Milliseconds per round-clock second
    pub const MS_PER_SECOND: u64 = 1000;

    /// Playfield extent (square, origin top-left)
    pub const FIELD_SIZE: f32 = 1000.0;
    /// Entities leaving past this margin on the low side are culled
    pub const FIELD_OVERSCAN: f32 = 50.0;
    /// Entity spawn area (from the origin)
    pub const ENTITY_SPAWN_WIDTH: f32 = 800.0;
    pub const ENTITY_SPAWN_HEIGHT: f32 = 600.0;
    /// Power-up spawn area, inset by the margin on every side
    pub const POWER_UP_SPAWN_WIDTH: f32 = 700.0;
    pub const POWER_UP_SPAWN_HEIGHT: f32 = 500.0;
    pub const POWER_UP_SPAWN_MARGIN: f32 = 50.0;

    /// Spawn pacing
    pub const SPAWN_BASE_DELAY_MS: f32 = 3000.0;
    pub const SPAWN_DELAY_STEP_MS: f32 = 200.0;

    /// Entity defaults
    pub const ENTITY_SIZE: f32 = 50.0;
    /// Per-axis spawn speed is uniform in [-MAX, MAX)
    pub const ENTITY_MAX_AXIS_SPEED: f32 = 2.0;
    /// Tap radius around an entity (half of the 80 unit sprite)
    pub const ENTITY_HIT_RADIUS: f32 = 40.0;
    /// Tap radius around a power-up (half of the 60 unit sprite)
    pub const POWER_UP_HIT_RADIUS: f32 = 30.0;

    /// Field effect (gravity power-up)
    pub const FIELD_EFFECT_SECONDS: u32 = 10;
    pub const FIELD_EFFECT_GAIN: f32 = 2.0;
    /// Vertical speed-up within one tick that counts as a visible reaction
    pub const REACTION_THRESHOLD: f32 = 1.0;

    /// Scoring
    pub const BENIGN_REWARD: u32 = 10;
    pub const HAZARD_PENALTY: u32 = 20;
    pub const MISS_PENALTY: u32 = 5;

    /// Valid difficulty levels
    pub const MIN_DIFFICULTY: u8 = 1;
    pub const MAX_DIFFICULTY: u8 = 10;
}

/// True when `point` lies within `radius` of `center`
#[inline]
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// True when `pos` is still inside the playfield plus its overscan margin
#[inline]
pub fn in_field(pos: Vec2) -> bool {
    use consts::{FIELD_OVERSCAN, FIELD_SIZE};
    pos.x > -FIELD_OVERSCAN && pos.x < FIELD_SIZE && pos.y > -FIELD_OVERSCAN && pos.y < FIELD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_radius_boundary() {
        let c = Vec2::new(100.0, 100.0);
        assert!(within_radius(Vec2::new(140.0, 100.0), c, 40.0));
        assert!(!within_radius(Vec2::new(140.1, 100.0), c, 40.0));
    }

    #[test]
    fn test_in_field_overscan() {
        assert!(in_field(Vec2::new(-49.0, 0.0)));
        assert!(!in_field(Vec2::new(-50.0, 0.0)));
        assert!(in_field(Vec2::new(999.0, 999.0)));
        assert!(!in_field(Vec2::new(500.0, 1000.0)));
    }
}
