//! Round state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Lifecycle phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No round in progress
    #[default]
    Idle,
    /// Clock running, entities moving
    Running,
    /// Round suspended, state kept
    Paused,
    /// Clock ran out
    Over,
}

impl Phase {
    /// Entities and power-ups only exist in these phases
    pub fn has_field(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

/// Target kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Plain beetle, rewards the tap
    Benign,
    /// Poisonous beetle, penalizes the tap
    Hazard,
}

/// A moving target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: EntityKind,
    /// Responds to the field effect while it is active
    pub affected: bool,
    /// One-shot reaction cue already fired for the current activation
    pub has_reacted: bool,
    pub size: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            kind,
            affected: false,
            has_reacted: false,
            size: ENTITY_SIZE,
        }
    }

    pub fn hit_radius(&self) -> f32 {
        ENTITY_HIT_RADIUS
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Makes entities respond to the external acceleration input
    FieldEffect,
}

/// A power-up, on the field (`active == false`) or consumed and in effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub active: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            kind,
            active: false,
        }
    }

    pub fn hit_radius(&self) -> f32 {
        POWER_UP_HIT_RADIUS
    }
}

/// Hazard odds bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }

    /// Chance (percent) that a spawned entity is a hazard
    pub fn hazard_percent(&self) -> u32 {
        match self {
            DifficultyTier::Easy => 10,
            DifficultyTier::Medium => 20,
            DifficultyTier::Hard => 30,
        }
    }
}

/// Validated difficulty level in `1..=10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ConfigError::DifficultyOutOfRange(level))
        }
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn tier(self) -> DifficultyTier {
        match self.0 {
            0..=3 => DifficultyTier::Easy,
            4..=6 => DifficultyTier::Medium,
            _ => DifficultyTier::Hard,
        }
    }

    /// Motion scale: 0.5 at level 1, +0.25 per level
    pub fn speed_factor(self) -> f32 {
        0.5 + f32::from(self.0 - 1) * 0.25
    }

    /// Minimum gap between spawns before the speed multiplier is applied
    pub fn base_spawn_delay_ms(self) -> f32 {
        SPAWN_BASE_DELAY_MS - f32::from(self.0 - 1) * SPAWN_DELAY_STEP_MS
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// Per-round parameters, fixed once the round starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Global speed multiplier (> 0)
    pub speed_multiplier: f32,
    /// Entity cap (>= 1)
    pub max_entities: u32,
    /// Seconds between power-up appearances (>= 1)
    pub power_up_interval_seconds: u32,
    /// Round length in seconds (>= 1)
    pub round_duration_seconds: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            max_entities: 10,
            power_up_interval_seconds: 30,
            round_duration_seconds: 60,
        }
    }
}

impl RoundConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed_multiplier.is_finite() && self.speed_multiplier > 0.0) {
            return Err(ConfigError::InvalidSpeedMultiplier(self.speed_multiplier));
        }
        if self.max_entities == 0 {
            return Err(ConfigError::InvalidMaxEntities(self.max_entities));
        }
        if self.power_up_interval_seconds == 0 {
            return Err(ConfigError::InvalidPowerUpInterval(
                self.power_up_interval_seconds,
            ));
        }
        if self.round_duration_seconds == 0 {
            return Err(ConfigError::InvalidRoundDuration(self.round_duration_seconds));
        }
        Ok(())
    }

    /// Nominal scheduler period for this round
    pub fn tick_period_ms(&self) -> f32 {
        BASE_TICK_MS / self.speed_multiplier
    }

    /// Minimum delay between entity spawns at `difficulty`
    pub fn spawn_delay_ms(&self, difficulty: Difficulty) -> f32 {
        difficulty.base_spawn_delay_ms() / self.speed_multiplier
    }

    pub fn power_up_interval_ms(&self) -> u64 {
        u64::from(self.power_up_interval_seconds) * MS_PER_SECOND
    }
}

/// Result of resolving one tap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringEvent {
    EntityHit(EntityKind),
    PowerUpCollected,
    Miss,
}

/// Things that happened during a tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    EntitySpawned { id: u32, kind: EntityKind },
    PowerUpSpawned { id: u32 },
    /// First visible speed-up of an affected entity under the field effect
    EntityReacted { id: u32 },
    /// Entity left the field on its own
    EntityEscaped { id: u32 },
    FieldEffectExpired,
    RoundOver { final_score: u32 },
}

/// Hand-off to the score repository when a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub final_score: u32,
    pub duration_seconds: u32,
}

/// Immutable copy of the simulation for rendering
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub entities: Vec<Entity>,
    /// Power-up waiting on the field, if any
    pub power_up: Option<PowerUp>,
    pub score: u32,
    pub remaining_seconds: u32,
    pub phase: Phase,
    pub field_effect_active: bool,
    pub field_effect_remaining_seconds: u32,
    /// Events produced by the call that returned this snapshot
    pub events: Vec<SimEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert!(Difficulty::new(0).is_err());
        assert!(Difficulty::new(1).is_ok());
        assert!(Difficulty::new(10).is_ok());
        assert_eq!(
            Difficulty::new(11),
            Err(ConfigError::DifficultyOutOfRange(11))
        );
    }

    #[test]
    fn test_difficulty_tiers() {
        let tier = |l| Difficulty::new(l).unwrap().tier().hazard_percent();
        assert_eq!(tier(1), 10);
        assert_eq!(tier(3), 10);
        assert_eq!(tier(4), 20);
        assert_eq!(tier(6), 20);
        assert_eq!(tier(7), 30);
        assert_eq!(tier(10), 30);
    }

    #[test]
    fn test_speed_factor_and_delay() {
        let d1 = Difficulty::new(1).unwrap();
        let d5 = Difficulty::new(5).unwrap();
        assert!((d1.speed_factor() - 0.5).abs() < 1e-6);
        assert!((d5.speed_factor() - 1.5).abs() < 1e-6);
        assert!((d1.base_spawn_delay_ms() - 3000.0).abs() < 1e-3);
        assert!((d5.base_spawn_delay_ms() - 2200.0).abs() < 1e-3);

        let config = RoundConfig {
            speed_multiplier: 2.0,
            ..Default::default()
        };
        assert!((config.spawn_delay_ms(d5) - 1100.0).abs() < 1e-3);
        assert!((config.tick_period_ms() - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_config_validation() {
        assert!(RoundConfig::default().validate().is_ok());

        let bad = |c: RoundConfig| c.validate().unwrap_err();
        assert!(matches!(
            bad(RoundConfig { speed_multiplier: 0.0, ..Default::default() }),
            ConfigError::InvalidSpeedMultiplier(_)
        ));
        assert!(matches!(
            bad(RoundConfig { speed_multiplier: f32::NAN, ..Default::default() }),
            ConfigError::InvalidSpeedMultiplier(_)
        ));
        assert_eq!(
            bad(RoundConfig { max_entities: 0, ..Default::default() }),
            ConfigError::InvalidMaxEntities(0)
        );
        assert_eq!(
            bad(RoundConfig { power_up_interval_seconds: 0, ..Default::default() }),
            ConfigError::InvalidPowerUpInterval(0)
        );
        assert_eq!(
            bad(RoundConfig { round_duration_seconds: 0, ..Default::default() }),
            ConfigError::InvalidRoundDuration(0)
        );
    }

    #[test]
    fn test_difficulty_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Difficulty>("4").is_ok());
        assert!(serde_json::from_str::<Difficulty>("12").is_err());
    }
}
