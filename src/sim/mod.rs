//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only by caller-supplied elapsed durations
//! - Seeded RNG only, injected at construction
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering, sensor or audio dependencies

pub mod clock;
pub mod engine;
pub mod hit;
pub mod motion;
pub mod powerup;
pub mod rng;
pub mod score;
pub mod shared;
pub mod spawner;
pub mod state;

pub use clock::RoundClock;
pub use engine::{RoundOverListener, SimulationEngine};
pub use hit::{TapOutcome, resolve_tap};
pub use motion::MotionIntegrator;
pub use powerup::PowerUpController;
pub use rng::{PcgSource, RandomSource};
pub use score::ScoreKeeper;
pub use shared::SharedEngine;
pub use spawner::Spawner;
pub use state::{
    Difficulty, DifficultyTier, Entity, EntityKind, Phase, PowerUp, PowerUpKind, RoundConfig,
    RoundSummary, ScoringEvent, SimEvent, Snapshot,
};
