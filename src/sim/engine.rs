//! Round simulation engine
//!
//! Owns every entity collection and the round state. The presentation layer
//! drives it with [`SimulationEngine::tick`] and [`SimulationEngine::tap`]
//! and only ever sees copied-out [`Snapshot`]s.

use glam::Vec2;

use super::clock::RoundClock;
use super::hit::{TapOutcome, resolve_tap};
use super::motion::MotionIntegrator;
use super::powerup::PowerUpController;
use super::rng::{PcgSource, RandomSource};
use super::score::ScoreKeeper;
use super::spawner::Spawner;
use super::state::{
    Difficulty, Entity, Phase, PowerUp, RoundConfig, RoundSummary, ScoringEvent, SimEvent,
    Snapshot,
};
use crate::error::ConfigError;

/// Called once when a round runs out of time
pub type RoundOverListener = Box<dyn FnMut(RoundSummary) + Send>;

pub struct SimulationEngine<R = PcgSource> {
    clock: RoundClock,
    spawner: Spawner<R>,
    power_ups: PowerUpController,
    score: ScoreKeeper,
    motion: MotionIntegrator,
    config: RoundConfig,
    difficulty: Difficulty,
    /// Live entities in spawn order
    entities: Vec<Entity>,
    /// Power-up waiting on the field
    field_power_up: Option<PowerUp>,
    round_over_listener: Option<RoundOverListener>,
}

impl SimulationEngine<PcgSource> {
    /// Engine over the default PCG source
    pub fn with_seed(seed: u64) -> Self {
        Self::new(PcgSource::new(seed))
    }
}

impl<R: RandomSource> SimulationEngine<R> {
    /// Idle engine drawing from `rng`
    pub fn new(rng: R) -> Self {
        let config = RoundConfig::default();
        let difficulty = Difficulty::default();
        Self {
            clock: RoundClock::new(),
            spawner: Spawner::new(rng),
            power_ups: PowerUpController::new(),
            score: ScoreKeeper::new(),
            motion: MotionIntegrator::new(&config, difficulty),
            config,
            difficulty,
            entities: Vec::new(),
            field_power_up: None,
            round_over_listener: None,
        }
    }

    /// Register the round-over hand-off, replacing any previous listener
    pub fn on_round_over(&mut self, listener: impl FnMut(RoundSummary) + Send + 'static) {
        self.round_over_listener = Some(Box::new(listener));
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.clock.phase()
    }

    /// Score of the current (or just finished) round
    pub fn score(&self) -> u32 {
        self.score.score()
    }

    /// Whole seconds left on the round clock
    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining_seconds()
    }

    /// Parameters of the last accepted round
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Difficulty of the last accepted round
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Validate the round parameters, clear everything and enter `Running`.
    ///
    /// Starting over a round that is still running abandons it without
    /// firing the round-over listener.
    pub fn start(&mut self, config: RoundConfig, difficulty: u8) -> Result<(), ConfigError> {
        let difficulty = Difficulty::new(difficulty)
            .and_then(|d| config.validate().map(|()| d))
            .inspect_err(|e| log::warn!("Round start rejected: {e}"))?;

        self.clear_round();
        self.config = config;
        self.difficulty = difficulty;
        self.motion = MotionIntegrator::new(&config, difficulty);
        self.clock.start(config.round_duration_seconds);

        log::info!(
            "Round started: {}s, difficulty {} ({}), speed x{}",
            config.round_duration_seconds,
            difficulty.level(),
            difficulty.tier().as_str(),
            config.speed_multiplier
        );
        Ok(())
    }

    /// Discard the round and return to `Idle`
    pub fn restart(&mut self) {
        self.clear_round();
        log::info!("Round reset");
    }

    /// Freeze the round; no-op unless `Running`
    pub fn pause(&mut self) {
        if self.clock.pause() {
            log::info!("Round paused at {}s", self.clock.remaining_seconds());
        }
    }

    /// Continue a paused round
    pub fn resume(&mut self) {
        if self.clock.resume() {
            log::info!("Round resumed at {}s", self.clock.remaining_seconds());
        }
    }

    /// Advance the round by `elapsed_ms` of real time.
    ///
    /// Each completed second counts down the round and the field effect.
    /// If the round ends during this tick nothing else is simulated.
    /// A no-op outside `Running`.
    pub fn tick(&mut self, elapsed_ms: u32, acceleration: Vec2) -> Snapshot {
        let mut events = Vec::new();
        if !self.clock.is_running() {
            return self.snapshot_with(events);
        }

        let seconds = self.clock.accumulate(elapsed_ms);
        for _ in 0..seconds {
            self.power_ups.tick_second(&mut self.entities, &mut events);
            if self.clock.count_down() {
                self.finish_round(&mut events);
                return self.snapshot_with(events);
            }
        }

        let now = self.clock.now_ms();
        let occupied = self.field_power_up.is_some() || self.power_ups.is_active();
        if let Some(power_up) = self.spawner.maybe_spawn_power_up(
            now,
            &self.config,
            self.power_ups.last_activation_ms(),
            occupied,
        ) {
            events.push(SimEvent::PowerUpSpawned { id: power_up.id });
            self.field_power_up = Some(power_up);
        }

        if let Some(mut entity) = self.spawner.maybe_spawn_entity(
            now,
            &self.config,
            self.difficulty,
            self.entities.len(),
        ) {
            self.power_ups.on_spawn(&mut entity);
            events.push(SimEvent::EntitySpawned {
                id: entity.id,
                kind: entity.kind,
            });
            self.entities.push(entity);
        }

        self.motion.advance(
            &mut self.entities,
            self.power_ups.is_active(),
            acceleration,
            &mut events,
        );

        self.snapshot_with(events)
    }

    /// Resolve a tap at `point`. Returns `None` outside `Running`.
    pub fn tap(&mut self, point: Vec2) -> Option<ScoringEvent> {
        if !self.clock.is_running() {
            return None;
        }

        let outcome = resolve_tap(point, &mut self.field_power_up, &mut self.entities);
        let event = outcome.scoring_event();
        if let TapOutcome::PowerUp(power_up) = outcome {
            self.power_ups
                .activate(power_up, self.clock.now_ms(), &mut self.entities);
        }
        let score = self.score.apply(event);
        log::debug!("Tap at {point:?}: {event:?}, score {score}");
        Some(event)
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(Vec::new())
    }

    fn snapshot_with(&self, events: Vec<SimEvent>) -> Snapshot {
        Snapshot {
            entities: self.entities.clone(),
            power_up: self.field_power_up.clone(),
            score: self.score.score(),
            remaining_seconds: self.clock.remaining_seconds(),
            phase: self.clock.phase(),
            field_effect_active: self.power_ups.is_active(),
            field_effect_remaining_seconds: self.power_ups.remaining_seconds(),
            events,
        }
    }

    fn clear_round(&mut self) {
        self.clock.reset();
        self.spawner.reset();
        self.power_ups.reset();
        self.score.reset();
        self.entities.clear();
        self.field_power_up = None;
    }

    fn finish_round(&mut self, events: &mut Vec<SimEvent>) {
        let summary = RoundSummary {
            final_score: self.score.score(),
            duration_seconds: self.config.round_duration_seconds,
        };
        self.entities.clear();
        self.field_power_up = None;
        self.power_ups.reset();

        events.push(SimEvent::RoundOver {
            final_score: summary.final_score,
        });
        log::info!("Round over, final score {}", summary.final_score);
        if let Some(listener) = self.round_over_listener.as_mut() {
            listener(summary);
        }
    }
}
