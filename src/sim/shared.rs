//! Thread-safe engine handle
//!
//! Scheduler ticks and input taps may arrive on different threads. Every
//! call goes through one mutex, so a tap never observes a half-applied tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use super::engine::SimulationEngine;
use super::rng::{PcgSource, RandomSource};
use super::state::{RoundConfig, ScoringEvent, Snapshot};
use crate::error::ConfigError;

pub struct SharedEngine<R = PcgSource> {
    inner: Arc<Mutex<SimulationEngine<R>>>,
}

impl<R> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RandomSource> SharedEngine<R> {
    pub fn new(engine: SimulationEngine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Engine state is consistent between calls, so a panic in another
    /// holder leaves nothing half-written; recover the guard.
    fn lock(&self) -> MutexGuard<'_, SimulationEngine<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<T>(&self, f: impl FnOnce(&mut SimulationEngine<R>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn start(&self, config: RoundConfig, difficulty: u8) -> Result<(), ConfigError> {
        self.lock().start(config, difficulty)
    }

    pub fn tick(&self, elapsed_ms: u32, acceleration: Vec2) -> Snapshot {
        self.lock().tick(elapsed_ms, acceleration)
    }

    pub fn tap(&self, point: Vec2) -> Option<ScoringEvent> {
        self.lock().tap(point)
    }

    pub fn pause(&self) {
        self.lock().pause();
    }

    pub fn resume(&self) {
        self.lock().resume();
    }

    pub fn restart(&self) {
        self.lock().restart();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }
}
