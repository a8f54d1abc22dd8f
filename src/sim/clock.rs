//! Round clock and lifecycle state machine
//!
//! `Idle -> Running <-> Paused -> Over -> Idle`. Time only advances while
//! `Running`, and only by the elapsed durations handed to [`RoundClock::accumulate`].

use serde::{Deserialize, Serialize};

use super::state::Phase;
use crate::consts::MS_PER_SECOND;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundClock {
    phase: Phase,
    remaining_seconds: u32,
    /// Round time in milliseconds (monotonic, excludes paused time)
    now_ms: u64,
    /// Milliseconds accumulated toward the next whole second
    carry_ms: u64,
}

impl RoundClock {
    /// Idle clock with nothing on it
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Begin a fresh round of `duration_seconds`
    pub fn start(&mut self, duration_seconds: u32) {
        self.phase = Phase::Running;
        self.remaining_seconds = duration_seconds;
        self.now_ms = 0;
        self.carry_ms = 0;
    }

    /// `Running -> Paused`; returns whether the phase changed
    pub fn pause(&mut self) -> bool {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            true
        } else {
            false
        }
    }

    /// `Paused -> Running`; returns whether the phase changed
    pub fn resume(&mut self) -> bool {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            true
        } else {
            false
        }
    }

    /// Back to `Idle` with everything cleared
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add elapsed time while running. Returns the number of whole seconds
    /// that completed; the caller counts each one down.
    pub fn accumulate(&mut self, elapsed_ms: u32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let elapsed = u64::from(elapsed_ms);
        self.now_ms += elapsed;
        self.carry_ms += elapsed;
        let seconds = self.carry_ms / MS_PER_SECOND;
        self.carry_ms %= MS_PER_SECOND;
        u32::try_from(seconds).unwrap_or(u32::MAX)
    }

    /// Count down one second. Returns true when this second ended the round.
    pub fn count_down(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = Phase::Over;
            return true;
        }
        false
    }
}
