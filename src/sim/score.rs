//! Round score bookkeeping

use super::state::{EntityKind, ScoringEvent};
use crate::consts::{BENIGN_REWARD, HAZARD_PENALTY, MISS_PENALTY};

/// Score for the current round. Unsigned, penalties saturate at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
}

impl ScoreKeeper {
    /// Start at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Apply a scoring event and return the new score
    pub fn apply(&mut self, event: ScoringEvent) -> u32 {
        self.score = match event {
            ScoringEvent::EntityHit(EntityKind::Benign) => self.score.saturating_add(BENIGN_REWARD),
            ScoringEvent::EntityHit(EntityKind::Hazard) => self.score.saturating_sub(HAZARD_PENALTY),
            ScoringEvent::Miss => self.score.saturating_sub(MISS_PENALTY),
            ScoringEvent::PowerUpCollected => self.score,
        };
        self.score
    }
}
