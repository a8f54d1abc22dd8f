//! High score leaderboard
//!
//! In-memory score repository fed by the round-over hand-off. The engine
//! only reports the final score; the registered player and difficulty are
//! attached here.

use serde::{Deserialize, Serialize};

use crate::players::{Player, PlayerId};
use crate::sim::RoundSummary;

/// Size of the top-scores view
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Registration id of the player
    pub player_id: PlayerId,
    /// Player's name at the time of the round
    pub player_name: String,
    pub score: u32,
    /// Difficulty level the round was played at
    pub difficulty: u8,
    /// Configured round length
    pub round_seconds: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: u64,
}

/// All recorded scores, kept sorted best first (newest first on ties)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of recorded rounds
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a finished round. Returns its overall rank (1-indexed).
    pub fn submit(
        &mut self,
        player: &Player,
        difficulty: u8,
        summary: RoundSummary,
        timestamp_ms: u64,
    ) -> usize {
        let entry = HighScoreEntry {
            player_id: player.id,
            player_name: player.full_name.clone(),
            score: summary.final_score,
            difficulty,
            round_seconds: summary.duration_seconds,
            timestamp_ms,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| Self::ranks_before(&entry, e))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        log::info!(
            "Recorded score {} for {} (rank {})",
            summary.final_score,
            player.full_name,
            pos + 1
        );
        pos + 1
    }

    /// Score descending, then newest first
    fn ranks_before(a: &HighScoreEntry, b: &HighScoreEntry) -> bool {
        (a.score, a.timestamp_ms) > (b.score, b.timestamp_ms)
    }

    /// Best `limit` scores across all difficulties
    pub fn top(&self, limit: usize) -> &[HighScoreEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Best `limit` scores at one difficulty
    pub fn top_by_difficulty(&self, difficulty: u8, limit: usize) -> Vec<&HighScoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.difficulty == difficulty)
            .take(limit)
            .collect()
    }

    /// A player's best entry
    pub fn best_for(&self, player: PlayerId) -> Option<&HighScoreEntry> {
        self.entries.iter().find(|e| e.player_id == player)
    }

    /// Every round a player recorded, best first
    pub fn scores_for(&self, player: PlayerId) -> Vec<&HighScoreEntry> {
        self.entries.iter().filter(|e| e.player_id == player).collect()
    }

    /// Check if a score would make the top-10 view
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .get(MAX_HIGH_SCORES - 1)
            .map(|e| score > e.score)
            .unwrap_or(true)
    }

    /// Rank a new score would reach in the top-10 view (1-indexed)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        // A new entry is the newest, so it wins ties
        let rank = self.entries.iter().position(|e| score >= e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// The top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
