//! High score tracking
//!
//! Keeps the best score ever reached (updated as games are played, so it
//! survives a restart mid-game) and the top 10 finished games.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::persistence::{KeyValueStore, load_json, save_json};
use crate::sim::GameState;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Largest tile on the board
    pub highest_tile: u32,
    /// Board edge length
    pub board_size: usize,
    /// Committed moves
    pub moves: u32,
}

impl HighScoreEntry {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            highest_tile: state.grid.highest_tile(),
            board_size: state.grid.size(),
            moves: state.moves,
        }
    }
}

/// High score record and leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Best score seen in any game, finished or not
    #[serde(default)]
    pub best: u64,
    /// Finished games, sorted descending by score
    #[serde(default)]
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Store key
    pub const STORAGE_KEY: &'static str = "highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the best score if `score` beats it; returns true if it did
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Best score across the record and the leaderboard
    pub fn best(&self) -> u64 {
        self.best.max(self.top_score().unwrap_or(0))
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished game to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_entry(&mut self, entry: HighScoreEntry) -> Option<usize> {
        self.record(entry.score);
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top finished score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh when missing or unreadable
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<Self, S>(store, Self::STORAGE_KEY) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} high scores (best {})", scores.entries.len(), scores.best());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring stored high scores: {e}");
                Self::new()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::debug!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            highest_tile: 256,
            board_size: 4,
            moves: 100,
        }
    }

    #[test]
    fn test_record_keeps_max() {
        let mut scores = HighScores::new();
        assert!(scores.record(100));
        assert!(!scores.record(40));
        assert!(scores.record(120));
        assert_eq!(scores.best(), 120);
    }

    #[test]
    fn test_add_entry_sorted_and_ranked() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_entry(entry(500)), Some(1));
        assert_eq!(scores.add_entry(entry(900)), Some(1));
        assert_eq!(scores.add_entry(entry(700)), Some(2));
        let order: Vec<_> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![900, 700, 500]);
        assert_eq!(scores.top_score(), Some(900));
        assert_eq!(scores.best(), 900);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_entry(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_leaderboard_is_capped() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_entry(entry(i * 100));
        }
        assert!(!scores.qualifies(50));
        assert_eq!(scores.potential_rank(50), None);
        assert_eq!(scores.potential_rank(550), Some(6));
        assert_eq!(scores.add_entry(entry(2000)), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(200));
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScores::load(&store), HighScores::new());

        let mut scores = HighScores::new();
        scores.record(1234);
        scores.add_entry(entry(800));
        scores.save(&mut store).unwrap();
        let loaded = HighScores::load(&store);
        assert_eq!(loaded, scores);
        assert_eq!(loaded.best(), 1234);
    }
}
