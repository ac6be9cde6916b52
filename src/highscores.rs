//! Best-round leaderboard
//!
//! Persisted to LocalStorage in the browser and to a JSON file natively,
//! tracks the top 10 rounds by save ratio.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum number of rounds to keep
pub const MAX_BEST_ROUNDS: usize = 10;

/// A finished round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Balls saved
    pub score: u32,
    /// Balls thrown
    pub throws_total: u32,
    /// Unix timestamp (ms) when played
    pub timestamp: f64,
}

impl RoundRecord {
    /// Fraction of throws saved, 0.0 - 1.0
    pub fn save_ratio(&self) -> f32 {
        if self.throws_total == 0 {
            0.0
        } else {
            self.score as f32 / self.throws_total as f32
        }
    }

    /// Ordering for the board: better ratio first, then more saves
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .save_ratio()
            .partial_cmp(&self.save_ratio())
            .unwrap_or(Ordering::Equal)
            .then(other.score.cmp(&self.score))
    }
}

/// Best-round leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestRounds {
    pub entries: Vec<RoundRecord>,
}

impl BestRounds {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "keeper_catch_best_rounds";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a round would make the board
    pub fn qualifies(&self, score: u32, throws_total: u32) -> bool {
        if score == 0 || throws_total == 0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_ROUNDS {
            return true;
        }
        let candidate = RoundRecord {
            score,
            throws_total,
            timestamp: 0.0,
        };
        self.entries
            .last()
            .map(|e| candidate.rank_cmp(e) == Ordering::Less)
            .unwrap_or(true)
    }

    /// Add a round (if it qualifies). Returns the 1-indexed rank achieved.
    pub fn add_round(&mut self, score: u32, throws_total: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score, throws_total) {
            return None;
        }

        let record = RoundRecord {
            score,
            throws_total,
            timestamp,
        };

        // Ties keep the older round ahead
        let pos = self
            .entries
            .iter()
            .position(|e| record.rank_cmp(e) == Ordering::Less);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_BEST_ROUNDS);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best round (if any)
    pub fn top(&self) -> Option<&RoundRecord> {
        self.entries.first()
    }

    /// Load the board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<BestRounds>(&json) {
                    log::info!("Loaded {} best rounds", board.entries.len());
                    return board;
                }
            }
        }

        log::info!("No best rounds found, starting fresh");
        Self::new()
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best rounds saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Load the board from a JSON file. A missing file means an empty board.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let board: BestRounds = serde_json::from_str(&json)?;
                log::info!("Loaded {} best rounds from {}", board.entries.len(), path.display());
                Ok(board)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No best rounds at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write the board as JSON
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path.as_ref(), serde_json::to_string_pretty(self)?)?;
        log::info!(
            "Best rounds saved to {} ({} entries)",
            path.as_ref().display(),
            self.entries.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let board = BestRounds::new();
        assert!(!board.qualifies(0, 10));
        assert!(board.qualifies(1, 10));
    }

    #[test]
    fn test_ranked_by_ratio_then_score() {
        let mut board = BestRounds::new();
        assert_eq!(board.add_round(5, 10, 1.0), Some(1));
        assert_eq!(board.add_round(3, 3, 2.0), Some(1));
        assert_eq!(board.add_round(8, 10, 3.0), Some(2));
        assert_eq!(board.add_round(1, 1, 4.0), Some(2));
        let scores: Vec<_> = board.entries.iter().map(|e| (e.score, e.throws_total)).collect();
        assert_eq!(scores, vec![(3, 3), (1, 1), (8, 10), (5, 10)]);
        assert_eq!(board.top().map(|e| e.score), Some(3));
    }

    #[test]
    fn test_full_board_trims() {
        let mut board = BestRounds::new();
        for i in 0..MAX_BEST_ROUNDS {
            board.add_round(5, 10, i as f64);
        }
        assert!(!board.qualifies(5, 10));
        assert!(!board.qualifies(4, 10));
        assert_eq!(board.add_round(6, 10, 99.0), Some(1));
        assert_eq!(board.entries.len(), MAX_BEST_ROUNDS);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("keeper_catch_best_{}.json", std::process::id()));
        let mut board = BestRounds::load_from(&path).unwrap();
        assert!(board.is_empty());
        board.add_round(3, 10, 1.0);
        board.save_to(&path).unwrap();

        let mut loaded = BestRounds::load_from(&path).unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.top().map(|e| e.score), Some(3));
        // A later, weaker round ranks behind the stored one
        assert_eq!(loaded.add_round(2, 10, 2.0), Some(2));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_corrupt_board_is_configuration_error() {
        let path = std::env::temp_dir().join(format!("keeper_catch_best_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{ entries: oops").unwrap();
        let err = BestRounds::load_from(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, crate::error::GameError::Configuration(_)));
    }
}
