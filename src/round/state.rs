//! Round state and the events it produces

use serde::{Deserialize, Serialize};

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round started yet (or reset)
    #[default]
    Idle,
    /// Throws are being scheduled and animated
    Running,
    /// Clock frozen; no launches, no ball movement
    Paused,
    /// All throws resolved (or the round was stopped)
    Complete,
}

impl RoundStatus {
    /// Running or Paused
    pub fn is_active(&self) -> bool {
        matches!(self, RoundStatus::Running | RoundStatus::Paused)
    }
}

/// Score and progress of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub throws_remaining: u32,
    pub throws_total: u32,
    pub score: u32,
    pub status: RoundStatus,
}

impl RoundState {
    pub fn new(throws_total: u32) -> Self {
        Self {
            throws_remaining: throws_total,
            throws_total,
            score: 0,
            status: RoundStatus::Running,
        }
    }

    /// Throws already resolved
    pub fn throws_resolved(&self) -> u32 {
        self.throws_total - self.throws_remaining
    }

    /// Throws that got past the keeper
    pub fn goals_conceded(&self) -> u32 {
        self.throws_resolved() - self.score
    }
}

/// A ball reached the keeper before its flight ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatchEvent {
    pub throw_index: u32,
    pub distance_at_catch: f32,
}

/// Outcome of a throw, delivered once per throw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowResolved {
    pub throw_index: u32,
    /// Saved by the keeper (false = goal)
    pub caught: bool,
    /// Ball-to-keeper distance at resolution
    pub distance: f32,
}

/// Everything presentation sinks are told about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    RoundStarted { throws_total: u32 },
    ThrowLaunched { throw_index: u32 },
    ThrowResolved(ThrowResolved),
    Paused,
    Resumed,
    RoundComplete { score: u32, throws_total: u32 },
    /// Round ended early via `stop()`
    RoundStopped { score: u32 },
}
