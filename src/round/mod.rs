//! Deterministic round module
//!
//! All scoring logic lives here. This module must stay pure and deterministic:
//! - Time only arrives through `tick(now_ms)`
//! - Randomness only through an injected `RandomSource`
//! - No rendering, audio or DOM dependencies

pub mod config;
pub mod controller;
pub mod easing;
pub mod random;
pub mod state;
pub mod throw;

pub use config::{AxisRange, RoundConfig, TargetBounds};
pub use controller::RoundController;
pub use easing::Easing;
pub use random::{RandomSource, Scripted, seeded};
pub use state::{CatchEvent, RoundEvent, RoundState, RoundStatus, ThrowResolved};
pub use throw::Throw;
