//! Keeper Catch - goalkeeper mini-game core
//!
//! Core modules:
//! - `round`: Deterministic round logic (throws, trajectories, catches, scoring)
//! - `input`: Keeper position sources (fixed, shared cell, device orientation)
//! - `clock`: Monotonic millisecond clocks
//! - `present`: Presentation sinks (HUD text, sound/confetti cues)
//! - `settings`: Persisted game configuration
//! - `highscores`: Best-round leaderboard
//! - `platform`: Browser bindings (wasm32 only)

pub mod clock;
pub mod error;
pub mod highscores;
pub mod input;
pub mod platform;
pub mod present;
pub mod round;
pub mod settings;

pub use error::{GameError, Result};
pub use highscores::BestRounds;
pub use round::{RoundConfig, RoundController, RoundStatus};
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Throws per round
    pub const THROWS_PER_ROUND: u32 = 10;
    /// Time between throw launches (ms)
    pub const THROW_INTERVAL_MS: f64 = 3000.0;
    /// Flight time of a single throw (ms)
    pub const THROW_DURATION_MS: f64 = 1150.0;
    /// Ball-to-glove distance that counts as a catch (scene units)
    pub const CATCH_RADIUS: f32 = 1.8;

    /// Where the ball sits before each throw (in front of the camera)
    pub const BALL_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, -10.0);
    /// Glove position before any input arrives
    pub const KEEPER_DEFAULT: Vec3 = Vec3::new(0.0, 0.0, -5.0);

    /// Sideways glove reach driven by orientation input
    pub const KEEPER_REACH_X: f32 = 4.0;
    /// Vertical glove reach driven by orientation input
    pub const KEEPER_REACH_Y: f32 = 2.0;
    /// Device tilt (degrees) that maps to full reach
    pub const FULL_TILT_DEGREES: f32 = 45.0;
    /// Face anchor offset (scene units) that reaches full glove travel
    pub const FULL_FACE_OFFSET: f32 = 0.25;
}

/// Linear interpolation between two points
#[inline]
pub fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Map a value in [-range, range] onto [-1, 1], clamping outside values
#[inline]
pub fn normalize_tilt(value: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 0.0;
    }
    (value / range).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp3_endpoints() {
        let a = Vec3::new(0.0, 0.0, -10.0);
        let b = Vec3::new(2.0, 1.0, 5.0);
        assert_eq!(lerp3(a, b, 0.0), a);
        assert_eq!(lerp3(a, b, 1.0), b);
        let mid = lerp3(a, b, 0.5);
        assert!((mid - Vec3::new(1.0, 0.5, -2.5)).length() < 1e-6);
    }

    #[test]
    fn test_normalize_tilt_clamps() {
        assert_eq!(normalize_tilt(90.0, 45.0), 1.0);
        assert_eq!(normalize_tilt(-90.0, 45.0), -1.0);
        assert!((normalize_tilt(22.5, 45.0) - 0.5).abs() < 1e-6);
        assert_eq!(normalize_tilt(10.0, 0.0), 0.0);
    }
}
