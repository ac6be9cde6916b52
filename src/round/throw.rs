//! A single ball trajectory

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::easing::Easing;
use crate::lerp3;

/// One scheduled ball flight. Immutable once launched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    /// 0-based position within the round
    pub index: u32,
    pub start: Vec3,
    pub target: Vec3,
    pub duration_ms: f64,
    /// Round-clock time of launch (ms of unpaused play)
    pub started_at_ms: f64,
}

impl Throw {
    /// Normalized progress in [0, 1]
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Ball position along the trajectory. Never passes the target.
    pub fn position_at(&self, now_ms: f64, easing: &Easing) -> Vec3 {
        let t = easing.apply(self.progress(now_ms));
        if t >= 1.0 {
            return self.target;
        }
        lerp3(self.start, self.target, t)
    }

    /// True once the nominal flight time has elapsed
    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_throw() -> Throw {
        Throw {
            index: 0,
            start: Vec3::new(0.0, 0.0, -10.0),
            target: Vec3::new(2.0, 1.0, 5.0),
            duration_ms: 1000.0,
            started_at_ms: 500.0,
        }
    }

    #[test]
    fn test_progress_clamps() {
        let t = sample_throw();
        assert_eq!(t.progress(0.0), 0.0);
        assert_eq!(t.progress(500.0), 0.0);
        assert!((t.progress(1000.0) - 0.5).abs() < 1e-6);
        assert_eq!(t.progress(10_000.0), 1.0);
    }

    #[test]
    fn test_no_overshoot_past_target() {
        let t = sample_throw();
        assert_eq!(t.position_at(1_000_000.0, &Easing::Linear), t.target);
        assert_eq!(t.position_at(1_000_000.0, &Easing::QuadOut), t.target);
        assert!(t.is_finished(1500.0));
        assert!(!t.is_finished(1499.0));
    }

    #[test]
    fn test_midpoint_linear_vs_eased() {
        let t = sample_throw();
        let linear = t.position_at(1000.0, &Easing::Linear);
        assert!((linear - Vec3::new(1.0, 0.5, -2.5)).length() < 1e-5);
        let eased = t.position_at(1000.0, &Easing::QuadOut);
        // 75% of the way along
        assert!((eased - Vec3::new(1.5, 0.75, 1.25)).length() < 1e-5);
    }
}
