//! Round parameters and target bounds

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::easing::Easing;
use super::random::RandomSource;
use crate::consts::*;
use crate::error::{GameError, Result};

/// Closed range on a single axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range pinned to one value
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    /// Map a unit sample onto the range
    #[inline]
    pub fn sample(&self, u: f32) -> f32 {
        self.min + (self.max - self.min) * u.clamp(0.0, 1.0)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Box that throw targets are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBounds {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl Default for TargetBounds {
    fn default() -> Self {
        // Glove reach around the keeper plane
        Self {
            x: AxisRange::new(-KEEPER_REACH_X, KEEPER_REACH_X),
            y: AxisRange::new(-KEEPER_REACH_Y, KEEPER_REACH_Y),
            z: AxisRange::fixed(KEEPER_DEFAULT.z),
        }
    }
}

impl TargetBounds {
    /// Draw a target, one independent sample per axis (x, then y, then z)
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Vec3 {
        let x = self.x.sample(rng.next_unit());
        let y = self.y.sample(rng.next_unit());
        let z = self.z.sample(rng.next_unit());
        Vec3::new(x, y, z)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}

/// Parameters of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Throws in the round
    pub throws_total: u32,
    /// Cadence of throw launches (ms)
    pub interval_ms: f64,
    /// Flight time from launch to target (ms)
    pub throw_duration_ms: f64,
    /// Ball-to-keeper distance that counts as a catch
    pub catch_radius: f32,
    pub target_bounds: TargetBounds,
    /// Where every throw starts
    pub launch_origin: Vec3,
    pub easing: Easing,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            throws_total: THROWS_PER_ROUND,
            interval_ms: THROW_INTERVAL_MS,
            throw_duration_ms: THROW_DURATION_MS,
            catch_radius: CATCH_RADIUS,
            target_bounds: TargetBounds::default(),
            launch_origin: BALL_ORIGIN,
            easing: Easing::Linear,
        }
    }
}

impl RoundConfig {
    /// Reject parameters the round cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.throws_total == 0 {
            return Err(GameError::Configuration(
                "throws_total must be at least 1".into(),
            ));
        }
        if !(self.interval_ms.is_finite() && self.interval_ms > 0.0) {
            return Err(GameError::Configuration(format!(
                "interval_ms must be positive, got {}",
                self.interval_ms
            )));
        }
        if !(self.throw_duration_ms.is_finite() && self.throw_duration_ms > 0.0) {
            return Err(GameError::Configuration(format!(
                "throw_duration_ms must be positive, got {}",
                self.throw_duration_ms
            )));
        }
        if !(self.catch_radius.is_finite() && self.catch_radius > 0.0) {
            return Err(GameError::Configuration(format!(
                "catch_radius must be positive, got {}",
                self.catch_radius
            )));
        }
        let bounds = &self.target_bounds;
        for (axis, range) in [("x", bounds.x), ("y", bounds.y), ("z", bounds.z)] {
            if !range.is_valid() {
                return Err(GameError::Configuration(format!(
                    "target_bounds.{axis} must be finite with min <= max, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        if !self.launch_origin.is_finite() {
            return Err(GameError::Configuration(
                "launch_origin must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::random::Scripted;

    #[test]
    fn test_default_is_valid() {
        let config = RoundConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.throws_total, 10);
    }

    #[test]
    fn test_rejects_non_positive() {
        let cases: [fn(&mut RoundConfig); 5] = [
            |c| c.throws_total = 0,
            |c| c.interval_ms = 0.0,
            |c| c.throw_duration_ms = -5.0,
            |c| c.catch_radius = 0.0,
            |c| c.interval_ms = f64::NAN,
        ];
        for mutate in cases {
            let mut config = RoundConfig::default();
            mutate(&mut config);
            assert!(matches!(
                config.validate(),
                Err(GameError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut config = RoundConfig::default();
        config.target_bounds.y = AxisRange::new(2.0, -2.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("target_bounds.y"));
    }

    #[test]
    fn test_sample_per_axis() {
        let bounds = TargetBounds {
            x: AxisRange::new(-4.0, 4.0),
            y: AxisRange::new(-2.0, 2.0),
            z: AxisRange::fixed(5.0),
        };
        let mut rng = Scripted::new(vec![0.0, 1.0, 0.3]);
        let target = bounds.sample(&mut rng);
        assert_eq!(target, Vec3::new(-4.0, 2.0, 5.0));
        assert!(bounds.contains(target));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RoundConfig =
            serde_json::from_str(r#"{ "throws_total": 3, "easing": "quad_out" }"#).unwrap();
        assert_eq!(config.throws_total, 3);
        assert_eq!(config.interval_ms, THROW_INTERVAL_MS);
        assert!(matches!(config.easing, Easing::QuadOut));
    }
}
