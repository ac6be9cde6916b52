//! Progress curves for ball flight

use serde::{Deserialize, Serialize};

/// Maps normalized flight progress onto interpolation weight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Fast release, slowing into the glove: `1 - (1 - p)^2`
    QuadOut,
    /// Host-supplied curve (not persisted)
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Evaluate the curve. Input and output are both clamped to [0, 1].
    pub fn apply(&self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        let eased = match self {
            Easing::Linear => p,
            Easing::QuadOut => 1.0 - (1.0 - p) * (1.0 - p),
            Easing::Custom(f) => f(p),
        };
        if eased.is_nan() { p } else { eased.clamp(0.0, 1.0) }
    }
}
