//! Ink points: stroke samples carrying a pressure value.

use crate::math::calc_distance;

/// A captured stroke sample: surface position plus normalized pressure `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl InkPoint {
    /// Pressure value of a point captured by a device without pressure.
    pub const NO_PRESSURE: f64 = -1.0;

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point without pressure information.
    pub fn without_pressure(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: Self::NO_PRESSURE,
        }
    }

    pub fn has_pressure(&self) -> bool {
        self.z != Self::NO_PRESSURE
    }

    /// Euclidean distance to `other`, ignoring pressure.
    pub fn line_length_to(&self, other: &InkPoint) -> f64 {
        calc_distance(self.x, self.y, other.x, other.y)
    }
}
