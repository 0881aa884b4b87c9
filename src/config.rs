//! Nib configuration for pressure strokes.

use crate::error::StrokeError;
use std::f64::consts::PI;

/// Orientation and thickness range of the simulated flat nib.
///
/// `angle` is the fixed world-space direction of the nib's half-width vector
/// (radians). Thickness is interpolated linearly between `min_thickness` and
/// `max_thickness` by the pressure of the leading point of each segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NibConfig {
    angle: f64,
    min_thickness: f64,
    max_thickness: f64,
}

impl NibConfig {
    pub const DEFAULT_ANGLE: f64 = PI / 8.0;
    pub const DEFAULT_MIN_THICKNESS: f64 = 0.2;
    pub const DEFAULT_MAX_THICKNESS: f64 = 1.0;

    /// Build a validated configuration.
    ///
    /// Requires finite values, `min_thickness >= 0`, `max_thickness >= min_thickness`
    /// and `max_thickness > 0`, which keeps every thickness strictly positive
    /// for positive pressure.
    pub fn new(angle: f64, min_thickness: f64, max_thickness: f64) -> Result<Self, StrokeError> {
        if !angle.is_finite() || !min_thickness.is_finite() || !max_thickness.is_finite() {
            return Err(StrokeError::InvalidNibConfig("values must be finite"));
        }
        if min_thickness < 0.0 {
            return Err(StrokeError::InvalidNibConfig("min thickness is negative"));
        }
        if max_thickness < min_thickness {
            return Err(StrokeError::InvalidNibConfig(
                "max thickness is below min thickness",
            ));
        }
        if max_thickness <= 0.0 {
            return Err(StrokeError::InvalidNibConfig("max thickness must be positive"));
        }
        Ok(Self {
            angle,
            min_thickness,
            max_thickness,
        })
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn min_thickness(&self) -> f64 {
        self.min_thickness
    }

    pub fn max_thickness(&self) -> f64 {
        self.max_thickness
    }

    /// Change the nib orientation. Any finite angle is accepted.
    pub fn set_angle(&mut self, angle: f64) -> Result<&mut Self, StrokeError> {
        *self = Self::new(angle, self.min_thickness, self.max_thickness)?;
        Ok(self)
    }

    /// Change the thickness range, re-validating it.
    pub fn set_thickness_range(&mut self, min: f64, max: f64) -> Result<&mut Self, StrokeError> {
        *self = Self::new(self.angle, min, max)?;
        Ok(self)
    }

    /// Nib thickness for pressure `z`: `min + (max - min) * z`.
    #[inline]
    pub fn thickness(&self, z: f64) -> f64 {
        self.min_thickness + (self.max_thickness - self.min_thickness) * z
    }
}

impl Default for NibConfig {
    fn default() -> Self {
        Self {
            angle: Self::DEFAULT_ANGLE,
            min_thickness: Self::DEFAULT_MIN_THICKNESS,
            max_thickness: Self::DEFAULT_MAX_THICKNESS,
        }
    }
}
