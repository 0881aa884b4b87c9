//! Line style: the dash pattern of a stroke.

use crate::error::StrokeError;

const DASH_PATTERN: [f64; 2] = [6.0, 3.0];
const DASH_DOT_PATTERN: [f64; 4] = [6.0, 3.0, 0.5, 3.0];
const DOT_PATTERN: [f64; 2] = [0.5, 3.0];

/// Alternating on/off lengths. An empty pattern means a solid line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyle {
    dashes: Vec<f64>,
}

impl LineStyle {
    pub fn solid() -> Self {
        Self { dashes: Vec::new() }
    }

    pub fn dash() -> Self {
        Self::with_dashes(&DASH_PATTERN)
    }

    pub fn dash_dot() -> Self {
        Self::with_dashes(&DASH_DOT_PATTERN)
    }

    pub fn dot() -> Self {
        Self::with_dashes(&DOT_PATTERN)
    }

    /// Custom pattern. Lengths are taken as given; it is up to the backend to
    /// decide what to do with degenerate patterns.
    pub fn with_dashes(dashes: &[f64]) -> Self {
        Self {
            dashes: dashes.to_vec(),
        }
    }

    /// Look up a named preset: `plain`, `dash`, `dashdot` or `dot`.
    pub fn from_name(name: &str) -> Result<Self, StrokeError> {
        match name {
            "plain" | "solid" => Ok(Self::solid()),
            "dash" => Ok(Self::dash()),
            "dashdot" => Ok(Self::dash_dot()),
            "dot" => Ok(Self::dot()),
            _ => Err(StrokeError::UnknownLineStyle(name.to_string())),
        }
    }

    pub fn dashes(&self) -> &[f64] {
        &self.dashes
    }

    pub fn has_dashes(&self) -> bool {
        !self.dashes.is_empty()
    }

    pub fn set_dashes(&mut self, dashes: &[f64]) {
        self.dashes.clear();
        self.dashes.extend_from_slice(dashes);
    }
}
