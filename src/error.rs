//! Contract violations reported by the stroke renderers.
//!
//! None of these are recoverable in the sense of "retry": each one means the
//! caller handed over data that breaks an invariant (a curve in a flattened
//! path, a pressure sample that is not positive). Rendering stops at the
//! first violation and nothing further is drawn.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrokeError {
    /// A pressure stroke contains a point whose pressure is not `> 0`.
    #[error("point {index} has non-positive pressure {pressure}")]
    NonPositivePressure { index: usize, pressure: f64 },

    /// A curve command reached the nib stamper; paths must be flattened first.
    #[error("curve command at vertex {index}; the path must be flattened")]
    CurveInFlatPath { index: usize },

    /// A command the stamper does not understand.
    #[error("unknown path command {cmd:#x} at vertex {index}")]
    UnknownPathCommand { index: usize, cmd: u32 },

    /// Nib configuration rejected by `NibConfig::new`.
    #[error("invalid nib configuration: {0}")]
    InvalidNibConfig(&'static str),

    /// Name passed to `LineStyle::from_name` is not a known preset.
    #[error("unknown line style {0:?}")]
    UnknownLineStyle(String),
}
