//! # calligraphy-ink
//!
//! Pressure-sensitive calligraphic ink strokes for 2D vector backends.
//!
//! A stroke is an ordered list of points, each carrying a pen pressure. A
//! vector backend can only stroke at one width, so pressure ink is built from
//! per-segment quadrilaterals ("nib stamps") swept by a flat nib held at a
//! fixed angle, whose width follows the pressure. The stamps are composited
//! additively into an alpha-only group which is then used as a mask for the
//! caller's paint, so shared edges leave no seam and self-overlapping strokes
//! never darken twice.
//!
//! ## Architecture
//!
//! 1. **Stroke driver** (`stroke`) walks the points pairwise, derives the nib
//!    thickness and carries the dash phase
//! 2. **Compositor** (`nib::stroke_calligraphic`) wraps the stamps in an
//!    alpha group and masks the source through it
//! 3. **Stamper** (`nib::draw_path_calligraphic`) turns a flattened path into
//!    nib quadrilaterals
//! 4. **Backend** (`backend::DrawingBackend`) receives path, state and group
//!    commands; `canvas` rasterizes them, `recording` logs them

// Phase 1: Foundation Types & Math
pub mod basics;
pub mod color;
pub mod comp_op;
pub mod error;
pub mod math;

// Phase 2: Stroke Data & Configuration
pub mod config;
pub mod line_style;
pub mod path_storage;
pub mod point;

// Phase 3: Backends
pub mod backend;
pub mod canvas;
pub mod rasterizer;
pub mod recording;
pub mod stroker;
pub mod vcgen_dash;

// Phase 4: Calligraphic Rendering
pub mod nib;
pub mod stroke;

pub use backend::DrawingBackend;
pub use canvas::{AlphaMask, Canvas};
pub use color::Rgba;
pub use comp_op::CompOp;
pub use config::NibConfig;
pub use error::StrokeError;
pub use line_style::LineStyle;
pub use point::InkPoint;
pub use recording::{DrawCall, RecordingBackend};
pub use stroke::{draw_no_pressure, draw_stroke, draw_with_pressure, path_to_backend};
