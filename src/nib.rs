//! Calligraphic nib stamping.
//!
//! A flat pen nib held at a fixed angle is approximated by one quadrilateral
//! per path segment: the segment swept by the nib's half-width vector
//! `(cos(angle), sin(angle)) * thickness`. The vector does not follow the
//! segment direction, which is what gives the strokes their calligraphic
//! look. Consecutive quadrilaterals share the whole edge at their common
//! vertex, so the stamps tile into one continuous shape.
//!
//! `stroke_calligraphic` composites the stamps as opacity: they are added
//! into an alpha-only group and the caller's source is then painted through
//! that group in one pass. Additive blending closes the anti-aliasing seam
//! where two stamps meet, and the mask keeps overlapping stamps from
//! darkening each other.

use log::trace;

use crate::backend::DrawingBackend;
use crate::basics::{is_close, is_curve, is_line_to, is_move_to, is_stop, PointD, VertexSource};
use crate::color::Rgba;
use crate::comp_op::CompOp;
use crate::error::StrokeError;

// ============================================================================
// NibQuad
// ============================================================================

/// The quadrilateral stamped for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NibQuad {
    /// `from + shift`, `from - shift`, `to - shift`, `to + shift`.
    pub corners: [PointD; 4],
}

impl NibQuad {
    pub fn new(from: PointD, to: PointD, x_shift: f64, y_shift: f64) -> Self {
        Self {
            corners: [
                PointD::new(from.x + x_shift, from.y + y_shift),
                PointD::new(from.x - x_shift, from.y - y_shift),
                PointD::new(to.x - x_shift, to.y - y_shift),
                PointD::new(to.x + x_shift, to.y + y_shift),
            ],
        }
    }

    /// Emit the quad as a closed sub-path on `backend`.
    pub fn emit<B: DrawingBackend + ?Sized>(&self, backend: &mut B) {
        let [a, b, c, d] = self.corners;
        backend.move_to(a.x, a.y);
        backend.line_to(b.x, b.y);
        backend.line_to(c.x, c.y);
        backend.line_to(d.x, d.y);
        backend.close_path();
    }
}

/// Half-width vector of a nib at `angle` with the given `thickness`.
#[inline]
pub fn nib_shift(angle: f64, thickness: f64) -> (f64, f64) {
    (angle.cos() * thickness, angle.sin() * thickness)
}

// ============================================================================
// Stamping
// ============================================================================

/// Stamp one quadrilateral per segment of the flattened `path`, filling or
/// stroking each one on `backend` as soon as it is built.
///
/// A close command stamps the segment back to the last move-to point. Curve
/// commands, and anything other than move/line/close, are rejected; stamps
/// emitted before the offending vertex stay on the target.
///
/// Returns the number of stamps drawn.
pub fn draw_path_calligraphic<B, VS>(
    backend: &mut B,
    path: &mut VS,
    angle: f64,
    thickness: f64,
    fill: bool,
) -> Result<usize, StrokeError>
where
    B: DrawingBackend + ?Sized,
    VS: VertexSource + ?Sized,
{
    let mut last_move = PointD::new(0.0, 0.0);
    let mut current = PointD::new(0.0, 0.0);
    let (x_shift, y_shift) = nib_shift(angle, thickness);
    let mut stamps = 0;

    path.rewind(0);
    let mut index = 0;
    loop {
        let (mut x, mut y) = (0.0, 0.0);
        let cmd = path.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_move_to(cmd) {
            last_move = PointD::new(x, y);
            current = last_move;
        } else if is_line_to(cmd) || is_close(cmd) {
            let target = if is_close(cmd) {
                last_move
            } else {
                PointD::new(x, y)
            };
            NibQuad::new(current, target, x_shift, y_shift).emit(backend);
            if fill {
                backend.fill();
            } else {
                backend.stroke();
            }
            stamps += 1;
            current = target;
        } else if is_curve(cmd) {
            return Err(StrokeError::CurveInFlatPath { index });
        } else {
            return Err(StrokeError::UnknownPathCommand { index, cmd });
        }
        index += 1;
    }
    Ok(stamps)
}

/// Replace the backend's current path with a calligraphic rendering of it,
/// painted with the caller's source.
///
/// The current path is taken (flattened) and cleared. The stamps are added
/// with an opaque source and `CompOp::Plus` into an alpha-only group, the
/// graphics state is restored, and the caller's source is painted through the
/// group once. Group and saved state are released before any stamping error
/// is returned, in which case nothing is painted.
pub fn stroke_calligraphic<B>(
    backend: &mut B,
    angle: f64,
    thickness: f64,
) -> Result<(), StrokeError>
where
    B: DrawingBackend + ?Sized,
{
    let mut path = backend.copy_path_flat();
    backend.new_path();

    backend.save();
    backend.set_source_rgba(Rgba::black());
    backend.set_operator(CompOp::Plus);
    backend.push_group_alpha();

    let stamped = draw_path_calligraphic(backend, &mut path, angle, thickness, true);

    let mask = backend.pop_group();
    backend.restore();

    let stamps = stamped?;
    backend.mask(&mask);
    trace!("stroke_calligraphic: {stamps} stamps, thickness {thickness:.3}");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
