//! Stroke rendering entry points.
//!
//! `draw_no_pressure` strokes a whole point sequence at one width.
//! `draw_with_pressure` renders it one segment at a time through
//! `nib::stroke_calligraphic`, with the nib thickness taken from the pressure
//! of each segment's leading point. Both honor a dash pattern; the pressure
//! path carries the dash phase from segment to segment and returns it so the
//! caller can continue the pattern on the next stroke fragment.

use log::debug;

use crate::backend::DrawingBackend;
use crate::config::NibConfig;
use crate::error::StrokeError;
use crate::line_style::LineStyle;
use crate::nib::stroke_calligraphic;
use crate::point::InkPoint;

/// Emit `pts` as one open sub-path: a move-to at the first point and a
/// line-to for each following point.
pub fn path_to_backend<B: DrawingBackend + ?Sized>(backend: &mut B, pts: &[InkPoint]) {
    let Some((first, rest)) = pts.split_first() else {
        return;
    };
    backend.move_to(first.x, first.y);
    for p in rest {
        backend.line_to(p.x, p.y);
    }
}

/// Stroke `pts` at a uniform `width`, dashed by `style` starting at
/// `dash_offset`.
pub fn draw_no_pressure<B: DrawingBackend + ?Sized>(
    backend: &mut B,
    pts: &[InkPoint],
    width: f64,
    style: &LineStyle,
    dash_offset: f64,
) {
    backend.set_line_width(width);
    if style.has_dashes() {
        backend.set_dash(style.dashes(), dash_offset);
    } else {
        backend.set_dash(&[], 0.0);
    }
    path_to_backend(backend, pts);
    backend.stroke();
}

/// Render `pts` as calligraphic pressure ink and return the dash offset after
/// the last segment.
///
/// Every point must have positive pressure; this is checked before anything
/// is drawn. Sequences of fewer than two points draw nothing.
pub fn draw_with_pressure<B: DrawingBackend + ?Sized>(
    backend: &mut B,
    pts: &[InkPoint],
    style: &LineStyle,
    dash_offset: f64,
    config: &NibConfig,
) -> Result<f64, StrokeError> {
    if pts.len() > 1 {
        // `!(z > 0)` so that NaN is rejected too.
        if let Some((index, p)) = pts.iter().enumerate().find(|(_, p)| !(p.z > 0.0)) {
            return Err(StrokeError::NonPositivePressure {
                index,
                pressure: p.z,
            });
        }
    }

    let dashed = style.has_dashes();
    if !dashed {
        backend.set_dash(&[], 0.0);
    }

    let mut offset = dash_offset;
    for w in pts.windows(2) {
        let (p, q) = (&w[0], &w[1]);
        if dashed {
            backend.set_dash(style.dashes(), offset);
            offset += p.line_length_to(q);
        }
        backend.move_to(p.x, p.y);
        backend.line_to(q.x, q.y);
        stroke_calligraphic(backend, config.angle(), config.thickness(p.z))?;
    }

    debug!(
        "pressure stroke: {} points, dash offset {:.3} -> {:.3}",
        pts.len(),
        dash_offset,
        offset
    );
    Ok(offset)
}

/// Render `pts` with pressure when every point carries it, otherwise as a
/// uniform stroke of `width`. Returns the dash offset to continue from.
pub fn draw_stroke<B: DrawingBackend + ?Sized>(
    backend: &mut B,
    pts: &[InkPoint],
    width: f64,
    style: &LineStyle,
    dash_offset: f64,
    config: &NibConfig,
) -> Result<f64, StrokeError> {
    if !pts.is_empty() && pts.iter().all(InkPoint::has_pressure) {
        draw_with_pressure(backend, pts, style, dash_offset, config)
    } else {
        draw_no_pressure(backend, pts, width, style, dash_offset);
        Ok(dash_offset)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::canvas::Canvas;
    use crate::color::Rgba;
    use crate::comp_op::CompOp;
    use crate::recording::{DrawCall, RecordingBackend};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-12;

    fn pts(v: &[(f64, f64, f64)]) -> Vec<InkPoint> {
        v.iter().map(|&(x, y, z)| InkPoint::new(x, y, z)).collect()
    }

    fn draw_default(
        rec: &mut RecordingBackend,
        line: &[InkPoint],
        style: &LineStyle,
        offset: f64,
    ) -> Result<f64, StrokeError> {
        draw_with_pressure(rec, line, style, offset, &NibConfig::default())
    }

    fn path_calls(rec: &RecordingBackend) -> Vec<DrawCall> {
        rec.calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::MoveTo { .. } | DrawCall::LineTo { .. }))
            .cloned()
            .collect()
    }

    fn dash_offsets(rec: &RecordingBackend) -> Vec<f64> {
        rec.calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::SetDash { dashes, offset } if !dashes.is_empty() => Some(*offset),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_path_to_backend_order() {
        let mut rec = RecordingBackend::new();
        path_to_backend(&mut rec, &pts(&[(1.0, 2.0, 0.5), (3.0, 4.0, 0.5), (5.0, 0.0, 0.5)]));
        assert_eq!(
            path_calls(&rec),
            vec![
                DrawCall::MoveTo { x: 1.0, y: 2.0 },
                DrawCall::LineTo { x: 3.0, y: 4.0 },
                DrawCall::LineTo { x: 5.0, y: 0.0 },
            ]
        );
        assert_eq!(rec.calls().len(), 3);
    }

    #[test]
    fn test_path_to_backend_empty() {
        let mut rec = RecordingBackend::new();
        path_to_backend(&mut rec, &[]);
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn test_no_pressure_single_stroke() {
        let mut rec = RecordingBackend::new();
        let line = pts(&[(0.0, 0.0, -1.0), (5.0, 0.0, -1.0), (5.0, 5.0, -1.0)]);
        draw_no_pressure(&mut rec, &line, 2.5, &LineStyle::dash(), 3.0);
        assert_eq!(
            rec.calls()[..2],
            [
                DrawCall::SetLineWidth(2.5),
                DrawCall::SetDash {
                    dashes: vec![6.0, 3.0],
                    offset: 3.0
                },
            ]
        );
        assert_eq!(rec.count(|c| *c == DrawCall::Stroke), 1);
        assert_eq!(rec.paint_count(), 1);
        assert_eq!(rec.calls().last(), Some(&DrawCall::Stroke));
        assert_eq!(rec.painted_polygons()[0].len(), 3);
    }

    #[test]
    fn test_no_pressure_solid_clears_dash() {
        let mut rec = RecordingBackend::new();
        let line = pts(&[(0.0, 0.0, 1.0), (1.0, 0.0, 1.0)]);
        draw_no_pressure(&mut rec, &line, 1.0, &LineStyle::solid(), 7.0);
        assert_eq!(
            rec.calls()[1],
            DrawCall::SetDash {
                dashes: vec![],
                offset: 0.0
            }
        );
    }

    #[test]
    fn test_concrete_single_segment() {
        let mut rec = RecordingBackend::new();
        let config = NibConfig::default();
        let offset = draw_with_pressure(
            &mut rec,
            &pts(&[(0.0, 0.0, 0.5), (10.0, 0.0, 0.5)]),
            &LineStyle::solid(),
            2.0,
            &config,
        )
        .unwrap();
        assert_eq!(offset, 2.0);
        assert_eq!(rec.count(|c| *c == DrawCall::Fill), 1);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Mask(_))), 1);
        assert_eq!(rec.count(|c| *c == DrawCall::PushGroupAlpha), 1);

        // Thickness 0.2 + 0.8 * 0.5 = 0.6 at angle pi/8.
        let (sx, sy) = ((PI / 8.0).cos() * 0.6, (PI / 8.0).sin() * 0.6);
        let quad = &rec.painted_polygons()[0];
        assert!((quad[0].x - sx).abs() < EPS);
        assert!((quad[0].y - sy).abs() < EPS);
        assert!((quad[2].x - (10.0 - sx)).abs() < EPS);
        assert!((quad[2].y + sy).abs() < EPS);
    }

    #[test]
    fn test_dash_offset_progression() {
        let mut rec = RecordingBackend::new();
        let style = LineStyle::with_dashes(&[4.0, 2.0]);
        let offset = draw_with_pressure(
            &mut rec,
            &pts(&[(0.0, 0.0, 0.5), (5.0, 0.0, 0.5), (10.0, 0.0, 0.5)]),
            &style,
            0.0,
            &NibConfig::default(),
        )
        .unwrap();
        assert!((offset - 10.0).abs() < EPS);
        assert_eq!(dash_offsets(&rec), vec![0.0, 5.0]);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Mask(_))), 2);
    }

    #[test]
    fn test_dash_offset_accumulates_segment_lengths() {
        let mut rec = RecordingBackend::new();
        let line = pts(&[(0.0, 0.0, 0.3), (3.0, 4.0, 0.6), (3.0, 10.0, 0.9), (0.0, 6.0, 1.0)]);
        let offset = draw_default(&mut rec, &line, &LineStyle::dot(), 1.5).unwrap();
        assert!((offset - (1.5 + 5.0 + 6.0 + 5.0)).abs() < 1e-9);
        assert_eq!(dash_offsets(&rec).len(), 3);
    }

    #[test]
    fn test_solid_clears_dash_once() {
        let mut rec = RecordingBackend::new();
        let line = pts(&[(0.0, 0.0, 0.3), (3.0, 4.0, 0.6), (3.0, 10.0, 0.9)]);
        let offset = draw_default(&mut rec, &line, &LineStyle::solid(), 4.0).unwrap();
        assert_eq!(offset, 4.0);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::SetDash { .. })), 1);
        assert_eq!(
            rec.calls()[0],
            DrawCall::SetDash {
                dashes: vec![],
                offset: 0.0
            }
        );
    }

    #[test]
    fn test_thickness_follows_leading_point() {
        let mut rec = RecordingBackend::new();
        let config = NibConfig::new(0.0, 1.0, 3.0).unwrap();
        let line = pts(&[(0.0, 0.0, 0.0001), (10.0, 0.0, 1.0), (20.0, 0.0, 0.5)]);
        draw_with_pressure(&mut rec, &line, &LineStyle::solid(), 0.0, &config).unwrap();
        let quads = rec.painted_polygons();
        assert_eq!(quads.len(), 2);
        // Angle 0: the shift is horizontal, its length the thickness.
        assert!((quads[0][0].x - quads[0][1].x - 2.0 * config.thickness(0.0001)).abs() < 1e-9);
        assert!((quads[1][0].x - quads[1][1].x - 2.0 * 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_strokes_draw_nothing() {
        for line in [vec![], pts(&[(4.0, 4.0, 0.5)]), pts(&[(4.0, 4.0, 0.0)])] {
            let mut rec = RecordingBackend::new();
            let offset = draw_default(&mut rec, &line, &LineStyle::dash(), 9.0).unwrap();
            assert_eq!(offset, 9.0);
            assert_eq!(rec.paint_count(), 0);
            assert!(path_calls(&rec).is_empty());
        }
    }

    #[test]
    fn test_zero_pressure_is_rejected() {
        for bad in [0.0, -0.5, f64::NAN] {
            let mut rec = RecordingBackend::new();
            let line = pts(&[(0.0, 0.0, 0.5), (5.0, 0.0, 0.5), (10.0, 0.0, bad)]);
            let err = draw_default(&mut rec, &line, &LineStyle::solid(), 0.0).unwrap_err();
            assert!(matches!(err, StrokeError::NonPositivePressure { index: 2, .. }));
            assert!(rec.calls().is_empty());
        }
    }

    #[test]
    fn test_stamps_share_edge_at_joint() {
        let mut rec = RecordingBackend::new();
        let line = pts(&[(0.0, 0.0, 0.7), (6.0, 2.0, 0.7), (9.0, 9.0, 0.7)]);
        draw_default(&mut rec, &line, &LineStyle::solid(), 0.0).unwrap();
        let quads = rec.painted_polygons();
        let near = |a: PointD, b: PointD| (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS;
        assert!(near(quads[0][3], quads[1][0]));
        assert!(near(quads[0][2], quads[1][1]));
    }

    #[test]
    fn test_dispatch() {
        let config = NibConfig::default();
        let style = LineStyle::with_dashes(&[1.0, 1.0]);

        let mut rec = RecordingBackend::new();
        let with = pts(&[(0.0, 0.0, 0.5), (3.0, 4.0, 0.5)]);
        let offset = draw_stroke(&mut rec, &with, 2.0, &style, 0.0, &config).unwrap();
        assert_eq!(offset, 5.0);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Mask(_))), 1);

        let mut rec = RecordingBackend::new();
        let without = vec![InkPoint::without_pressure(0.0, 0.0), InkPoint::new(3.0, 4.0, 0.5)];
        let offset = draw_stroke(&mut rec, &without, 2.0, &style, 0.0, &config).unwrap();
        assert_eq!(offset, 0.0);
        assert_eq!(rec.count(|c| *c == DrawCall::Stroke), 1);
        assert_eq!(rec.count(|c| matches!(c, DrawCall::Mask(_))), 0);
    }

    #[test]
    fn test_pressure_stroke_on_canvas() {
        let mut canvas = Canvas::new(40, 20);
        let ink = Rgba::new(0.1, 0.1, 0.6, 0.8);
        canvas.set_source_rgba(ink);
        let config = NibConfig::new(PI / 2.0, 1.0, 4.0).unwrap();
        let line = pts(&[(4.0, 10.0, 1.0), (20.0, 10.0, 1.0), (36.0, 10.0, 1.0)]);
        draw_with_pressure(&mut canvas, &line, &LineStyle::solid(), 0.0, &config).unwrap();

        // Stamps are 8 px tall; the joint at x = 20 has no seam or overlap.
        for x in 4..36 {
            for y in 6..14 {
                let p = canvas.pixel(x, y);
                assert!((p.a - 0.8).abs() < 1e-9, "({}, {}) alpha {}", x, y, p.a);
            }
            assert_eq!(canvas.pixel(x, 5).a, 0.0);
            assert_eq!(canvas.pixel(x, 14).a, 0.0);
        }
        assert_eq!(canvas.source(), ink);
        assert_eq!(canvas.operator(), CompOp::SrcOver);
        assert_eq!(canvas.group_depth(), 0);
    }

    #[test]
    fn test_uniform_stroke_on_canvas() {
        let mut canvas = Canvas::new(20, 10);
        let line = vec![
            InkPoint::without_pressure(0.0, 5.0),
            InkPoint::without_pressure(20.0, 5.0),
        ];
        draw_no_pressure(&mut canvas, &line, 2.0, &LineStyle::with_dashes(&[5.0, 5.0]), 0.0);
        assert_eq!(canvas.pixel(2, 4).a, 1.0);
        assert_eq!(canvas.pixel(7, 4).a, 0.0);
        assert_eq!(canvas.pixel(12, 4).a, 1.0);
    }
}
