//! Uniform-width stroke outlines for the canvas backend.
//!
//! A stroked path is turned into a set of polygons whose union is the
//! stroke: one rectangle per segment (butt caps) and one disc per joint
//! (round joins). The rasterizer paints their union, so overlapping pieces
//! never add up.

use crate::basics::{is_close, is_move_to, is_vertex, PointD};
use crate::math::{calc_distance, calc_orthogonal, VERTEX_DIST_EPSILON};
use crate::path_storage::PathStorage;
use crate::vcgen_dash::VcgenDash;
use std::f64::consts::PI;

/// A polyline taken from a path, with its closed flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPath {
    pub points: Vec<PointD>,
    pub closed: bool,
}

/// Split a flattened path into sub-paths. A close command ends the current
/// sub-path and starts the next one at its first point; a drawing command
/// with no current point starts a sub-path.
pub fn split_sub_paths(path: &PathStorage) -> Vec<SubPath> {
    let mut out = Vec::new();
    let mut points: Vec<PointD> = Vec::new();
    for v in path.vertices() {
        if is_move_to(v.cmd) {
            if !points.is_empty() {
                out.push(SubPath {
                    points: std::mem::take(&mut points),
                    closed: false,
                });
            }
            points.push(PointD::new(v.x, v.y));
        } else if is_vertex(v.cmd) {
            points.push(PointD::new(v.x, v.y));
        } else if is_close(v.cmd) && !points.is_empty() {
            let start = points[0];
            out.push(SubPath {
                points: std::mem::take(&mut points),
                closed: true,
            });
            points.push(start);
        }
    }
    if points.len() > 1 {
        out.push(SubPath {
            points,
            closed: false,
        });
    }
    out
}

fn join_disc(center: PointD, radius: f64) -> Vec<PointD> {
    let steps = ((radius * 8.0).ceil() as usize).clamp(8, 64);
    (0..steps)
        .map(|i| {
            let a = 2.0 * PI * i as f64 / steps as f64;
            PointD::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

fn segment_rect(p: PointD, q: PointD, half_width: f64) -> Vec<PointD> {
    let (dx, dy) = calc_orthogonal(half_width, p.x, p.y, q.x, q.y);
    vec![
        PointD::new(p.x + dx, p.y + dy),
        PointD::new(q.x + dx, q.y + dy),
        PointD::new(q.x - dx, q.y - dy),
        PointD::new(p.x - dx, p.y - dy),
    ]
}

fn polyline_polygons(pts: &[PointD], closed: bool, half_width: f64, out: &mut Vec<Vec<PointD>>) {
    let mut segments = 0;
    for w in pts.windows(2) {
        if calc_distance(w[0].x, w[0].y, w[1].x, w[1].y) > VERTEX_DIST_EPSILON {
            out.push(segment_rect(w[0], w[1], half_width));
            segments += 1;
        }
    }
    if segments == 0 {
        return;
    }
    let last = pts.len() - 1;
    for p in &pts[1..last] {
        out.push(join_disc(*p, half_width));
    }
    if closed {
        out.push(join_disc(pts[0], half_width));
    }
}

/// Outline polygons of `path` stroked at `width`, optionally dashed.
pub fn stroke_polygons(
    path: &PathStorage,
    width: f64,
    dash: Option<&VcgenDash>,
) -> Vec<Vec<PointD>> {
    let mut out = Vec::new();
    if width <= 0.0 {
        return out;
    }
    let half_width = width * 0.5;
    for sub in split_sub_paths(path) {
        let mut pts = sub.points;
        if sub.closed {
            pts.push(pts[0]);
        }
        match dash {
            Some(dash) => {
                for run in dash.dash_polyline(&pts) {
                    polyline_polygons(&run, false, half_width, &mut out);
                }
            }
            None => polyline_polygons(&pts, sub.closed, half_width, &mut out),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(poly: &[PointD]) -> f64 {
        let n = poly.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (poly[i], poly[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum();
        (twice * 0.5).abs()
    }

    #[test]
    fn test_split_sub_paths() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 0.0);
        path.move_to(5.0, 5.0);
        path.line_to(6.0, 5.0);
        path.line_to(6.0, 6.0);
        path.close_polygon();
        path.line_to(9.0, 9.0);
        let subs = split_sub_paths(&path);
        assert_eq!(subs.len(), 3);
        assert!(!subs[0].closed);
        assert!(subs[1].closed);
        assert_eq!(subs[1].points.len(), 3);
        // Drawing after a close continues from the sub-path start.
        assert_eq!(subs[2].points[0], PointD::new(5.0, 5.0));
    }

    #[test]
    fn test_single_segment_rect() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        let polys = stroke_polygons(&path, 2.0, None);
        assert_eq!(polys.len(), 1);
        assert!((area(&polys[0]) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_joins_at_interior_vertices() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.line_to(0.0, 10.0);
        assert_eq!(stroke_polygons(&path, 2.0, None).len(), 3 + 2);
        path.close_polygon();
        // Closing adds a segment and joins at both former end points.
        assert_eq!(stroke_polygons(&path, 2.0, None).len(), 4 + 4);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut path = PathStorage::new();
        assert!(stroke_polygons(&path, 2.0, None).is_empty());
        path.move_to(3.0, 3.0);
        path.line_to(3.0, 3.0);
        assert!(stroke_polygons(&path, 2.0, None).is_empty());
        path.line_to(5.0, 3.0);
        assert!(stroke_polygons(&path, 0.0, None).is_empty());
    }

    #[test]
    fn test_dashed_segments() {
        let mut path = PathStorage::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        let mut dash = VcgenDash::new();
        dash.add_dash(4.0, 2.0);
        let polys = stroke_polygons(&path, 1.0, Some(&dash));
        // Dashes [0,4], [6,10].
        assert_eq!(polys.len(), 2);
        for p in &polys {
            assert!((area(p) - 4.0).abs() < 1e-9);
        }
    }
}
