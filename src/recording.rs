//! Recording backend.
//!
//! Implements `DrawingBackend` by logging every call as a `DrawCall`, while
//! tracking the current path the way an immediate-mode context does. The
//! path consumed by each `fill`/`stroke` is kept as well, so callers can
//! inspect the exact geometry that was painted.
//!
//! Curves added with `curve_to` are stored as given: `copy_path_flat` does
//! not flatten them, which makes the backend usable for exercising the
//! flattened-path contract of the stamper.

use log::warn;

use crate::backend::DrawingBackend;
use crate::basics::{is_close, is_move_to, is_vertex, PointD};
use crate::color::Rgba;
use crate::comp_op::CompOp;
use crate::path_storage::PathStorage;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    CurveTo { x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64 },
    ClosePath,
    NewPath,
    Fill,
    Stroke,
    SetLineWidth(f64),
    SetDash { dashes: Vec<f64>, offset: f64 },
    SetSource(Rgba),
    SetOperator(CompOp),
    Save,
    Restore,
    PushGroupAlpha,
    PopGroup,
    Mask(usize),
}

impl DrawCall {
    /// Calls that put ink on a target.
    pub fn is_paint(&self) -> bool {
        matches!(self, DrawCall::Fill | DrawCall::Stroke | DrawCall::Mask(_))
    }
}

/// Mask handle returned by `RecordingBackend::pop_group`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedMask {
    pub id: usize,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    path: PathStorage,
    painted: Vec<PathStorage>,
    group_depth: usize,
    save_depth: usize,
    next_mask: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cubic curve to the current path, unflattened.
    #[allow(clippy::too_many_arguments)]
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.calls.push(DrawCall::CurveTo {
            x1,
            y1,
            x2,
            y2,
            x3,
            y3,
        });
        self.path.curve4(x1, y1, x2, y2, x3, y3);
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Paths consumed by `fill` and `stroke`, in call order.
    pub fn painted_paths(&self) -> &[PathStorage] {
        &self.painted
    }

    /// Closed polygons of every painted path, one entry per sub-path.
    pub fn painted_polygons(&self) -> Vec<Vec<PointD>> {
        let mut out = Vec::new();
        for path in &self.painted {
            let mut poly: Vec<PointD> = Vec::new();
            for v in path.vertices() {
                if is_move_to(v.cmd) {
                    if !poly.is_empty() {
                        out.push(std::mem::take(&mut poly));
                    }
                    poly.push(PointD::new(v.x, v.y));
                } else if is_vertex(v.cmd) {
                    poly.push(PointD::new(v.x, v.y));
                } else if is_close(v.cmd) && !poly.is_empty() {
                    out.push(std::mem::take(&mut poly));
                }
            }
            if !poly.is_empty() {
                out.push(poly);
            }
        }
        out
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Number of fill, stroke and mask calls.
    pub fn paint_count(&self) -> usize {
        self.count(DrawCall::is_paint)
    }

    pub fn group_depth(&self) -> usize {
        self.group_depth
    }

    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.painted.clear();
        self.path.remove_all();
    }

    fn consume_path(&mut self) {
        self.painted.push(std::mem::take(&mut self.path));
    }
}

impl DrawingBackend for RecordingBackend {
    type Mask = RecordedMask;

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo { x, y });
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo { x, y });
        self.path.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
        self.path.close_polygon();
    }

    fn new_path(&mut self) {
        self.calls.push(DrawCall::NewPath);
        self.path.remove_all();
    }

    fn copy_path_flat(&self) -> PathStorage {
        self.path.clone()
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
        self.consume_path();
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
        self.consume_path();
    }

    fn set_line_width(&mut self, width: f64) {
        self.calls.push(DrawCall::SetLineWidth(width));
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        self.calls.push(DrawCall::SetDash {
            dashes: dashes.to_vec(),
            offset,
        });
    }

    fn set_source_rgba(&mut self, color: Rgba) {
        self.calls.push(DrawCall::SetSource(color));
    }

    fn set_operator(&mut self, op: CompOp) {
        self.calls.push(DrawCall::SetOperator(op));
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
        self.save_depth += 1;
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
        if self.save_depth == 0 {
            warn!("restore without matching save");
        } else {
            self.save_depth -= 1;
        }
    }

    fn push_group_alpha(&mut self) {
        self.calls.push(DrawCall::PushGroupAlpha);
        self.group_depth += 1;
    }

    fn pop_group(&mut self) -> RecordedMask {
        self.calls.push(DrawCall::PopGroup);
        if self.group_depth == 0 {
            warn!("pop_group without matching push");
        } else {
            self.group_depth -= 1;
        }
        let mask = RecordedMask { id: self.next_mask };
        self.next_mask += 1;
        mask
    }

    fn mask(&mut self, mask: &RecordedMask) {
        self.calls.push(DrawCall::Mask(mask.id));
    }
}
