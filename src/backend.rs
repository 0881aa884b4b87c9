//! Drawing backend interface.
//!
//! An immediate-mode 2D context in the style of cairo: a current path built
//! with `move_to`/`line_to`/`close_path`, consumed by `fill` or `stroke`, a
//! graphics state (source color, operator, line width, dash) that can be
//! saved and restored, and offscreen alpha-only groups that can be popped and
//! used as a mask.
//!
//! The stroke renderers talk to the surface only through this trait.

use crate::color::Rgba;
use crate::comp_op::CompOp;
use crate::path_storage::PathStorage;

pub trait DrawingBackend {
    /// Opacity buffer produced by `pop_group`.
    type Mask;

    // Path construction
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    /// Discard the current path.
    fn new_path(&mut self);
    /// Copy of the current path with curves replaced by line segments.
    fn copy_path_flat(&self) -> PathStorage;

    // Drawing. Both consume the current path.
    fn fill(&mut self);
    fn stroke(&mut self);

    // Graphics state
    fn set_line_width(&mut self, width: f64);
    /// Set the dash pattern; an empty slice disables dashing.
    fn set_dash(&mut self, dashes: &[f64], offset: f64);
    fn set_source_rgba(&mut self, color: Rgba);
    fn set_operator(&mut self, op: CompOp);
    fn save(&mut self);
    fn restore(&mut self);

    // Offscreen compositing
    /// Redirect drawing to a new, fully transparent, alpha-only group.
    fn push_group_alpha(&mut self);
    /// End the innermost group and return its contents.
    fn pop_group(&mut self) -> Self::Mask;
    /// Paint the current source through `mask` onto the current target.
    fn mask(&mut self, mask: &Self::Mask);
}
