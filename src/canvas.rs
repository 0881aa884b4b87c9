//! Software raster backend.
//!
//! `Canvas` implements `DrawingBackend` on an in-memory premultiplied RGBA
//! image. Fills use the non-zero rule; strokes use butt caps and round joins
//! and honor the dash pattern. Groups pushed with `push_group_alpha` are
//! alpha-only layers: while one is active all painting lands in it, and
//! popping it yields an `AlphaMask` that `mask` paints the source through.
//! As with cairo, dashing only affects `stroke`.
//!
//! Group layers keep one alpha value per rasterizer sample, not per pixel.
//! Each sample is either inside a shape or not, so additive painting
//! saturates per sample: shapes that overlap inside a partly covered pixel
//! count once, and shapes that share an edge split its samples exactly.

use log::{debug, warn};

use crate::backend::DrawingBackend;
use crate::color::Rgba;
use crate::comp_op::{blend_alpha, blend_rgba, CompOp};
use crate::path_storage::PathStorage;
use crate::rasterizer::{mask_coverage, RasterizerSs, SampleCoverage, SAMPLES_PER_PIXEL};
use crate::stroker::stroke_polygons;
use crate::vcgen_dash::VcgenDash;

// ============================================================================
// AlphaMask
// ============================================================================

/// Opacity buffer popped from an alpha-only group.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl AlphaMask {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Opacity at `(x, y)`; zero outside the mask.
    pub fn value(&self, x: usize, y: usize) -> f64 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            0.0
        }
    }
}

const SPP: usize = SAMPLES_PER_PIXEL as usize;

// ============================================================================
// Graphics state
// ============================================================================

#[derive(Debug, Clone)]
struct GraphicsState {
    source: Rgba,
    op: CompOp,
    line_width: f64,
    dash: Option<VcgenDash>,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            source: Rgba::black(),
            op: CompOp::SrcOver,
            line_width: 2.0,
            dash: None,
        }
    }
}

// ============================================================================
// Canvas
// ============================================================================

pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
    /// Alpha groups, `SPP` samples per pixel.
    groups: Vec<Vec<f64>>,
    path: PathStorage,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    ras: RasterizerSs,
    cov: SampleCoverage,
}

impl Canvas {
    /// A fully transparent `width × height` canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::no_color(); width * height],
            groups: Vec::new(),
            path: PathStorage::new(),
            state: GraphicsState::default(),
            saved: Vec::new(),
            ras: RasterizerSs::new(),
            cov: SampleCoverage::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill the whole base image with `color`, ignoring groups and operator.
    pub fn clear(&mut self, color: Rgba) {
        let mut c = color;
        c.premultiply();
        self.pixels.iter_mut().for_each(|p| *p = c);
    }

    pub fn source(&self) -> Rgba {
        self.state.source
    }

    pub fn operator(&self) -> CompOp {
        self.state.op
    }

    pub fn line_width(&self) -> f64 {
        self.state.line_width
    }

    /// Number of alpha groups currently pushed.
    pub fn group_depth(&self) -> usize {
        self.groups.len()
    }

    /// Straight (non-premultiplied) color of a base image pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let mut c = self.pixels[y * self.width + x];
        c.demultiply();
        c
    }

    /// The base image as 8-bit straight RGBA, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let mut c = *p;
            c.demultiply();
            out.extend_from_slice(&c.to_rgba8());
        }
        out
    }

    fn paint_coverage(&mut self) {
        let op = self.state.op;
        let source = self.state.source;
        let mut premul = source;
        premul.premultiply();
        let width = self.width;
        match self.groups.last_mut() {
            Some(group) => {
                for (x, y, mask) in self.cov.covered() {
                    let base = (y * width + x) * SPP;
                    for (bit, sample) in group[base..base + SPP].iter_mut().enumerate() {
                        if mask & (1 << bit) != 0 {
                            blend_alpha(op, sample, source.a, 1.0);
                        }
                    }
                }
            }
            None => {
                for (x, y, mask) in self.cov.covered() {
                    let cover = mask_coverage(mask);
                    blend_rgba(op, &mut self.pixels[y * width + x], &premul, cover);
                }
            }
        }
    }
}

impl DrawingBackend for Canvas {
    type Mask = AlphaMask;

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.path.close_polygon();
    }

    fn new_path(&mut self) {
        self.path.remove_all();
    }

    fn copy_path_flat(&self) -> PathStorage {
        self.path.clone()
    }

    fn fill(&mut self) {
        self.ras.reset();
        self.ras.add_path(&mut self.path, 0);
        self.cov.clear();
        self.ras.rasterize(&mut self.cov);
        self.paint_coverage();
        self.path.remove_all();
    }

    fn stroke(&mut self) {
        let polygons = stroke_polygons(&self.path, self.state.line_width, self.state.dash.as_ref());
        self.cov.clear();
        for poly in &polygons {
            self.ras.reset();
            self.ras.add_polygon(poly);
            self.ras.rasterize(&mut self.cov);
        }
        self.paint_coverage();
        self.path.remove_all();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_dash(&mut self, dashes: &[f64], offset: f64) {
        if dashes.is_empty() {
            self.state.dash = None;
            return;
        }
        let mut dash = VcgenDash::new();
        dash.set_dashes(dashes);
        if !dash.is_valid() {
            warn!("ignoring invalid dash pattern {:?}", dashes);
            self.state.dash = None;
            return;
        }
        dash.dash_start(offset);
        self.state.dash = Some(dash);
    }

    fn set_source_rgba(&mut self, color: Rgba) {
        self.state.source = color;
    }

    fn set_operator(&mut self, op: CompOp) {
        self.state.op = op;
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => warn!("restore without matching save"),
        }
    }

    fn push_group_alpha(&mut self) {
        self.groups.push(vec![0.0; self.width * self.height * SPP]);
        debug!("pushed alpha group, depth {}", self.groups.len());
    }

    fn pop_group(&mut self) -> AlphaMask {
        match self.groups.pop() {
            Some(samples) => AlphaMask {
                width: self.width,
                height: self.height,
                data: samples
                    .chunks_exact(SPP)
                    .map(|px| px.iter().sum::<f64>() / SPP as f64)
                    .collect(),
            },
            None => {
                warn!("pop_group without matching push");
                AlphaMask::empty(self.width, self.height)
            }
        }
    }

    fn mask(&mut self, mask: &AlphaMask) {
        let op = self.state.op;
        let source = self.state.source;
        let mut premul = source;
        premul.premultiply();
        let width = self.width;
        for y in 0..self.height {
            for x in 0..width {
                let cover = mask.value(x, y);
                if cover <= 0.0 {
                    continue;
                }
                match self.groups.last_mut() {
                    Some(group) => {
                        let base = (y * width + x) * SPP;
                        for sample in &mut group[base..base + SPP] {
                            blend_alpha(op, sample, source.a, cover);
                        }
                    }
                    None => blend_rgba(op, &mut self.pixels[y * width + x], &premul, cover),
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
