//! Supersampling polygon rasterizer.
//!
//! Each pixel is sampled on a regular 4×4 grid; a shape's coverage of a pixel
//! is the fraction of samples inside it. Samples are classified with a
//! half-open rule (an edge owns the samples on its left side but not those
//! exactly on it), so two polygons sharing an edge partition the samples along
//! it exactly: painting both additively gives full coverage with no seam.
//!
//! Contours are added with `move_to_d` / `line_to_d` / `close_polygon` (or
//! `add_path`) and are closed implicitly when rasterized.

use crate::basics::{is_close, is_move_to, is_stop, is_vertex, PointD, VertexSource};

/// Samples per pixel along each axis.
pub const SUBPIXEL_SAMPLES: usize = 4;
/// Samples per pixel.
pub const SAMPLES_PER_PIXEL: u32 = (SUBPIXEL_SAMPLES * SUBPIXEL_SAMPLES) as u32;

/// Fraction of the samples set in a pixel mask, in `[0, 1]`.
#[inline]
pub fn mask_coverage(mask: u16) -> f64 {
    mask.count_ones() as f64 / SAMPLES_PER_PIXEL as f64
}

// ============================================================================
// SampleCoverage
// ============================================================================

/// Per-pixel sample masks for a `width × height` area.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleCoverage {
    width: usize,
    height: usize,
    masks: Vec<u16>,
}

impl SampleCoverage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            masks: vec![0; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.masks.iter_mut().for_each(|m| *m = 0);
    }

    #[inline]
    fn set_sample(&mut self, sx: usize, sy: usize) {
        let (px, py) = (sx / SUBPIXEL_SAMPLES, sy / SUBPIXEL_SAMPLES);
        let bit = (sy % SUBPIXEL_SAMPLES) * SUBPIXEL_SAMPLES + sx % SUBPIXEL_SAMPLES;
        self.masks[py * self.width + px] |= 1 << bit;
    }

    /// Iterate `(x, y, mask)` over pixels with any sample set. Bit
    /// `sy * 4 + sx` of `mask` is sample `(sx, sy)` of the pixel.
    pub fn covered(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        self.masks
            .iter()
            .enumerate()
            .filter(|(_, m)| **m != 0)
            .map(|(i, m)| (i % self.width, i / self.width, *m))
    }
}

// ============================================================================
// RasterizerSs
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Edge {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    winding: i32,
}

/// Polygon rasterizer writing into a `SampleCoverage`.
#[derive(Debug, Default)]
pub struct RasterizerSs {
    edges: Vec<Edge>,
    start: Option<PointD>,
    current: PointD,
}

impl RasterizerSs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all contours.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.start = None;
    }

    pub fn move_to_d(&mut self, x: f64, y: f64) {
        self.close_polygon();
        self.start = Some(PointD::new(x, y));
        self.current = PointD::new(x, y);
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        if self.start.is_none() {
            self.move_to_d(x, y);
            return;
        }
        let to = PointD::new(x, y);
        self.add_edge(self.current, to);
        self.current = to;
    }

    pub fn close_polygon(&mut self) {
        if let Some(start) = self.start {
            self.add_edge(self.current, start);
            self.current = start;
        }
    }

    /// Add every contour of `vs`. Drawing commands other than move/close are
    /// taken as straight lines to their end point.
    pub fn add_path<VS: VertexSource + ?Sized>(&mut self, vs: &mut VS, path_id: u32) {
        vs.rewind(path_id);
        loop {
            let (mut x, mut y) = (0.0, 0.0);
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_move_to(cmd) {
                self.move_to_d(x, y);
            } else if is_vertex(cmd) {
                self.line_to_d(x, y);
            } else if is_close(cmd) {
                self.close_polygon();
            }
        }
    }

    /// Add a closed polygon.
    pub fn add_polygon(&mut self, pts: &[PointD]) {
        if let Some((first, rest)) = pts.split_first() {
            self.move_to_d(first.x, first.y);
            for p in rest {
                self.line_to_d(p.x, p.y);
            }
            self.close_polygon();
        }
    }

    fn add_edge(&mut self, a: PointD, b: PointD) {
        if a.y == b.y {
            return;
        }
        let edge = if a.y < b.y {
            Edge {
                x0: a.x,
                y0: a.y,
                x1: b.x,
                y1: b.y,
                winding: 1,
            }
        } else {
            Edge {
                x0: b.x,
                y0: b.y,
                x1: a.x,
                y1: a.y,
                winding: -1,
            }
        };
        self.edges.push(edge);
    }

    /// Set the samples inside the current contours on `cov` (union with what
    /// is already there). Contours stay in the rasterizer.
    pub fn rasterize(&mut self, cov: &mut SampleCoverage) {
        self.close_polygon();
        if self.edges.is_empty() {
            return;
        }

        let scale = SUBPIXEL_SAMPLES as f64;
        let rows = cov.height * SUBPIXEL_SAMPLES;
        let cols = (cov.width * SUBPIXEL_SAMPLES) as i64;

        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for e in &self.edges {
            min_y = min_y.min(e.y0);
            max_y = max_y.max(e.y1);
        }
        let first_row = ((min_y * scale - 0.5).ceil().max(0.0)) as usize;
        let last_row = ((max_y * scale - 0.5).ceil().max(0.0) as usize).min(rows);

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for sy in first_row..last_row {
            let y = (sy as f64 + 0.5) / scale;
            crossings.clear();
            for e in &self.edges {
                if y >= e.y0 && y < e.y1 {
                    let x = e.x0 + (y - e.y0) * (e.x1 - e.x0) / (e.y1 - e.y0);
                    crossings.push((x, e.winding));
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for i in 0..crossings.len() {
                winding += crossings[i].1;
                if winding == 0 || i + 1 >= crossings.len() {
                    continue;
                }
                // Sample column k sits at x = (k + 0.5) / scale; take [xa, xb).
                let xa = crossings[i].0;
                let xb = crossings[i + 1].0;
                let k0 = ((xa * scale - 0.5).ceil() as i64).max(0);
                let k1 = ((xb * scale - 0.5).ceil() as i64).min(cols);
                for k in k0..k1 {
                    cov.set_sample(k as usize, sy);
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
