//! Dash generator.
//!
//! Splits a polyline into the "on" runs of a dash pattern. The pattern is a
//! list of alternating dash/gap lengths; `dash_start` shifts the phase so a
//! pattern can continue seamlessly from where a previous piece left off.

use crate::basics::PointD;
use crate::math::calc_distance;

// ============================================================================
// VcgenDash
// ============================================================================

/// Dash pattern state.
#[derive(Debug, Clone, Default)]
pub struct VcgenDash {
    dashes: Vec<f64>,
    total_dash_len: f64,
    dash_start: f64,
    curr_dash: usize,
    curr_dash_start: f64,
}

impl VcgenDash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove_all_dashes(&mut self) {
        self.dashes.clear();
        self.total_dash_len = 0.0;
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
    }

    pub fn add_dash(&mut self, dash_len: f64, gap_len: f64) {
        self.total_dash_len += dash_len + gap_len;
        self.dashes.push(dash_len);
        self.dashes.push(gap_len);
    }

    /// Replace the pattern with `dashes`. An odd-length list is repeated once
    /// so that dashes and gaps alternate on every period.
    pub fn set_dashes(&mut self, dashes: &[f64]) {
        self.remove_all_dashes();
        let repeated: Vec<f64> = if dashes.len() % 2 == 1 {
            dashes.iter().chain(dashes).copied().collect()
        } else {
            dashes.to_vec()
        };
        for pair in repeated.chunks_exact(2) {
            self.add_dash(pair[0], pair[1]);
        }
        self.calc_dash_start(self.dash_start);
    }

    /// A pattern is usable when it has entries, none negative, and a
    /// positive period.
    pub fn is_valid(&self) -> bool {
        !self.dashes.is_empty()
            && self.dashes.iter().all(|d| *d >= 0.0 && d.is_finite())
            && self.total_dash_len > 0.0
    }

    pub fn dash_start(&mut self, ds: f64) {
        self.dash_start = ds;
        self.calc_dash_start(ds);
    }

    fn calc_dash_start(&mut self, ds: f64) {
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
        if !self.is_valid() {
            return;
        }
        let mut ds = ds.rem_euclid(self.total_dash_len);
        while ds > 0.0 {
            if ds > self.dashes[self.curr_dash] {
                ds -= self.dashes[self.curr_dash];
                self.curr_dash += 1;
                if self.curr_dash >= self.dashes.len() {
                    self.curr_dash = 0;
                }
            } else {
                self.curr_dash_start = ds;
                ds = 0.0;
            }
        }
    }

    /// Split the polyline `pts` into dash runs. Each run is a polyline of at
    /// least two points. Returns no runs for an invalid pattern.
    pub fn dash_polyline(&self, pts: &[PointD]) -> Vec<Vec<PointD>> {
        let mut runs = Vec::new();
        if !self.is_valid() || pts.is_empty() {
            return runs;
        }

        let mut curr_dash = self.curr_dash;
        let mut rest = self.dashes[curr_dash] - self.curr_dash_start;
        let mut run: Vec<PointD> = Vec::new();
        if curr_dash % 2 == 0 {
            run.push(pts[0]);
        }

        for w in pts.windows(2) {
            let (v1, v2) = (w[0], w[1]);
            let len = calc_distance(v1.x, v1.y, v2.x, v2.y);
            let mut t = 0.0;
            while len - t > rest {
                t += rest;
                let k = t / len;
                let p = PointD::new(v1.x + (v2.x - v1.x) * k, v1.y + (v2.y - v1.y) * k);
                if curr_dash % 2 == 0 {
                    run.push(p);
                    if run.len() >= 2 {
                        runs.push(std::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                } else {
                    run.clear();
                    run.push(p);
                }
                curr_dash += 1;
                if curr_dash >= self.dashes.len() {
                    curr_dash = 0;
                }
                rest = self.dashes[curr_dash];
            }
            rest -= len - t;
            if curr_dash % 2 == 0 {
                run.push(v2);
            }
        }
        if run.len() >= 2 {
            runs.push(run);
        }
        runs
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64) -> Vec<PointD> {
        vec![PointD::new(0.0, 0.0), PointD::new(x1, 0.0)]
    }

    fn run_extents(runs: &[Vec<PointD>]) -> Vec<(f64, f64)> {
        runs.iter()
            .map(|r| (r[0].x, r[r.len() - 1].x))
            .collect()
    }

    fn close(a: &[(f64, f64)], b: &[(f64, f64)]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(p, q)| (p.0 - q.0).abs() < 1e-9 && (p.1 - q.1).abs() < 1e-9)
    }

    #[test]
    fn test_no_dashes_produces_nothing() {
        let gen = VcgenDash::new();
        assert!(!gen.is_valid());
        assert!(gen.dash_polyline(&line(100.0)).is_empty());
    }

    #[test]
    fn test_basic_dash_pattern() {
        let mut gen = VcgenDash::new();
        gen.add_dash(20.0, 10.0);
        let runs = gen.dash_polyline(&line(100.0));
        let expected = [(0.0, 20.0), (30.0, 50.0), (60.0, 80.0), (90.0, 100.0)];
        assert!(close(&run_extents(&runs), &expected), "{:?}", runs);
    }

    #[test]
    fn test_dash_start_offset() {
        let mut gen = VcgenDash::new();
        gen.add_dash(20.0, 10.0);
        gen.dash_start(15.0);
        let runs = gen.dash_polyline(&line(60.0));
        let expected = [(0.0, 5.0), (15.0, 35.0), (45.0, 60.0)];
        assert!(close(&run_extents(&runs), &expected), "{:?}", runs);
    }

    #[test]
    fn test_dash_start_wraps_period() {
        let mut a = VcgenDash::new();
        a.add_dash(4.0, 2.0);
        a.dash_start(1.0);
        let mut b = VcgenDash::new();
        b.add_dash(4.0, 2.0);
        b.dash_start(13.0);
        let mut c = VcgenDash::new();
        c.add_dash(4.0, 2.0);
        c.dash_start(-5.0);
        let pts = line(30.0);
        let ra = run_extents(&a.dash_polyline(&pts));
        assert!(close(&ra, &run_extents(&b.dash_polyline(&pts))));
        assert!(close(&ra, &run_extents(&c.dash_polyline(&pts))));
    }

    #[test]
    fn test_start_in_gap() {
        let mut gen = VcgenDash::new();
        gen.add_dash(4.0, 2.0);
        gen.dash_start(5.0);
        let runs = gen.dash_polyline(&line(10.0));
        let expected = [(1.0, 5.0), (7.0, 10.0)];
        assert!(close(&run_extents(&runs), &expected), "{:?}", runs);
    }

    #[test]
    fn test_dash_runs_across_vertices() {
        let mut gen = VcgenDash::new();
        gen.add_dash(8.0, 2.0);
        let pts = vec![
            PointD::new(0.0, 0.0),
            PointD::new(5.0, 0.0),
            PointD::new(5.0, 5.0),
        ];
        let runs = gen.dash_polyline(&pts);
        assert_eq!(runs.len(), 1);
        // The dash bends around the corner and stops 3 units up.
        assert_eq!(runs[0].len(), 3);
        assert!((runs[0][2].y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_odd_pattern_is_repeated() {
        let mut gen = VcgenDash::new();
        gen.set_dashes(&[3.0]);
        let runs = gen.dash_polyline(&line(12.0));
        let expected = [(0.0, 3.0), (6.0, 9.0)];
        assert!(close(&run_extents(&runs), &expected), "{:?}", runs);
    }

    #[test]
    fn test_invalid_patterns() {
        let mut gen = VcgenDash::new();
        gen.set_dashes(&[0.0, 0.0]);
        assert!(!gen.is_valid());
        gen.set_dashes(&[4.0, -1.0]);
        assert!(!gen.is_valid());
        gen.set_dashes(&[0.0, 2.0]);
        assert!(gen.is_valid());
        // Zero-length dashes yield degenerate runs only.
        let runs = gen.dash_polyline(&line(10.0));
        for r in &runs {
            assert!((r[0].x - r[r.len() - 1].x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_remove_all_dashes() {
        let mut gen = VcgenDash::new();
        gen.add_dash(10.0, 5.0);
        gen.remove_all_dashes();
        assert!(gen.dash_polyline(&line(100.0)).is_empty());
    }
}
