//! Compositing operators for the canvas backend.
//!
//! Blending works on premultiplied f64 data. `cover` is the fraction of the
//! pixel covered by the shape being painted; it scales the source before the
//! operator formula is applied (for `Clear` and `Src` it interpolates between
//! the old and the new pixel instead).

use crate::color::Rgba;

/// Compositing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompOp {
    Clear,
    Src,
    #[default]
    SrcOver,
    /// Additive: `Dca' = Sca + Dca`, clamped to 1.
    Plus,
}

// ---- Clear: Dca' = 0, Da' = 0
// ---- Src: Dca' = Sca, Da' = Sa
// ---- SrcOver: Dca' = Sca + Dca.(1 - Sa)
// ---- Plus: Dca' = Sca + Dca (clamped)

/// Blend premultiplied `src` into premultiplied `dst`.
#[inline]
pub fn blend_rgba(op: CompOp, dst: &mut Rgba, src: &Rgba, cover: f64) {
    if cover <= 0.0 {
        return;
    }
    let cover = cover.min(1.0);
    match op {
        CompOp::Clear => {
            *dst = dst.scaled(1.0 - cover);
        }
        CompOp::Src => {
            let s = src.scaled(cover);
            let d = dst.scaled(1.0 - cover);
            *dst = Rgba::new(d.r + s.r, d.g + s.g, d.b + s.b, d.a + s.a);
        }
        CompOp::SrcOver => {
            let s = src.scaled(cover);
            let k = 1.0 - s.a;
            *dst = Rgba::new(
                s.r + dst.r * k,
                s.g + dst.g * k,
                s.b + dst.b * k,
                s.a + dst.a * k,
            );
        }
        CompOp::Plus => {
            let s = src.scaled(cover);
            if s.a > 0.0 {
                let a = (dst.a + s.a).min(1.0);
                *dst = Rgba::new(
                    (dst.r + s.r).min(a),
                    (dst.g + s.g).min(a),
                    (dst.b + s.b).min(a),
                    a,
                );
            }
        }
    }
}

/// Blend a source alpha into an alpha-only pixel.
#[inline]
pub fn blend_alpha(op: CompOp, dst: &mut f64, src_a: f64, cover: f64) {
    if cover <= 0.0 {
        return;
    }
    let cover = cover.min(1.0);
    let s = src_a * cover;
    *dst = match op {
        CompOp::Clear => *dst * (1.0 - cover),
        CompOp::Src => *dst * (1.0 - cover) + s,
        CompOp::SrcOver => s + *dst * (1.0 - s),
        CompOp::Plus => (*dst + s).min(1.0),
    };
}
