//! Interpolating splines for edge curves.
//!
//! Control points are joined by a uniform Catmull-Rom spline. Each span is
//! converted to its cubic Bézier form and sampled at evenly spaced global
//! parameters, so the sample count is independent of the number of spans.

use crate::model::Vec2;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // First control point
    pub p2: Vec2, // Second control point
    pub p3: Vec2, // End point
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Catmull-Rom span from `b` to `c` with neighbours `a` and `d`.
    pub fn from_catmull_rom(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> Self {
        Self::new(b, b + (c - a) * (1.0 / 6.0), c - (d - b) * (1.0 / 6.0), c)
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f64) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;
        self.p0 * mt3 + self.p1 * (3.0 * mt2 * t) + self.p2 * (3.0 * mt * t2) + self.p3 * t3
    }
}

/// Bézier spans of the Catmull-Rom spline through `ctrl`. The missing outer
/// neighbours are reflected through the first and last control points.
pub fn catmull_rom_spans(ctrl: &[Vec2]) -> Vec<CubicBezier> {
    let n = ctrl.len();
    if n < 2 {
        return Vec::new();
    }
    let at = |i: isize| -> Vec2 {
        if i < 0 {
            ctrl[0] * 2.0 - ctrl[1]
        } else if i as usize >= n {
            ctrl[n - 1] * 2.0 - ctrl[n - 2]
        } else {
            ctrl[i as usize]
        }
    };
    (0..n - 1)
        .map(|s| {
            let s = s as isize;
            CubicBezier::from_catmull_rom(at(s - 1), at(s), at(s + 1), at(s + 2))
        })
        .collect()
}

/// `samples` points along the spline through `ctrl`, first and last pinned to
/// the first and last control points.
pub fn sample_spline(ctrl: &[Vec2], samples: usize) -> Vec<Vec2> {
    match ctrl.len() {
        0 => return Vec::new(),
        1 => return vec![ctrl[0]],
        _ => {}
    }
    let spans = catmull_rom_spans(ctrl);
    let samples = samples.max(2);
    let last_span = spans.len() - 1;
    let step = spans.len() as f64 / (samples - 1) as f64;
    let mut out = Vec::with_capacity(samples);
    for i in 0..samples {
        let u = i as f64 * step;
        let span = (u.floor() as usize).min(last_span);
        out.push(spans[span].eval(u - span as f64));
    }
    out[0] = ctrl[0];
    out[samples - 1] = ctrl[ctrl.len() - 1];
    out
}
