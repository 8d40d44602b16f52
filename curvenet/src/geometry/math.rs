use super::tolerance::{clamp01, EPS_LEN};
use crate::model::Vec2;

/// Direction used whenever a vector is too short to normalize.
pub const DEFAULT_DIRECTION: Vec2 = Vec2 { x: 1.0, y: 0.0 };

/// Squared distance from `p` to segment `a`-`b`, and the clamped parameter of the foot point.
pub fn seg_distance_sq(p: Vec2, a: Vec2, b: Vec2) -> (f64, f64) {
    let v = b - a;
    let w = p - a;
    let vv = v.len_sq();
    let t = if vv > 0.0 { clamp01(w.dot(v) / vv) } else { 0.0 };
    let proj = a + v * t;
    (p.dist_sq(proj), t)
}

/// Unit vector of `v`, or `fallback` when `v` is (near) zero length.
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    let len = v.len();
    if len > EPS_LEN && len.is_finite() {
        v * (1.0 / len)
    } else {
        fallback
    }
}

/// Returns `(unit, len)`; `unit` is `None` for degenerate input.
#[inline]
pub fn norm2(v: Vec2) -> (Option<Vec2>, f64) {
    let len = v.len();
    if len > EPS_LEN { (Some(v * (1.0 / len)), len) } else { (None, 0.0) }
}

/// Orientation of `c` relative to the directed line `a` -> `b`.
#[inline]
pub fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    (b - a).cross(c - a)
}

/// Angle in degrees, in `[0, 360)`, swept from `origin` to `v`. Vectors lying
/// on the negative cross-product side of `origin` report `360 - angle`.
pub fn sweep_angle_deg(origin: Vec2, v: Vec2) -> f64 {
    let denom = origin.len() * v.len();
    if denom <= EPS_LEN {
        return 0.0;
    }
    let cos = (origin.dot(v) / denom).clamp(-1.0, 1.0);
    let deg = cos.acos().to_degrees();
    let angle = if origin.cross(v) < 0.0 { 360.0 - deg } else { deg };
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Axis-aligned bounds of a point run as (minx, miny, maxx, maxy).
pub fn bounds(points: &[Vec2]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut b = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        b.0 = b.0.min(p.x);
        b.1 = b.1.min(p.y);
        b.2 = b.2.max(p.x);
        b.3 = b.3.max(p.y);
    }
    Some(b)
}

#[inline]
pub fn bounds_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64), pad: f64) -> bool {
    a.0 <= b.2 + pad && b.0 <= a.2 + pad && a.1 <= b.3 + pad && b.1 <= a.3 + pad
}
