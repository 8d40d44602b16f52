//! Edge curve construction: support point, boundary endpoints and samples.

use crate::algorithms::arrowhead::arrowhead;
use crate::error::Result;
use crate::geometry::math::{normalize_or, DEFAULT_DIRECTION};
use crate::geometry::spline::sample_spline;
use crate::geometry::tolerance::{safe_div, EPS_LEN};
use crate::model::{Disc, EdgeId, GeometryModel, Vec2};
use tracing::warn;

/// Samples for loops, which are tight and always strongly curved.
pub const LOOP_SAMPLES: usize = 32;

/// Pixel sizes the builder needs, already scaled for the current zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveParams {
    pub offset_distance: f64,
    pub loop_offset_distance: f64,
    pub arrow_length: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
    pub support: Vec2,
    pub start: Vec2,
    pub end: Vec2,
    pub curve: Vec<Vec2>,
}

/// Sample density for a bowed edge between centers `p1` and `p2`.
pub fn sample_count(p1: Vec2, p2: Vec2) -> usize {
    let d = p1.dist(p2);
    if d < 100.0 {
        12
    } else if d >= 400.0 {
        32
    } else {
        24
    }
}

/// Support point of the `k`-th edge between `p1` and `p2`, `|k| * d` away
/// from the center line on the side given by the sign of `k`.
pub fn support_point(p1: Vec2, p2: Vec2, k: i32, d: f64) -> Vec2 {
    let v = (p2 - p1) * 0.5;
    let u = Vec2::new(v.y, -v.x);
    let mid = p1 + v;
    let uu = u.len_sq();
    if uu <= EPS_LEN {
        return mid;
    }
    let dk = d * k as f64;
    let s = (k.signum() as f64) * safe_div(dk * dk, uu, 0.0).sqrt();
    mid + u * s
}

/// Support point of the `k`-th loop on a vertex, stacked above the circle.
pub fn loop_support(center: Vec2, radius: f64, k: i32, loop_distance: f64) -> Vec2 {
    Vec2::new(center.x, center.y - radius - loop_distance * k.unsigned_abs() as f64)
}

/// Point `distance` away from `center` in the direction of `toward`.
pub fn boundary_point(center: Vec2, toward: Vec2, distance: f64) -> Vec2 {
    let dir = toward - center;
    if dir.len_sq() <= EPS_LEN {
        warn!(x = center.x, y = center.y, "degenerate boundary direction, using default");
    }
    center + normalize_or(dir, DEFAULT_DIRECTION) * distance
}

/// Geometry of a non-loop edge from disc `a` (clearance `ca`) to disc `b`.
pub fn build_edge<D: Disc>(a: &D, ca: f64, b: &D, cb: f64, k: i32, params: &CurveParams) -> EdgeGeometry {
    let (p1, p2) = (a.center(), b.center());
    let support = support_point(p1, p2, k, params.offset_distance);
    let start = boundary_point(p1, support, ca);
    let end = boundary_point(p2, support, cb);
    let curve = if k == 0 {
        vec![start, end]
    } else {
        sample_spline(&[start, support, end], sample_count(p1, p2))
    };
    EdgeGeometry { support, start, end, curve }
}

/// Geometry of the `k`-th loop on disc `v`. The curve leaves toward the left
/// helper point, crosses over the support point and returns from the right.
pub fn build_loop<D: Disc>(v: &D, clearance: f64, k: i32, params: &CurveParams) -> EdgeGeometry {
    let c = v.center();
    let support = loop_support(c, v.radius(), k, params.loop_offset_distance);
    let spread = params.loop_offset_distance * k as f64;
    let left = Vec2::new(support.x - spread, support.y);
    let right = Vec2::new(support.x + spread, support.y);
    let start = boundary_point(c, left, clearance);
    let end = boundary_point(c, right, clearance);
    let curve = sample_spline(&[start, left, right, end], LOOP_SAMPLES);
    EdgeGeometry { support, start, end, curve }
}

/// Rebuilds the derived geometry of edge `id` from its offset and endpoints.
/// The label is reset to the support point.
pub fn rebuild_edge(model: &mut GeometryModel, id: EdgeId, params: &CurveParams) -> Result<()> {
    let e = model.require_edge(id)?;
    let (pred, succ, k, directed) = (e.pred, e.succ, e.offset, e.directed);
    let a = model.require_vertex(pred)?;
    let geom = if e.is_loop {
        build_loop(a, a.clearance(), k, params)
    } else {
        let b = model.require_vertex(succ)?;
        build_edge(a, a.clearance(), b, b.clearance(), k, params)
    };
    let arrow = if directed { arrowhead(&geom.curve, params.arrow_length) } else { None };
    if let Some(e) = model.edge_mut(id) {
        e.support = geom.support;
        e.start = geom.start;
        e.end = geom.end;
        e.curve = geom.curve;
        e.label = geom.support;
        e.arrow = arrow;
    }
    Ok(())
}
