//! Attachment point: the spot on a vertex's circle least likely to be covered
//! by its incident edges.

use crate::geometry::math::{norm2, normalize_or, sweep_angle_deg, DEFAULT_DIRECTION};
use crate::geometry::tolerance::{approx_eq, near_zero, EPS_ANG_DEG, EPS_LEN};
use crate::model::{Disc, GeometryModel, Vec2, VertexId};
use std::f64::consts::PI;

/// Attachment point of `disc` given the boundary endpoints of its incident
/// edges (in incidence order). The result always lies on the circle.
pub fn attachment_point<D: Disc>(disc: &D, endpoints: &[Vec2]) -> Vec2 {
    let c = disc.center();
    let r = disc.radius();
    match endpoints {
        [] => Vec2::new(c.x, c.y + r),
        [b] => c + normalize_or(c - *b, Vec2::new(0.0, 1.0)) * r,
        _ => c + widest_gap_direction(c, r, endpoints) * r,
    }
}

/// Unit vector bisecting the widest arc between consecutive endpoints.
fn widest_gap_direction(c: Vec2, r: f64, endpoints: &[Vec2]) -> Vec2 {
    let origin = endpoints[0] - c;
    let mut around: Vec<(f64, Vec2)> = endpoints
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let v = *p - c;
            (if i == 0 { 0.0 } else { sweep_angle_deg(origin, v) }, v)
        })
        .collect();
    around.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = around.len();
    let mut best = (0, 0.0, f64::NEG_INFINITY); // (index, delta, arc)
    for i in 0..n {
        let next = (i + 1) % n;
        let delta = if next == 0 { 360.0 - around[i].0 + around[0].0 } else { around[next].0 - around[i].0 };
        let arc = PI * r * (delta / 180.0);
        if arc > best.2 {
            best = (i, delta, arc);
        }
    }
    let (i, delta, _) = best;
    let (lo, v1) = around[i];
    let v2 = around[(i + 1) % n].1;

    let u1 = normalize_or(v1, DEFAULT_DIRECTION);
    let sum = u1 + normalize_or(v2, DEFAULT_DIRECTION);
    let dir = match norm2(sum) {
        (Some(u), _) if !approx_eq(delta, 180.0, EPS_ANG_DEG) => u,
        // opposite bounds: any perpendicular bisects, the side check picks one
        _ => Vec2::new(u1.y, -u1.x),
    };
    if within_arc(origin, dir, lo, lo + delta) { dir } else { -dir }
}

/// Whether `v` lies strictly inside the sweep `(lo, hi)` measured from `origin`.
fn within_arc(origin: Vec2, v: Vec2, lo: f64, hi: f64) -> bool {
    if near_zero(v.len_sq(), EPS_LEN) {
        return false;
    }
    let a = sweep_angle_deg(origin, v);
    a > lo + EPS_ANG_DEG && a < hi - EPS_ANG_DEG
}

/// Recomputes and stores the attachment point of vertex `id`.
pub fn update_vertex(model: &mut GeometryModel, id: VertexId) -> Option<Vec2> {
    let endpoints = model.endpoints_on(id);
    let p = attachment_point(model.vertex(id)?, &endpoints);
    model.vertex_mut(id)?.attachment = p;
    Some(p)
}
