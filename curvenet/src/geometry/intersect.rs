// Robust segment-segment intersection with tolerances.
// Classifies proper crossings, endpoint touches, and collinear overlaps.

use super::math::orient;
use super::tolerance::clamp01;
use crate::model::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Proper interior intersection (not at endpoints within tolerance)
    Proper { t: f64, u: f64, at: Vec2 },
    // Touch at endpoints (may be both endpoints). t/u may be 0 or 1 within tolerance
    Touch { t: f64, u: f64, at: Vec2 },
    // Collinear overlapping span: parameter ranges on each segment (inclusive, ordered)
    CollinearOverlap { t0: f64, t1: f64, u0: f64, u1: f64 },
}

impl SegIntersection {
    /// The single crossing point, if the segments meet in one.
    pub fn point(&self) -> Option<Vec2> {
        match *self {
            SegIntersection::Proper { at, .. } | SegIntersection::Touch { at, .. } => Some(at),
            _ => None,
        }
    }
}

#[inline]
fn within_eps(x: f64, eps: f64) -> bool { x.abs() <= eps }

// Project segment AB and CD onto the dominant axis and compute parameter ranges for overlap.
fn collinear_overlap(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps: f64) -> SegIntersection {
    let x_major = (b.x - a.x).abs() >= (b.y - a.y).abs();
    let pick = |p: Vec2| if x_major { p.x } else { p.y };
    let (pa1, pa2, pc1, pc2) = (pick(a), pick(b), pick(c), pick(d));
    let len_ab = pa2 - pa1;
    let len_cd = pc2 - pc1;
    if within_eps(len_ab, eps) {
        // AB is a point: touch if it lies on CD
        let u = if within_eps(len_cd, eps) { 0.0 } else { (pa1 - pc1) / len_cd };
        if u < -eps || u > 1.0 + eps {
            return SegIntersection::None;
        }
        return SegIntersection::Touch { t: 0.0, u: clamp01(u), at: a };
    }
    let t_c1 = (pc1 - pa1) / len_ab;
    let t_c2 = (pc2 - pa1) / len_ab;
    let mut lo = t_c1.min(t_c2);
    let mut hi = t_c1.max(t_c2);
    if hi < -eps || lo > 1.0 + eps { return SegIntersection::None; }
    lo = lo.max(0.0);
    hi = hi.min(1.0);
    if hi < lo { return SegIntersection::None; }
    let u0 = if within_eps(len_cd, eps) { 0.0 } else { (pa1 + lo * len_ab - pc1) / len_cd };
    let u1 = if within_eps(len_cd, eps) { 0.0 } else { (pa1 + hi * len_ab - pc1) / len_cd };
    let (u0, u1) = if u0 <= u1 { (u0, u1) } else { (u1, u0) };
    SegIntersection::CollinearOverlap { t0: lo, t1: hi, u0, u1 }
}

pub fn intersect_segments(a: Vec2, b: Vec2, c: Vec2, d: Vec2, eps_pos: f64, eps_denom: f64) -> SegIntersection {
    let o1 = orient(a, b, c);
    let o2 = orient(a, b, d);
    let o3 = orient(c, d, a);
    let o4 = orient(c, d, b);

    if within_eps(o1, eps_pos) && within_eps(o2, eps_pos) && within_eps(o3, eps_pos) && within_eps(o4, eps_pos) {
        return collinear_overlap(a, b, c, d, eps_pos);
    }

    // Opposite signs (or zero) on both sides
    let inter1 = (o1 > 0.0 && o2 < 0.0) || (o1 < 0.0 && o2 > 0.0) || within_eps(o1, eps_pos) || within_eps(o2, eps_pos);
    let inter2 = (o3 > 0.0 && o4 < 0.0) || (o3 < 0.0 && o4 > 0.0) || within_eps(o3, eps_pos) || within_eps(o4, eps_pos);
    if !(inter1 && inter2) {
        return SegIntersection::None;
    }

    let r = b - a;
    let s = d - c;
    let rxs = r.cross(s);
    if within_eps(rxs, eps_denom) {
        // Parallel but not collinear (already handled)
        return SegIntersection::None;
    }
    let qp = c - a;
    let t = qp.cross(s) / rxs;
    let u = qp.cross(r) / rxs;
    let at = a + r * t;

    let is_touch = within_eps(t, eps_pos) || within_eps(1.0 - t, eps_pos) || within_eps(u, eps_pos) || within_eps(1.0 - u, eps_pos);

    if is_touch {
        SegIntersection::Touch { t: clamp01(t), u: clamp01(u), at }
    } else if t >= -eps_pos && t <= 1.0 + eps_pos && u >= -eps_pos && u <= 1.0 + eps_pos {
        SegIntersection::Proper { t, u, at }
    } else {
        SegIntersection::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EP: f64 = 1e-4;
    const ED: f64 = 1e-12;

    fn v(x: f64, y: f64) -> Vec2 { Vec2::new(x, y) }

    #[test]
    fn proper_cross() {
        let r = intersect_segments(v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0), EP, ED);
        match r {
            SegIntersection::Proper { t, u, at } => {
                assert!(t > 0.4 && t < 0.6);
                assert!(u > 0.4 && u < 0.6);
                assert!((at.x - 1.0).abs() < 1e-9 && (at.y - 1.0).abs() < 1e-9);
            }
            _ => panic!("expected proper"),
        }
    }

    #[test]
    fn endpoint_touch() {
        let r = intersect_segments(v(0.0, 0.0), v(1.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), EP, ED);
        match r {
            SegIntersection::Touch { t, u, at } => {
                assert!((at.x - 1.0).abs() < 1e-9 && at.y.abs() < 1e-9);
                assert!((t - 1.0).abs() < 1e-6);
                assert!(u.abs() < 1e-6);
            }
            _ => panic!("expected touch"),
        }
    }

    #[test]
    fn collinear_overlap_has_no_point() {
        let r = intersect_segments(v(0.0, 0.0), v(3.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), EP, ED);
        match r {
            SegIntersection::CollinearOverlap { t0, t1, .. } => assert!(t0 >= 0.33 && t1 <= 0.67),
            _ => panic!("expected overlap"),
        }
        assert_eq!(r.point(), None);
    }

    #[test]
    fn disjoint_segments() {
        let r = intersect_segments(v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0), v(1.0, 1.0), EP, ED);
        assert_eq!(r, SegIntersection::None);
    }
}
