use crate::geometry::math::{normalize_or, DEFAULT_DIRECTION};
use crate::geometry::tolerance::EPS_POS;
use crate::model::{Arrowhead, Vec2};

/// Arrowhead at the end of `curve`, aligned with the last non-degenerate
/// segment. Its wings sit `length` back from the tip, `length / 2` to each side.
pub fn arrowhead(curve: &[Vec2], length: f64) -> Option<Arrowhead> {
    if !(length > 0.0) {
        return None;
    }
    let tip = *curve.last()?;
    let tail = curve
        .iter()
        .rev()
        .skip(1)
        .find(|p| p.dist_sq(tip) > EPS_POS * EPS_POS)
        .copied()
        .unwrap_or(tip - DEFAULT_DIRECTION);
    let dir = normalize_or(tip - tail, DEFAULT_DIRECTION);
    let base = tip - dir * length;
    let normal = Vec2::new(-dir.y, dir.x) * (length * 0.5);
    Some(Arrowhead { tip, left: base + normal, right: base - normal })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_points_along_last_segment() {
        let a = arrowhead(&[Vec2::new(0.0, 0.0), Vec2::new(88.0, 0.0)], 10.0).unwrap();
        assert_eq!(a.tip, Vec2::new(88.0, 0.0));
        assert!((a.left.x - 78.0).abs() < 1e-9 && (a.left.y - 5.0).abs() < 1e-9);
        assert!((a.right.x - 78.0).abs() < 1e-9 && (a.right.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_length_or_empty_curve_has_no_arrow() {
        assert!(arrowhead(&[], 10.0).is_none());
        assert!(arrowhead(&[Vec2::ZERO, Vec2::new(1.0, 0.0)], 0.0).is_none());
    }

    #[test]
    fn collapsed_curve_uses_default_direction() {
        let a = arrowhead(&[Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0)], 4.0).unwrap();
        assert!(a.left.is_finite() && a.right.is_finite());
        assert!((a.left.x + 1.0).abs() < 1e-9 && (a.left.y - 5.0).abs() < 1e-9);
    }
}
