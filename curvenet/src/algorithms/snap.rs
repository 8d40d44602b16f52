//! Vertex position assistance (VPAS): axis snapping for a single dragged vertex.

use crate::model::{Disc, Vec2};

/// Snaps each axis of `candidate` independently to the nearest neighbour
/// center within `tolerance` on that axis. Ties keep the earliest neighbour.
pub fn snap_position<'a, D, I>(candidate: Vec2, tolerance: f64, neighbours: I) -> Vec2
where
    D: Disc + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let mut best_x: Option<(f64, f64)> = None; // (distance, value)
    let mut best_y: Option<(f64, f64)> = None;
    for n in neighbours {
        let c = n.center();
        let dx = (c.x - candidate.x).abs();
        if dx <= tolerance && best_x.map_or(true, |(d, _)| dx < d) {
            best_x = Some((dx, c.x));
        }
        let dy = (c.y - candidate.y).abs();
        if dy <= tolerance && best_y.map_or(true, |(d, _)| dy < d) {
            best_y = Some((dy, c.y));
        }
    }
    Vec2::new(
        best_x.map_or(candidate.x, |(_, x)| x),
        best_y.map_or(candidate.y, |(_, y)| y),
    )
}
