use crate::geometry::math::seg_distance_sq;
use crate::model::{Disc, EdgeId, GeometryModel, Vec2, VertexId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Pick {
    #[serde(rename = "vertex")]
    Vertex { id: VertexId, dist: f64 },
    #[serde(rename = "edge")]
    Edge { id: EdgeId, segment: usize, t: f64, dist: f64 },
}

pub fn pick_impl(model: &GeometryModel, x: f64, y: f64, tol: f64) -> Option<Pick> {
    let p = Vec2::new(x, y);
    // Vertices first: anywhere inside the circle, or within tol of its rim
    let mut best_vertex: Option<(VertexId, f64)> = None;
    for (id, v) in model.vertices() {
        let d = v.center().dist(p);
        if d <= v.radius() + tol && best_vertex.map_or(true, |(_, bd)| d < bd) {
            best_vertex = Some((id, d));
        }
    }
    if let Some((id, dist)) = best_vertex {
        return Some(Pick::Vertex { id, dist });
    }
    // Edges: distance to the sampled curve
    let tol2 = tol * tol;
    let mut best_edge: Option<(EdgeId, usize, f64, f64)> = None;
    for (id, e) in model.edges() {
        for (i, seg) in e.curve.windows(2).enumerate() {
            let (d2, t) = seg_distance_sq(p, seg[0], seg[1]);
            if d2 <= tol2 && best_edge.map_or(true, |(_, _, _, bd)| d2 < bd) {
                best_edge = Some((id, i, t, d2));
            }
        }
    }
    best_edge.map(|(id, segment, t, d2)| Pick::Edge { id, segment, t, dist: d2.sqrt() })
}
