//! Fan-out of edges that share a vertex pair.
//!
//! Edges between `a` and `b` are drawn in one of two orientations. Directed
//! edges keep their stored orientation; undirected edges may be drawn either
//! way and fill whichever orientation is lighter. Each orientation group is
//! numbered in creation order from 0 when it outnumbers the opposing group,
//! otherwise from 1, so a straight edge only appears when it cannot overlap a
//! reverse edge. Loops are numbered from 1.

use crate::model::{EdgeId, GeometryModel, VertexId};
use tracing::trace;

#[derive(Clone, Copy, Debug)]
struct Member {
    id: EdgeId,
    directed: bool,
}

/// Canonical key of an unordered vertex pair.
#[inline]
pub fn pair_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    (a.min(b), a.max(b))
}

/// Planned offset per edge between `a` and `b`, in creation order.
pub fn plan_pair(model: &GeometryModel, a: VertexId, b: VertexId) -> Vec<(EdgeId, i32)> {
    let ids = model.edges_between(a, b);
    if a == b {
        return ids.iter().enumerate().map(|(i, &id)| (id, i as i32 + 1)).collect();
    }
    let Some(first) = ids.first().and_then(|&id| model.edge(id)) else {
        return Vec::new();
    };
    let canonical = (first.pred, first.succ);

    let mut forward: Vec<Member> = Vec::new();
    let mut reverse: Vec<Member> = Vec::new();
    for &id in &ids {
        if let Some(e) = model.edge(id).filter(|e| e.directed) {
            let m = Member { id, directed: true };
            if e.pred == canonical.0 { forward.push(m) } else { reverse.push(m) }
        }
    }
    for &id in &ids {
        if model.edge(id).is_some_and(|e| !e.directed) {
            let m = Member { id, directed: false };
            if reverse.len() < forward.len() { reverse.push(m) } else { forward.push(m) }
        }
    }
    forward.sort_unstable_by_key(|m| m.id);
    reverse.sort_unstable_by_key(|m| m.id);

    let mut out = Vec::with_capacity(ids.len());
    number_group(model, &forward, &reverse, canonical.0, &mut out);
    number_group(model, &reverse, &forward, canonical.1, &mut out);
    out.sort_unstable_by_key(|&(id, _)| id);
    out
}

fn start_index(group: &[Member], opposing: &[Member]) -> i32 {
    // A lone undirected edge facing a lone directed one stays straight.
    let lone_undirected = matches!(group, [m] if !m.directed) && matches!(opposing, [m] if m.directed);
    if lone_undirected || opposing.len() < group.len() { 0 } else { 1 }
}

fn number_group(
    model: &GeometryModel,
    group: &[Member],
    opposing: &[Member],
    drawn_from: VertexId,
    out: &mut Vec<(EdgeId, i32)>,
) {
    let start = start_index(group, opposing);
    for (i, m) in group.iter().enumerate() {
        let k = start + i as i32;
        // offsets are stored relative to the edge's own pred -> succ orientation
        let k = match model.edge(m.id) {
            Some(e) if e.pred != drawn_from => -k,
            _ => k,
        };
        out.push((m.id, k));
    }
}

/// Re-runs the assignment for the pair and writes the result. Returns the
/// edges whose offset actually changed.
pub fn assign_pair(model: &mut GeometryModel, a: VertexId, b: VertexId) -> Vec<EdgeId> {
    let mut changed = Vec::new();
    for (id, k) in plan_pair(model, a, b) {
        if let Some(e) = model.edge_mut(id) {
            if e.offset != k {
                trace!(edge = id, from = e.offset, to = k, "offset reassigned");
                e.offset = k;
                changed.push(id);
            }
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Vertex};

    fn model_with(edges: &[(VertexId, VertexId, bool)]) -> (GeometryModel, Vec<EdgeId>) {
        let mut m = GeometryModel::new();
        m.insert_vertex(Vertex::new(0.0, 0.0, 10.0, 1.0));
        m.insert_vertex(Vertex::new(100.0, 0.0, 10.0, 1.0));
        let ids = edges.iter().map(|&(p, s, d)| m.insert_edge(Edge::new(p, s, d))).collect();
        (m, ids)
    }

    fn offsets(m: &GeometryModel) -> Vec<i32> {
        plan_pair(m, 0, 1).into_iter().map(|(_, k)| k).collect()
    }

    #[test]
    fn single_edge_is_straight() {
        let (m, _) = model_with(&[(0, 1, false)]);
        assert_eq!(offsets(&m), vec![0]);
        let (m, _) = model_with(&[(0, 1, true)]);
        assert_eq!(offsets(&m), vec![0]);
    }

    #[test]
    fn two_undirected_edges_mirror() {
        let (m, _) = model_with(&[(0, 1, false), (0, 1, false)]);
        assert_eq!(offsets(&m), vec![1, -1]);
    }

    #[test]
    fn opposing_directed_edges_bow_in_their_own_orientation() {
        let (m, _) = model_with(&[(0, 1, true), (1, 0, true)]);
        assert_eq!(offsets(&m), vec![1, 1]);
    }

    #[test]
    fn same_direction_directed_edges_count_up_from_zero() {
        let (m, _) = model_with(&[(0, 1, true), (0, 1, true), (0, 1, true)]);
        assert_eq!(offsets(&m), vec![0, 1, 2]);
    }

    #[test]
    fn lone_undirected_against_lone_directed_stays_straight() {
        let (m, _) = model_with(&[(0, 1, false), (1, 0, true)]);
        assert_eq!(offsets(&m), vec![0, 1]);
    }

    #[test]
    fn loops_start_at_one() {
        let mut m = GeometryModel::new();
        m.insert_vertex(Vertex::new(0.0, 0.0, 10.0, 1.0));
        m.insert_edge(Edge::new(0, 0, false));
        m.insert_edge(Edge::new(0, 0, true));
        let ks: Vec<i32> = plan_pair(&m, 0, 0).into_iter().map(|(_, k)| k).collect();
        assert_eq!(ks, vec![1, 2]);
    }

    #[test]
    fn assign_reports_only_changes() {
        let (mut m, ids) = model_with(&[(0, 1, false)]);
        assert!(assign_pair(&mut m, 0, 1).is_empty());
        let e2 = m.insert_edge(Edge::new(0, 1, false));
        let changed = assign_pair(&mut m, 1, 0);
        assert_eq!(changed, vec![ids[0], e2]);
        assert_eq!(m.edge(ids[0]).unwrap().offset, 1);
        assert_eq!(m.edge(e2).unwrap().offset, -1);
    }
}
