//! Pairwise curve intersection and dynamic label placement.
//!
//! Every unordered pair of edges is tested once and the outcome cached,
//! including the empty "no intersection" outcome. A label whose edge is
//! crossed by another curve moves to the middle of the longest uncrossed run
//! of its own curve. Straight edges measure runs by real distance; bowed edges
//! measure them in sample indices, since their curves are only known at the
//! samples.

use crate::geometry::intersect::intersect_segments;
use crate::geometry::math::{bounds, bounds_overlap};
use crate::geometry::tolerance::{EPS_DENOM, EPS_POS};
use crate::model::{EdgeId, GeometryModel, Vec2};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crossing {
    pub at: Vec2,
    /// Segment index on the lower-id edge's curve.
    pub seg_a: usize,
    /// Segment index on the higher-id edge's curve.
    pub seg_b: usize,
}

/// Outcome of testing one unordered edge pair; `a < b`. An empty crossing
/// list is the cached "no intersection" sentinel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntersectionRecord {
    pub a: EdgeId,
    pub b: EdgeId,
    pub crossings: Vec<Crossing>,
}

impl IntersectionRecord {
    pub fn intersects(&self) -> bool {
        !self.crossings.is_empty()
    }
}

/// Upper-triangular cache keyed by `(low id, high id)`.
#[derive(Clone, Debug, Default)]
pub struct IntersectionCache {
    records: BTreeMap<(EdgeId, EdgeId), IntersectionRecord>,
}

impl IntersectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, a: EdgeId, b: EdgeId) -> Option<&IntersectionRecord> {
        self.records.get(&(a.min(b), a.max(b)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Drops every record involving `id`; they are re-tested on the next refresh.
    pub fn invalidate_edge(&mut self, id: EdgeId) {
        self.records.retain(|&(a, b), _| a != id && b != id);
    }

    /// Drops every record involving any edge in `ids`, in a single sweep.
    pub fn invalidate_edges(&mut self, ids: &BTreeSet<EdgeId>) {
        if ids.is_empty() {
            return;
        }
        self.records.retain(|(a, b), _| !ids.contains(a) && !ids.contains(b));
    }

    pub fn records(&self) -> impl Iterator<Item = &IntersectionRecord> {
        self.records.values()
    }

    /// Tests every pair of live edges that has no record yet. Returns the
    /// number of pairs tested.
    pub fn refresh(&mut self, model: &GeometryModel) -> usize {
        let edges: Vec<(EdgeId, &[Vec2], Option<(f64, f64, f64, f64)>)> = model
            .edges()
            .map(|(id, e)| (id, e.curve.as_slice(), bounds(&e.curve)))
            .collect();
        let mut tested = 0;
        for (i, &(a, curve_a, box_a)) in edges.iter().enumerate() {
            for &(b, curve_b, box_b) in &edges[i + 1..] {
                if self.records.contains_key(&(a, b)) {
                    continue;
                }
                let crossings = match (box_a, box_b) {
                    (Some(ba), Some(bb)) if bounds_overlap(ba, bb, EPS_POS) => {
                        curve_crossings(curve_a, curve_b)
                    }
                    _ => Vec::new(),
                };
                if !crossings.is_empty() {
                    trace!(a, b, count = crossings.len(), "curves cross");
                }
                self.records.insert((a, b), IntersectionRecord { a, b, crossings });
                tested += 1;
            }
        }
        tested
    }
}

/// All points where polyline `ca` meets polyline `cb`. Points closer than the
/// coincidence tolerance are merged, so a crossing through a shared sample is
/// reported once. Collinear overlaps have no single crossing point and are skipped.
pub fn curve_crossings(ca: &[Vec2], cb: &[Vec2]) -> Vec<Crossing> {
    let mut out: Vec<Crossing> = Vec::new();
    for (i, sa) in ca.windows(2).enumerate() {
        for (j, sb) in cb.windows(2).enumerate() {
            let Some(at) = intersect_segments(sa[0], sa[1], sb[0], sb[1], EPS_POS, EPS_DENOM).point() else {
                continue;
            };
            if out.iter().any(|c| c.at.dist_sq(at) <= EPS_POS * EPS_POS) {
                continue;
            }
            out.push(Crossing { at, seg_a: i, seg_b: j });
        }
    }
    out
}

/// Label for a straight edge: midpoint of the widest gap between consecutive
/// crossings, with the boundary endpoints acting as sentinels.
pub fn straight_label(start: Vec2, end: Vec2, mut points: Vec<Vec2>) -> Vec2 {
    points.sort_by(|p, q| p.dist_sq(start).total_cmp(&q.dist_sq(start)));
    let mut walk = Vec::with_capacity(points.len() + 2);
    walk.push(start);
    walk.extend(points);
    walk.push(end);
    let mut best = 0;
    let mut best_gap = f64::NEG_INFINITY;
    for (i, w) in walk.windows(2).enumerate() {
        let gap = w[0].dist_sq(w[1]);
        if gap > best_gap {
            best_gap = gap;
            best = i;
        }
    }
    walk[best].midpoint(walk[best + 1])
}

/// Label for a bowed edge: the curve point halfway (in sample indices) across
/// the widest run of samples between consecutive crossing segments.
pub fn curved_label(curve: &[Vec2], mut segments: Vec<usize>) -> Option<Vec2> {
    let last = curve.len().checked_sub(1)?;
    segments.sort_unstable();
    let mut walk = Vec::with_capacity(segments.len() + 2);
    walk.push(0);
    walk.extend(segments.into_iter().map(|s| s.min(last)));
    walk.push(last);
    let mut best = (0, last);
    let mut best_gap = 0;
    let mut first = true;
    for w in walk.windows(2) {
        let gap = w[1] - w[0];
        if first || gap > best_gap {
            best_gap = gap;
            best = (w[0], w[1]);
            first = false;
        }
    }
    let mid = (best.0 + best.1) as f64 / 2.0;
    let lo = mid.floor() as usize;
    let frac = mid - lo as f64;
    Some(if frac > 0.0 && lo < last { curve[lo].lerp(curve[lo + 1], frac) } else { curve[lo] })
}

/// Places every label. With dynamic labeling off, or for an edge nothing
/// crosses, the label is the support point. Returns how many labels moved.
pub fn place_labels(model: &mut GeometryModel, cache: &IntersectionCache, dynamic: bool) -> usize {
    let mut hits: HashMap<EdgeId, Vec<(Vec2, usize)>> = HashMap::new();
    if dynamic {
        for rec in cache.records().filter(|r| r.intersects()) {
            for c in &rec.crossings {
                hits.entry(rec.a).or_default().push((c.at, c.seg_a));
                hits.entry(rec.b).or_default().push((c.at, c.seg_b));
            }
        }
    }
    let mut moved = 0;
    for id in model.edge_ids() {
        let Some(e) = model.edge_mut(id) else { continue };
        let label = match hits.remove(&id) {
            None => e.support,
            Some(h) if e.offset == 0 => straight_label(e.start, e.end, h.into_iter().map(|(p, _)| p).collect()),
            Some(h) => curved_label(&e.curve, h.into_iter().map(|(_, s)| s).collect()).unwrap_or(e.support),
        };
        if label != e.label {
            moved += 1;
        }
        e.label = label;
    }
    moved
}
