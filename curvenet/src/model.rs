use crate::error::{Error, Result};
use crate::geometry::tolerance::EPS_LEN;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

pub type VertexId = u32;
pub type EdgeId = u32;
pub type AnnotationId = u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }
    #[inline]
    pub fn dot(self, o: Vec2) -> f64 {
        self.x * o.x + self.y * o.y
    }
    /// z component of the 3D cross product; positive when `o` is clockwise
    /// from `self` in screen space (y pointing down).
    #[inline]
    pub fn cross(self, o: Vec2) -> f64 {
        self.x * o.y - self.y * o.x
    }
    #[inline]
    pub fn len_sq(self) -> f64 {
        self.dot(self)
    }
    #[inline]
    pub fn len(self) -> f64 {
        self.len_sq().sqrt()
    }
    #[inline]
    pub fn dist_sq(self, o: Vec2) -> f64 {
        (self - o).len_sq()
    }
    #[inline]
    pub fn dist(self, o: Vec2) -> f64 {
        self.dist_sq(o).sqrt()
    }
    #[inline]
    pub fn lerp(self, o: Vec2, t: f64) -> Vec2 {
        Vec2::new(self.x + (o.x - self.x) * t, self.y + (o.y - self.y) * t)
    }
    #[inline]
    pub fn midpoint(self, o: Vec2) -> Vec2 {
        self.lerp(o, 0.5)
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 {
        Vec2::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// A size-bearing quantity. The ideal value keeps full precision across zoom
/// changes; geometry reads the truncated pixel value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaled {
    pub ideal: f64,
}

impl Scaled {
    pub fn new(ideal: f64) -> Self {
        Scaled { ideal }
    }
    /// Truncated pixel value. Values within rounding noise of a whole pixel
    /// snap to it, so `9.999999999999998` reads as 10 rather than 9.
    #[inline]
    pub fn px(&self) -> f64 {
        let r = self.ideal.round();
        if (self.ideal - r).abs() <= EPS_LEN * r.abs().max(1.0) {
            r
        } else {
            self.ideal.trunc()
        }
    }
    pub fn rescale(&mut self, old_percent: f64, new_percent: f64) {
        self.ideal = (self.ideal / old_percent) * new_percent;
    }
}

/// Anything drawn as a circle: the minimal field set the placement helpers need.
pub trait Disc {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f64;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vertex {
    pub x: Scaled,
    pub y: Scaled,
    pub radius: Scaled,
    /// Stroke width of edges leaving this vertex; widens the gap between
    /// the circle and the edge boundary endpoints.
    pub line_width: f64,
    /// Incident edge ids in creation order. A loop is listed once.
    pub edges: Vec<EdgeId>,
    pub attachment: Vec2,
}

impl Vertex {
    pub fn new(x: f64, y: f64, radius: f64, line_width: f64) -> Self {
        Vertex {
            x: Scaled::new(x),
            y: Scaled::new(y),
            radius: Scaled::new(radius),
            line_width,
            edges: Vec::new(),
            attachment: Vec2::new(x.trunc(), y.trunc() + radius.trunc()),
        }
    }

    /// Distance from the center at which edge curves start and end.
    pub fn clearance(&self) -> f64 {
        self.radius.px() + self.line_width + 1.0
    }
}

impl Disc for Vertex {
    fn center(&self) -> Vec2 {
        Vec2::new(self.x.px(), self.y.px())
    }
    fn radius(&self) -> f64 {
        self.radius.px()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arrowhead {
    pub tip: Vec2,
    pub left: Vec2,
    pub right: Vec2,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub pred: VertexId,
    pub succ: VertexId,
    pub directed: bool,
    pub is_loop: bool,
    /// Signed fan index relative to the stored pred -> succ orientation. 0 is straight.
    pub offset: i32,
    pub support: Vec2,
    pub start: Vec2,
    pub end: Vec2,
    pub curve: Vec<Vec2>,
    pub label: Vec2,
    pub arrow: Option<Arrowhead>,
}

impl Edge {
    pub fn new(pred: VertexId, succ: VertexId, directed: bool) -> Self {
        Edge {
            pred,
            succ,
            directed,
            is_loop: pred == succ,
            offset: 0,
            support: Vec2::ZERO,
            start: Vec2::ZERO,
            end: Vec2::ZERO,
            curve: Vec::new(),
            label: Vec2::ZERO,
            arrow: None,
        }
    }

    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.pred == a && self.succ == b) || (self.pred == b && self.succ == a)
    }

    /// Boundary endpoints of this edge lying on vertex `v` (two for a loop).
    pub fn endpoints_on(&self, v: VertexId) -> Vec<Vec2> {
        if self.is_loop {
            if self.pred == v {
                vec![self.start, self.end]
            } else {
                Vec::new()
            }
        } else if self.pred == v {
            vec![self.start]
        } else if self.succ == v {
            vec![self.end]
        } else {
            Vec::new()
        }
    }
}

/// Free-floating custom object; only its position takes part in zooming.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Annotation {
    pub x: Scaled,
    pub y: Scaled,
}

impl Annotation {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.px(), self.y.px())
    }
}

/// Id-addressed arenas. An id is the slot index and is never reused, so id
/// order is creation order.
#[derive(Clone, Debug, Default)]
pub struct GeometryModel {
    pub(crate) vertices: Vec<Option<Vertex>>,
    pub(crate) edges: Vec<Option<Edge>>,
    pub(crate) annotations: Vec<Option<Annotation>>,
}

impl GeometryModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id as usize).and_then(|v| v.as_ref())
    }
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id as usize).and_then(|v| v.as_mut())
    }
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(|e| e.as_ref())
    }
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id as usize).and_then(|e| e.as_mut())
    }
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(id as usize).and_then(|a| a.as_ref())
    }
    pub fn annotation_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.get_mut(id as usize).and_then(|a| a.as_mut())
    }

    pub fn require_vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertex(id).ok_or(Error::vertex_not_found(id))
    }
    pub fn require_edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edge(id).ok_or(Error::edge_not_found(id))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|v| (i as VertexId, v)))
    }
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i as EdgeId, e)))
    }
    pub fn annotations(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.annotations
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_ref().map(|a| (i as AnnotationId, a)))
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices().map(|(id, _)| id).collect()
    }
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges().map(|(id, _)| id).collect()
    }
    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_some()).count()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Edges joining `a` and `b` in either orientation, in creation order.
    /// With `a == b` these are the loops at `a`.
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> Vec<EdgeId> {
        let anchor = match self.vertex(a).or_else(|| self.vertex(b)) {
            Some(v) => v,
            None => return Vec::new(),
        };
        let mut ids: Vec<EdgeId> = anchor
            .edges
            .iter()
            .copied()
            .filter(|&id| self.edge(id).is_some_and(|e| e.joins(a, b)))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Boundary endpoints on `v` of all its incident edges, in incidence order.
    pub fn endpoints_on(&self, v: VertexId) -> Vec<Vec2> {
        let Some(vertex) = self.vertex(v) else {
            return Vec::new();
        };
        vertex
            .edges
            .iter()
            .filter_map(|&id| self.edge(id))
            .flat_map(|e| e.endpoints_on(v))
            .collect()
    }

    pub(crate) fn insert_vertex(&mut self, v: Vertex) -> VertexId {
        let id = self.vertices.len() as VertexId;
        self.vertices.push(Some(v));
        id
    }

    pub(crate) fn insert_edge(&mut self, e: Edge) -> EdgeId {
        let id = self.edges.len() as EdgeId;
        let (pred, succ) = (e.pred, e.succ);
        self.edges.push(Some(e));
        if let Some(v) = self.vertex_mut(pred) {
            v.edges.push(id);
        }
        if pred != succ {
            if let Some(v) = self.vertex_mut(succ) {
                v.edges.push(id);
            }
        }
        id
    }

    pub(crate) fn take_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let e = self.edges.get_mut(id as usize)?.take()?;
        for v in [e.pred, e.succ] {
            if let Some(vertex) = self.vertex_mut(v) {
                vertex.edges.retain(|&x| x != id);
            }
        }
        Some(e)
    }

    pub(crate) fn take_vertex(&mut self, id: VertexId) -> Option<Vertex> {
        self.vertices.get_mut(id as usize)?.take()
    }

    pub(crate) fn insert_annotation(&mut self, a: Annotation) -> AnnotationId {
        let id = self.annotations.len() as AnnotationId;
        self.annotations.push(Some(a));
        id
    }

    pub(crate) fn take_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.get_mut(id as usize)?.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_truncates_toward_zero() {
        assert_eq!(Scaled::new(10.9).px(), 10.0);
        assert_eq!(Scaled::new(-10.9).px(), -10.0);
    }

    #[test]
    fn scaled_absorbs_rounding_noise() {
        let mut s = Scaled::new(10.0);
        for (old, new) in [(100.0, 37.0), (37.0, 250.0), (250.0, 81.0), (81.0, 100.0)] {
            s.rescale(old, new);
        }
        assert_eq!(s.px(), 10.0);
        assert_eq!(Scaled::new(9.999_999_999_999_998).px(), 10.0);
        assert_eq!(Scaled::new(9.99).px(), 9.0);
    }

    #[test]
    fn insert_and_take_edge_keeps_incidence_in_sync() {
        let mut m = GeometryModel::new();
        let a = m.insert_vertex(Vertex::new(0.0, 0.0, 10.0, 1.0));
        let b = m.insert_vertex(Vertex::new(100.0, 0.0, 10.0, 1.0));
        let e = m.insert_edge(Edge::new(a, b, false));
        let l = m.insert_edge(Edge::new(a, a, true));
        assert_eq!(m.vertex(a).unwrap().edges, vec![e, l]);
        assert_eq!(m.vertex(b).unwrap().edges, vec![e]);
        assert_eq!(m.edges_between(b, a), vec![e]);
        assert_eq!(m.edges_between(a, a), vec![l]);
        m.take_edge(e);
        assert_eq!(m.vertex(a).unwrap().edges, vec![l]);
        assert!(m.vertex(b).unwrap().edges.is_empty());
        assert!(m.edge(e).is_none());
    }
}
