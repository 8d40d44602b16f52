pub mod config;
pub mod error;
pub mod model;
pub mod geometry {
    pub mod intersect;
    pub mod limits;
    pub mod math;
    pub mod spline;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod arrowhead;
    pub mod attachment;
    pub mod curves;
    pub mod labels;
    pub mod offsets;
    pub mod picking;
    pub mod snap;
    pub mod zoom;
}
mod json;
mod svg;

pub use algorithms::labels::IntersectionRecord;
pub use algorithms::picking::Pick;
pub use config::LayoutConfig;
pub use error::{EntityKind, Error, Result};
pub use model::{
    Annotation, AnnotationId, Arrowhead, Disc, Edge, EdgeId, GeometryModel, Vec2, Vertex, VertexId,
};

use algorithms::curves::CurveParams;
use algorithms::labels::IntersectionCache;
use algorithms::zoom::ZoomScaler;
use algorithms::{attachment, curves, labels, offsets, snap};
use config::{check_coord, check_size};
use geometry::limits;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Work collected by a mutation and consumed by the next settle pass.
#[derive(Clone, Debug, Default)]
pub struct DirtyState {
    pub pairs: BTreeSet<(VertexId, VertexId)>,
    pub edges: BTreeSet<EdgeId>,
    pub vertices: BTreeSet<VertexId>,
    pub full: bool,
}

/// Counters from the most recent settle pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettleStats {
    pub offsets_changed: usize,
    pub edges_rebuilt: usize,
    pub pairs_tested: usize,
    pub labels_moved: usize,
    pub vertices_attached: usize,
}

/// Interactive graph geometry engine.
///
/// Every mutation validates its arguments, applies the topology change and
/// then settles all derived geometry (offsets, curves, labels, attachment
/// points) before returning. A rejected mutation changes nothing.
pub struct Graph {
    pub(crate) model: GeometryModel,
    pub(crate) config: LayoutConfig,
    pub(crate) zoom: ZoomScaler,
    pub(crate) cache: IntersectionCache,
    pub(crate) dirty: DirtyState,
    pub(crate) geom_ver: u64,
    pub(crate) last_stats: SettleStats,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        let config = LayoutConfig::default();
        Graph {
            model: GeometryModel::new(),
            zoom: ZoomScaler::new(&config),
            config,
            cache: IntersectionCache::new(),
            dirty: DirtyState::default(),
            geom_ver: 1,
            last_stats: SettleStats::default(),
        }
    }

    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        let mut g = Graph::new();
        g.zoom = ZoomScaler::new(&config);
        g.config = config;
        Ok(g)
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
    pub fn model(&self) -> &GeometryModel {
        &self.model
    }
    pub fn zoom_percent(&self) -> f64 {
        self.zoom.percent()
    }
    pub fn font_size(&self) -> f64 {
        self.zoom.font_size()
    }
    pub fn last_stats(&self) -> SettleStats {
        self.last_stats
    }
    /// Number of edge pairs with a cached intersection outcome.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    fn curve_params(&self) -> CurveParams {
        CurveParams {
            offset_distance: self.zoom.offset_distance(),
            loop_offset_distance: self.zoom.loop_offset_distance(),
            arrow_length: self.zoom.arrow_length(),
        }
    }

    fn mark_edge(&mut self, id: EdgeId) {
        if let Some(e) = self.model.edge(id) {
            self.dirty.vertices.insert(e.pred);
            self.dirty.vertices.insert(e.succ);
            self.dirty.edges.insert(id);
        }
    }

    fn mark_incident(&mut self, v: VertexId) {
        let ids = self.model.vertex(v).map(|x| x.edges.clone()).unwrap_or_default();
        for id in ids {
            self.mark_edge(id);
        }
        self.dirty.vertices.insert(v);
    }

    /// Runs the pipeline over the pending dirty state: offsets, then curves,
    /// then labels, then attachment points.
    fn settle(&mut self) {
        let dirty = std::mem::take(&mut self.dirty);
        let params = self.curve_params();
        let mut stats = SettleStats::default();
        let mut rebuild = dirty.edges;
        let mut touched = dirty.vertices;

        for &(a, b) in &dirty.pairs {
            let changed = offsets::assign_pair(&mut self.model, a, b);
            stats.offsets_changed += changed.len();
            rebuild.extend(changed);
        }
        if dirty.full {
            self.cache.clear();
            rebuild.extend(self.model.edge_ids());
            touched.extend(self.model.vertex_ids());
        }
        rebuild.retain(|&id| self.model.edge(id).is_some());
        if !dirty.full {
            self.cache.invalidate_edges(&rebuild);
        }

        for id in rebuild {
            let Some(e) = self.model.edge(id) else { continue };
            touched.insert(e.pred);
            touched.insert(e.succ);
            match curves::rebuild_edge(&mut self.model, id, &params) {
                Ok(()) => stats.edges_rebuilt += 1,
                Err(err) => warn!(edge = id, %err, "edge geometry not rebuilt"),
            }
        }

        if self.config.dynamic_labeling {
            stats.pairs_tested = self.cache.refresh(&self.model);
        }
        stats.labels_moved = labels::place_labels(&mut self.model, &self.cache, self.config.dynamic_labeling);

        for v in touched {
            if attachment::update_vertex(&mut self.model, v).is_some() {
                stats.vertices_attached += 1;
            }
        }

        self.geom_ver += 1;
        self.last_stats = stats;
        debug!(
            version = self.geom_ver,
            offsets = stats.offsets_changed,
            rebuilt = stats.edges_rebuilt,
            tested = stats.pairs_tested,
            labels = stats.labels_moved,
            attached = stats.vertices_attached,
            "geometry settled"
        );
    }

    // Vertices

    /// vertexAdded: adds a vertex with the configured default radius.
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Result<VertexId> {
        let radius = self.zoom.at_current(self.config.vertex_radius);
        self.add_vertex_with_radius(x, y, radius)
    }

    /// vertexAdded: `x`, `y` and `radius` are pixels at the current zoom.
    pub fn add_vertex_with_radius(&mut self, x: f64, y: f64, radius: f64) -> Result<VertexId> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        check_size("radius", radius)?;
        if self.model.vertices.len() >= limits::MAX_VERTICES {
            return Err(Error::invalid("vertex", format!("at most {} vertices", limits::MAX_VERTICES)));
        }
        let id = self.model.insert_vertex(Vertex::new(x, y, radius, self.config.edge_line_width));
        self.dirty.vertices.insert(id);
        self.settle();
        Ok(id)
    }

    /// vertexMoved: moves a vertex, snapping it to neighbour axes when it is
    /// the only vertex being dragged. Returns the settled center.
    pub fn move_vertex(&mut self, id: VertexId, x: f64, y: f64, sole: bool) -> Result<Vec2> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        self.model.require_vertex(id)?;
        let mut target = Vec2::new(x, y);
        if sole && self.config.vpas_enabled {
            let tol = self.config.vpas_tolerance;
            let others = self.model.vertices().filter(|&(v, _)| v != id).map(|(_, v)| v);
            target = snap::snap_position(target, tol, others);
        }
        let Some(v) = self.model.vertex_mut(id) else {
            return Err(Error::vertex_not_found(id));
        };
        v.x.ideal = target.x;
        v.y.ideal = target.y;
        let center = v.center();
        self.mark_incident(id);
        self.settle();
        Ok(center)
    }

    /// vertexRemoved: removes a vertex together with its incident edges.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        let incident = self.model.require_vertex(id)?.edges.clone();
        self.cache.invalidate_edges(&incident.iter().copied().collect());
        for eid in incident {
            if let Some(e) = self.model.take_edge(eid) {
                let other = if e.pred == id { e.succ } else { e.pred };
                if other != id {
                    self.dirty.pairs.insert(offsets::pair_key(id, other));
                    self.mark_incident(other);
                }
            }
        }
        self.model.take_vertex(id);
        self.dirty.vertices.remove(&id);
        self.settle();
        Ok(())
    }

    /// Changes a vertex radius (pixels at the current zoom).
    pub fn resize_vertex(&mut self, id: VertexId, radius: f64) -> Result<()> {
        check_size("radius", radius)?;
        let Some(v) = self.model.vertex_mut(id) else {
            return Err(Error::vertex_not_found(id));
        };
        v.radius.ideal = radius;
        self.mark_incident(id);
        self.settle();
        Ok(())
    }

    /// Changes the line width of edges at a vertex, which moves their boundary endpoints.
    pub fn set_vertex_line_width(&mut self, id: VertexId, width: f64) -> Result<()> {
        check_size("lineWidth", width)?;
        let Some(v) = self.model.vertex_mut(id) else {
            return Err(Error::vertex_not_found(id));
        };
        v.line_width = width;
        self.mark_incident(id);
        self.settle();
        Ok(())
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.model.vertex(id)
    }
    pub fn vertex_center(&self, id: VertexId) -> Option<Vec2> {
        self.model.vertex(id).map(|v| v.center())
    }
    pub fn attachment(&self, id: VertexId) -> Result<Vec2> {
        Ok(self.model.require_vertex(id)?.attachment)
    }
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.model.vertex_ids()
    }
    pub fn vertex_count(&self) -> usize {
        self.model.vertex_count()
    }

    // Edges

    /// edgeAdded: `pred == succ` makes a loop.
    pub fn add_edge(&mut self, pred: VertexId, succ: VertexId, directed: bool) -> Result<EdgeId> {
        self.model.require_vertex(pred)?;
        self.model.require_vertex(succ)?;
        if self.model.edges.len() >= limits::MAX_EDGES {
            return Err(Error::invalid("edge", format!("at most {} edges", limits::MAX_EDGES)));
        }
        let id = self.model.insert_edge(Edge::new(pred, succ, directed));
        self.dirty.pairs.insert(offsets::pair_key(pred, succ));
        self.mark_edge(id);
        self.settle();
        Ok(id)
    }

    /// edgeRemoved.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<()> {
        let Some(e) = self.model.take_edge(id) else {
            return Err(Error::edge_not_found(id));
        };
        self.cache.invalidate_edge(id);
        self.dirty.pairs.insert(offsets::pair_key(e.pred, e.succ));
        self.dirty.vertices.insert(e.pred);
        self.dirty.vertices.insert(e.succ);
        self.settle();
        Ok(())
    }

    /// Switches an edge between directed and undirected; the pair's fan is re-planned.
    pub fn set_edge_directed(&mut self, id: EdgeId, directed: bool) -> Result<()> {
        let Some(e) = self.model.edge_mut(id) else {
            return Err(Error::edge_not_found(id));
        };
        if e.directed == directed {
            return Ok(());
        }
        e.directed = directed;
        let key = offsets::pair_key(e.pred, e.succ);
        self.dirty.pairs.insert(key);
        self.mark_edge(id);
        self.settle();
        Ok(())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.model.edge(id)
    }
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.model.edge_ids()
    }
    pub fn edge_count(&self) -> usize {
        self.model.edge_count()
    }
    pub fn intersection(&self, a: EdgeId, b: EdgeId) -> Option<&IntersectionRecord> {
        self.cache.get(a, b)
    }

    // Annotations

    pub fn add_annotation(&mut self, x: f64, y: f64) -> Result<AnnotationId> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        if self.model.annotations.len() >= limits::MAX_ANNOTATIONS {
            return Err(Error::invalid("annotation", format!("at most {} annotations", limits::MAX_ANNOTATIONS)));
        }
        let id = self.model.insert_annotation(Annotation {
            x: model::Scaled::new(x),
            y: model::Scaled::new(y),
        });
        self.geom_ver += 1;
        Ok(id)
    }

    pub fn move_annotation(&mut self, id: AnnotationId, x: f64, y: f64) -> Result<()> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        let Some(a) = self.model.annotation_mut(id) else {
            return Err(Error::annotation_not_found(id));
        };
        a.x.ideal = x;
        a.y.ideal = y;
        self.geom_ver += 1;
        Ok(())
    }

    pub fn remove_annotation(&mut self, id: AnnotationId) -> Result<()> {
        self.model.take_annotation(id).ok_or(Error::annotation_not_found(id))?;
        self.geom_ver += 1;
        Ok(())
    }

    pub fn annotation_position(&self, id: AnnotationId) -> Option<Vec2> {
        self.model.annotation(id).map(|a| a.position())
    }

    // Configuration

    /// zoomChanged: rescales every size-bearing quantity and rebuilds all geometry.
    pub fn set_zoom(&mut self, percent: f64) -> Result<()> {
        if percent == self.zoom.percent() {
            return Ok(());
        }
        self.zoom.rezoom(&mut self.model, percent)?;
        self.config.zoom_percent = percent;
        self.dirty.full = true;
        self.settle();
        Ok(())
    }

    /// dynamicLabelingToggled.
    pub fn set_dynamic_labeling(&mut self, enabled: bool) {
        if self.config.dynamic_labeling == enabled {
            return;
        }
        self.config.dynamic_labeling = enabled;
        self.settle();
    }

    /// Replaces the whole configuration. Vertex radii and line widths already
    /// set are kept; the new defaults only apply to vertices added later.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        if config.zoom_percent != self.zoom.percent() {
            self.zoom.rezoom(&mut self.model, config.zoom_percent)?;
        }
        self.zoom = ZoomScaler::new(&config);
        self.config = config;
        self.dirty.full = true;
        self.settle();
        Ok(())
    }

    // Consumers

    pub fn pick(&self, x: f64, y: f64, tol: f64) -> Option<Pick> {
        algorithms::picking::pick_impl(&self.model, x, y, tol)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn to_svg_paths(&self) -> Vec<String> {
        svg::to_svg_paths_impl(self)
    }
}
