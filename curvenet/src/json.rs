use crate::model::{Arrowhead, Disc, Vec2};
use crate::Graph;
use serde::Serialize;
use serde_json::Value;

/// Snapshot of all derived geometry, as read by a painting layer.
pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct VertexSer {
        id: u32,
        x: f64,
        y: f64,
        radius: f64,
        attachment: Vec2,
        edges: Vec<u32>,
    }
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct EdgeSer<'a> {
        id: u32,
        pred: u32,
        succ: u32,
        directed: bool,
        #[serde(rename = "loop")]
        is_loop: bool,
        offset: i32,
        support: Vec2,
        start: Vec2,
        end: Vec2,
        curve: &'a [Vec2],
        label: Vec2,
        arrow: Option<Arrowhead>,
    }
    #[derive(Serialize)]
    struct AnnotationSer {
        id: u32,
        x: f64,
        y: f64,
    }
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Doc<'a> {
        version: u64,
        zoom_percent: f64,
        font_size: f64,
        vertices: Vec<VertexSer>,
        edges: Vec<EdgeSer<'a>>,
        annotations: Vec<AnnotationSer>,
    }

    let model = &g.model;
    let vertices = model
        .vertices()
        .map(|(id, v)| {
            let c = v.center();
            VertexSer { id, x: c.x, y: c.y, radius: v.radius(), attachment: v.attachment, edges: v.edges.clone() }
        })
        .collect();
    let edges = model
        .edges()
        .map(|(id, e)| EdgeSer {
            id,
            pred: e.pred,
            succ: e.succ,
            directed: e.directed,
            is_loop: e.is_loop,
            offset: e.offset,
            support: e.support,
            start: e.start,
            end: e.end,
            curve: &e.curve,
            label: e.label,
            arrow: e.arrow,
        })
        .collect();
    let annotations = model
        .annotations()
        .map(|(id, a)| {
            let p = a.position();
            AnnotationSer { id, x: p.x, y: p.y }
        })
        .collect();
    let doc = Doc {
        version: g.geom_ver,
        zoom_percent: g.zoom.percent(),
        font_size: g.zoom.font_size(),
        vertices,
        edges,
        annotations,
    };
    serde_json::to_value(doc).unwrap_or(Value::Null)
}
