use crate::Graph;
use crate::interop::{arr_f64, arr_i32, arr_u32, new_obj, point, push_point, set_kv};
use curvenet::{Disc, LayoutConfig};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;
use crate::error;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
impl Graph {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Graph {
        crate::Graph::rs_new()
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }

    // Vertices
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Option<u32> {
        self.inner.add_vertex(x, y).map_err(|e| error::warn("add_vertex", &e)).ok()
    }
    pub fn add_vertex_res(&mut self, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::result(self.inner.add_vertex(x, y), |id| JsValue::from_f64(id as f64))
    }
    pub fn add_vertex_with_radius_res(&mut self, x: f64, y: f64, radius: f64) -> JsValue {
        for (param, v) in [("x", x), ("y", y), ("radius", radius)] {
            if !v.is_finite() {
                return error::non_finite(param);
            }
        }
        error::result(self.inner.add_vertex_with_radius(x, y, radius), |id| JsValue::from_f64(id as f64))
    }
    /// Moves a vertex; `sole` is true when it is the only vertex being dragged.
    pub fn move_vertex(&mut self, id: u32, x: f64, y: f64, sole: bool) -> bool {
        self.inner.move_vertex(id, x, y, sole).map_err(|e| error::warn("move_vertex", &e)).is_ok()
    }
    pub fn move_vertex_res(&mut self, id: u32, x: f64, y: f64, sole: bool) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::result(self.inner.move_vertex(id, x, y, sole), point)
    }
    pub fn remove_vertex(&mut self, id: u32) -> bool {
        self.inner.remove_vertex(id).map_err(|e| error::warn("remove_vertex", &e)).is_ok()
    }
    pub fn remove_vertex_res(&mut self, id: u32) -> JsValue {
        error::result(self.inner.remove_vertex(id), |_| JsValue::TRUE)
    }
    pub fn resize_vertex_res(&mut self, id: u32, radius: f64) -> JsValue {
        if !radius.is_finite() {
            return error::non_finite("radius");
        }
        error::result(self.inner.resize_vertex(id, radius), |_| JsValue::TRUE)
    }
    pub fn set_vertex_line_width_res(&mut self, id: u32, width: f64) -> JsValue {
        if !width.is_finite() {
            return error::non_finite("width");
        }
        error::result(self.inner.set_vertex_line_width(id, width), |_| JsValue::TRUE)
    }
    /// `[x, y, radius]` in pixels, or null.
    pub fn get_vertex(&self, id: u32) -> JsValue {
        match self.inner.vertex(id) {
            Some(v) => {
                let c = v.center();
                arr_f64(&[c.x, c.y, v.radius()]).into()
            }
            None => JsValue::NULL,
        }
    }
    pub fn get_vertex_res(&self, id: u32) -> JsValue {
        match self.inner.vertex(id) {
            Some(_) => error::ok(self.get_vertex(id)),
            None => error::invalid_id("vertex", id),
        }
    }
    pub fn get_attachment_res(&self, id: u32) -> JsValue {
        error::result(self.inner.attachment(id), point)
    }
    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }

    // Edges
    pub fn add_edge(&mut self, pred: u32, succ: u32, directed: bool) -> Option<u32> {
        self.inner.add_edge(pred, succ, directed).map_err(|e| error::warn("add_edge", &e)).ok()
    }
    pub fn add_edge_res(&mut self, pred: u32, succ: u32, directed: bool) -> JsValue {
        error::result(self.inner.add_edge(pred, succ, directed), |id| JsValue::from_f64(id as f64))
    }
    pub fn remove_edge(&mut self, id: u32) -> bool {
        self.inner.remove_edge(id).map_err(|e| error::warn("remove_edge", &e)).is_ok()
    }
    pub fn remove_edge_res(&mut self, id: u32) -> JsValue {
        error::result(self.inner.remove_edge(id), |_| JsValue::TRUE)
    }
    pub fn set_edge_directed_res(&mut self, id: u32, directed: bool) -> JsValue {
        error::result(self.inner.set_edge_directed(id, directed), |_| JsValue::TRUE)
    }
    /// Full derived geometry of one edge, or null.
    pub fn get_edge(&self, id: u32) -> JsValue {
        self.inner.edge(id).map_or(JsValue::NULL, |e| to_js(e))
    }
    pub fn get_edge_res(&self, id: u32) -> JsValue {
        match self.inner.edge(id) {
            Some(e) => error::ok(to_js(e)),
            None => error::invalid_id("edge", id),
        }
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.edge_count() as u32
    }
    pub fn get_intersection_res(&self, a: u32, b: u32) -> JsValue {
        if self.inner.edge(a).is_none() {
            return error::invalid_id("edge", a);
        }
        if self.inner.edge(b).is_none() {
            return error::invalid_id("edge", b);
        }
        error::ok(self.inner.intersection(a, b).map_or(JsValue::NULL, |r| to_js(r)))
    }

    // Typed arrays getters
    pub fn get_vertex_data(&self) -> JsValue {
        let model = self.inner.model();
        let mut ids = Vec::with_capacity(model.vertex_count());
        let mut pos = Vec::with_capacity(model.vertex_count() * 2);
        let mut radii = Vec::with_capacity(model.vertex_count());
        let mut attach = Vec::with_capacity(model.vertex_count() * 2);
        for (id, v) in model.vertices() {
            ids.push(id);
            push_point(&mut pos, v.center());
            radii.push(v.radius());
            push_point(&mut attach, v.attachment);
        }
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "positions", &arr_f64(&pos).into());
        set_kv(&obj, "radii", &arr_f64(&radii).into());
        set_kv(&obj, "attachments", &arr_f64(&attach).into());
        obj.into()
    }
    /// Edge geometry as flat arrays; curve `i` spans points
    /// `curve_starts[i] .. curve_starts[i + 1]` of `curve_points`.
    pub fn get_edge_data(&self) -> JsValue {
        let model = self.inner.model();
        let n = model.edge_count();
        let mut ids = Vec::with_capacity(n);
        let mut endpoints = Vec::with_capacity(n * 2);
        let mut offsets = Vec::with_capacity(n);
        let mut supports = Vec::with_capacity(n * 2);
        let mut labels = Vec::with_capacity(n * 2);
        let mut curve_starts = Vec::with_capacity(n + 1);
        let mut curve_points = Vec::new();
        for (id, e) in model.edges() {
            ids.push(id);
            endpoints.push(e.pred);
            endpoints.push(e.succ);
            offsets.push(e.offset);
            push_point(&mut supports, e.support);
            push_point(&mut labels, e.label);
            curve_starts.push((curve_points.len() / 2) as u32);
            for &p in &e.curve {
                push_point(&mut curve_points, p);
            }
        }
        curve_starts.push((curve_points.len() / 2) as u32);
        let obj = new_obj();
        set_kv(&obj, "ids", &arr_u32(&ids).into());
        set_kv(&obj, "endpoints", &arr_u32(&endpoints).into());
        set_kv(&obj, "offsets", &arr_i32(&offsets).into());
        set_kv(&obj, "supports", &arr_f64(&supports).into());
        set_kv(&obj, "labels", &arr_f64(&labels).into());
        set_kv(&obj, "curve_starts", &arr_u32(&curve_starts).into());
        set_kv(&obj, "curve_points", &arr_f64(&curve_points).into());
        obj.into()
    }

    // Annotations
    pub fn add_annotation_res(&mut self, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::result(self.inner.add_annotation(x, y), |id| JsValue::from_f64(id as f64))
    }
    pub fn move_annotation_res(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::result(self.inner.move_annotation(id, x, y), |_| JsValue::TRUE)
    }
    pub fn remove_annotation_res(&mut self, id: u32) -> JsValue {
        error::result(self.inner.remove_annotation(id), |_| JsValue::TRUE)
    }
    pub fn get_annotation(&self, id: u32) -> JsValue {
        self.inner.annotation_position(id).map_or(JsValue::NULL, point)
    }

    // Zoom + configuration
    pub fn zoom_percent(&self) -> f64 {
        self.inner.zoom_percent()
    }
    pub fn font_size(&self) -> f64 {
        self.inner.font_size()
    }
    pub fn set_zoom(&mut self, percent: f64) -> bool {
        self.inner.set_zoom(percent).map_err(|e| error::warn("set_zoom", &e)).is_ok()
    }
    pub fn set_zoom_res(&mut self, percent: f64) -> JsValue {
        if !percent.is_finite() {
            return error::non_finite("percent");
        }
        if percent <= 0.0 {
            return error::out_of_range("percent", 0.0, f64::INFINITY, percent);
        }
        error::result(self.inner.set_zoom(percent), |_| JsValue::TRUE)
    }
    pub fn set_dynamic_labeling(&mut self, enabled: bool) {
        self.inner.set_dynamic_labeling(enabled);
    }
    pub fn get_config(&self) -> JsValue {
        to_js(self.inner.config())
    }
    /// Accepts a partial config object; missing fields take their defaults.
    pub fn set_config_res(&mut self, v: JsValue) -> JsValue {
        let cfg = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => LayoutConfig::from_json_value(val),
            Err(e) => return error::err("json_parse", format!("{}", e), None),
        };
        match cfg {
            Ok(cfg) => error::result(self.inner.set_config(cfg), |_| JsValue::TRUE),
            Err(e) => error::from_core(&e),
        }
    }

    // Picking + JSON + SVG
    pub fn pick(&self, x: f64, y: f64, tol: f64) -> JsValue {
        match self.inner.pick(x, y, tol) {
            Some(p) => to_js(&p),
            None => JsValue::NULL,
        }
    }
    pub fn pick_res(&self, x: f64, y: f64, tol: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !tol.is_finite() {
            return error::non_finite("tol");
        }
        if tol < 0.0 {
            return error::out_of_range("tol", 0.0, f64::INFINITY, tol);
        }
        error::ok(self.pick(x, y, tol))
    }
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_json_value())
    }
    pub fn to_svg_paths(&self) -> JsValue {
        to_js(&self.inner.to_svg_paths())
    }
}
