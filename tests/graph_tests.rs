#![cfg(target_arch = "wasm32")]
use curvenet_wasm::Graph;
use js_sys::{Float64Array, Int32Array, Reflect, Uint32Array};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(v: &JsValue, k: &str) -> JsValue {
    Reflect::get(v, &JsValue::from_str(k)).unwrap()
}

#[wasm_bindgen_test]
fn vertices_and_edges_basic() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).expect("vertex");
    let b = g.add_vertex(100.0, 0.0).expect("vertex");
    assert_eq!(g.vertex_count(), 2);

    let va = Float64Array::new(&g.get_vertex(b)).to_vec();
    assert_eq!(va, vec![100.0, 0.0, 10.0]);

    let e1 = g.add_edge(a, b, false).expect("edge id");
    let e2 = g.add_edge(a, b, false).expect("edge id");
    assert_eq!(g.edge_count(), 2);

    let ed = g.get_edge_data();
    let ids = Uint32Array::new(&get(&ed, "ids")).to_vec();
    assert_eq!(ids, vec![e1, e2]);
    let offsets = Int32Array::new(&get(&ed, "offsets")).to_vec();
    assert_eq!(offsets, vec![1, -1]);
    let supports = Float64Array::new(&get(&ed, "supports")).to_vec();
    assert_eq!(supports, vec![50.0, -20.0, 50.0, 20.0]);
    let starts = Uint32Array::new(&get(&ed, "curve_starts")).to_vec();
    assert_eq!(starts, vec![0, 24, 48]);
    let points = Float64Array::new(&get(&ed, "curve_points"));
    assert_eq!(points.length(), 96);

    assert!(g.remove_edge(e2));
    let ed = g.get_edge_data();
    assert_eq!(Int32Array::new(&get(&ed, "offsets")).to_vec(), vec![0]);
}

#[wasm_bindgen_test]
fn sole_move_snaps_and_returns_the_position() {
    let mut g = Graph::new();
    g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(100.0, 50.0).unwrap();
    let r = g.move_vertex_res(b, 103.0, 2.0, true);
    assert_eq!(get(&r, "ok").as_bool(), Some(true));
    let p = Float64Array::new(&get(&r, "value")).to_vec();
    assert_eq!(p, vec![103.0, 0.0]);
}

#[wasm_bindgen_test]
fn vertex_data_carries_attachments() {
    let mut g = Graph::new();
    g.add_vertex(10.0, 20.0).unwrap();
    let vd = g.get_vertex_data();
    assert_eq!(Float64Array::new(&get(&vd, "positions")).to_vec(), vec![10.0, 20.0]);
    assert_eq!(Float64Array::new(&get(&vd, "attachments")).to_vec(), vec![10.0, 30.0]);
}

#[wasm_bindgen_test]
fn zoom_and_config_round_trip() {
    let mut g = Graph::new();
    let a = g.add_vertex(40.0, 40.0).unwrap();
    assert!(g.set_zoom(200.0));
    assert_eq!(g.zoom_percent(), 200.0);
    assert_eq!(g.font_size(), 24.0);
    assert_eq!(Float64Array::new(&g.get_vertex(a)).to_vec(), vec![80.0, 80.0, 20.0]);

    let cfg = js_sys::Object::new();
    Reflect::set(&cfg, &JsValue::from_str("offsetDistance"), &JsValue::from_f64(30.0)).unwrap();
    Reflect::set(&cfg, &JsValue::from_str("zoomPercent"), &JsValue::from_f64(200.0)).unwrap();
    let r = g.set_config_res(cfg.into());
    assert_eq!(get(&r, "ok").as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn pick_json_and_svg() {
    let mut g = Graph::new();
    let a = g.add_vertex(0.0, 0.0).unwrap();
    let b = g.add_vertex(100.0, 0.0).unwrap();
    g.add_edge(a, b, true).unwrap();
    let p = g.pick(50.0, 1.0, 2.0);
    assert_eq!(get(&p, "kind").as_string().as_deref(), Some("edge"));
    assert!(g.pick(50.0, 50.0, 2.0).is_null());

    let paths: Vec<String> = serde_wasm_bindgen::from_value(g.to_svg_paths()).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths[0].starts_with("M 12 0 L 88 0"));
    assert!(!g.to_json().is_null());
}
