use curvenet::Vec2;
use js_sys::{Float64Array, Int32Array, Object, Reflect, Uint32Array};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_i32(slice: &[i32]) -> Int32Array {
    let arr = Int32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
pub fn arr_f64(slice: &[f64]) -> Float64Array {
    let arr = Float64Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
/// Interleaved `[x0, y0, x1, y1, ...]`.
pub fn push_point(out: &mut Vec<f64>, p: Vec2) {
    out.push(p.x); out.push(p.y);
}
pub fn point(p: Vec2) -> JsValue {
    arr_f64(&[p.x, p.y]).into()
}
