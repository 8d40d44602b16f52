use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Graph { pub(crate) inner: curvenet::Graph }

impl Graph {
    pub fn rs_new() -> Graph { Graph { inner: curvenet::Graph::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
