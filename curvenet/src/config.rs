use crate::error::{Error, Result};
use crate::geometry::limits;
use serde::{Deserialize, Serialize};

/// Layout parameters. Sizes are given at 100% zoom; the zoom scaler derives
/// the pixel values actually used by the geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Perpendicular spacing between fanned-out parallel edges.
    pub offset_distance: f64,
    /// Vertical spacing between nested loops, and their half-width.
    pub loop_offset_distance: f64,
    pub vpas_tolerance: f64,
    pub vpas_enabled: bool,
    pub dynamic_labeling: bool,
    pub zoom_percent: f64,
    /// Default edge line width for new vertices.
    pub edge_line_width: f64,
    pub arrow_length: f64,
    pub font_size: f64,
    /// Default radius for new vertices.
    pub vertex_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            offset_distance: 20.0,
            loop_offset_distance: 20.0,
            vpas_tolerance: 5.0,
            vpas_enabled: true,
            dynamic_labeling: true,
            zoom_percent: 100.0,
            edge_line_width: 1.0,
            arrow_length: 10.0,
            font_size: 12.0,
            vertex_radius: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: LayoutConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_value(v: serde_json::Value) -> Result<Self> {
        let cfg: LayoutConfig = serde_json::from_value(v)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("offsetDistance", self.offset_distance),
            ("loopOffsetDistance", self.loop_offset_distance),
            ("vpasTolerance", self.vpas_tolerance),
            ("edgeLineWidth", self.edge_line_width),
            ("arrowLength", self.arrow_length),
            ("fontSize", self.font_size),
            ("vertexRadius", self.vertex_radius),
        ];
        for (param, value) in sizes {
            check_size(param, value)?;
        }
        check_zoom(self.zoom_percent)
    }
}

pub(crate) fn check_size(param: &'static str, value: f64) -> Result<()> {
    if limits::in_size_bounds(value) {
        Ok(())
    } else {
        Err(Error::invalid(
            param,
            format!("must be finite and within [0, {}], got {}", limits::SIZE_MAX, value),
        ))
    }
}

pub(crate) fn check_zoom(percent: f64) -> Result<()> {
    if limits::in_zoom_bounds(percent) {
        Ok(())
    } else {
        Err(Error::invalid(
            "zoomPercent",
            format!("must be positive and at most {}, got {}", limits::ZOOM_MAX, percent),
        ))
    }
}

pub(crate) fn check_coord(param: &'static str, value: f64) -> Result<()> {
    if limits::in_coord_bounds(value) {
        Ok(())
    } else {
        Err(Error::invalid(
            param,
            format!("must be finite and within [{}, {}], got {}", limits::COORD_MIN, limits::COORD_MAX, value),
        ))
    }
}
