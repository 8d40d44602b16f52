//! Zoom scaling of every size-bearing quantity.
//!
//! Ideal values are rescaled multiplicatively, `ideal / old * new`, and only
//! truncated when read, so repeated zooming does not drift and returning to a
//! previous percentage restores pixel values up to truncation.

use crate::config::{check_zoom, LayoutConfig};
use crate::error::Result;
use crate::model::{GeometryModel, Scaled};
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomScaler {
    percent: f64,
    offset_distance: Scaled,
    loop_offset_distance: Scaled,
    arrow_length: Scaled,
    font_size: Scaled,
}

impl ZoomScaler {
    /// Scaler at the config's zoom, with sizes taken as given at 100%.
    pub fn new(config: &LayoutConfig) -> Self {
        let f = config.zoom_percent / 100.0;
        ZoomScaler {
            percent: config.zoom_percent,
            offset_distance: Scaled::new(config.offset_distance * f),
            loop_offset_distance: Scaled::new(config.loop_offset_distance * f),
            arrow_length: Scaled::new(config.arrow_length * f),
            font_size: Scaled::new(config.font_size * f),
        }
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
    pub fn offset_distance(&self) -> f64 {
        self.offset_distance.px()
    }
    pub fn loop_offset_distance(&self) -> f64 {
        self.loop_offset_distance.px()
    }
    pub fn arrow_length(&self) -> f64 {
        self.arrow_length.px()
    }
    pub fn font_size(&self) -> f64 {
        self.font_size.px()
    }

    /// Converts a size given at 100% into an ideal value at the current zoom.
    pub fn at_current(&self, base: f64) -> f64 {
        base * self.percent / 100.0
    }

    /// Rescales the scaler's own sizes and every position and radius in `model`.
    pub fn rezoom(&mut self, model: &mut GeometryModel, new_percent: f64) -> Result<()> {
        check_zoom(new_percent)?;
        let old = self.percent;
        for s in [
            &mut self.offset_distance,
            &mut self.loop_offset_distance,
            &mut self.arrow_length,
            &mut self.font_size,
        ] {
            s.rescale(old, new_percent);
        }
        for v in model.vertices.iter_mut().flatten() {
            v.x.rescale(old, new_percent);
            v.y.rescale(old, new_percent);
            v.radius.rescale(old, new_percent);
        }
        for a in model.annotations.iter_mut().flatten() {
            a.x.rescale(old, new_percent);
            a.y.rescale(old, new_percent);
        }
        self.percent = new_percent;
        debug!(from = old, to = new_percent, "zoom changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Disc, Vertex};

    #[test]
    fn sizes_follow_zoom() {
        let mut z = ZoomScaler::new(&LayoutConfig::default());
        let mut m = GeometryModel::new();
        z.rezoom(&mut m, 150.0).unwrap();
        assert_eq!(z.offset_distance(), 30.0);
        assert_eq!(z.arrow_length(), 15.0);
        assert_eq!(z.font_size(), 18.0);
    }

    #[test]
    fn round_trip_restores_positions() {
        let mut z = ZoomScaler::new(&LayoutConfig::default());
        let mut m = GeometryModel::new();
        let id = m.insert_vertex(Vertex::new(123.0, 77.0, 10.0, 1.0));
        for p in [33.0, 250.0, 71.0, 100.0] {
            z.rezoom(&mut m, p).unwrap();
        }
        let c = m.vertex(id).unwrap().center();
        assert!((c.x - 123.0).abs() <= 1.0 && (c.y - 77.0).abs() <= 1.0);
    }

    #[test]
    fn non_positive_zoom_is_rejected_without_change() {
        let mut z = ZoomScaler::new(&LayoutConfig::default());
        let mut m = GeometryModel::new();
        assert!(z.rezoom(&mut m, 0.0).is_err());
        assert!(z.rezoom(&mut m, -50.0).is_err());
        assert_eq!(z.percent(), 100.0);
    }
}
