// Centralized bounds checked at the mutation boundary

// Scene size caps
pub const MAX_VERTICES: usize = 100_000;
pub const MAX_EDGES: usize = 200_000;
pub const MAX_ANNOTATIONS: usize = 100_000;

// Numeric bounds
pub const COORD_MIN: f64 = -10_000_000.0;
pub const COORD_MAX: f64 =  10_000_000.0;
pub const SIZE_MAX: f64 = 100_000.0;       // radius, distances, widths (px)
pub const ZOOM_MAX: f64 = 100_000.0;       // percent

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_size_bounds(s: f64) -> bool { s.is_finite() && s >= 0.0 && s <= SIZE_MAX }

#[inline]
pub fn in_zoom_bounds(z: f64) -> bool { z.is_finite() && z > 0.0 && z <= ZOOM_MAX }
