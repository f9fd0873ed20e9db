//! Spherical Mercator projection.
//!
//! This is the projection used by slippy maps (EPSG:3857). Geographic
//! coordinates are projected to metres on a sphere, then scaled into a
//! square world of `256 * 2^zoom` pixels whose origin is the north-west
//! corner.
//!
//! The view projection adds two parameters on top of that:
//! - origin: world-pixel position of the viewport's top-left corner
//! - pixel ratio: physical pixels per CSS pixel (1 or 2)

use atmo_common::GeoBounds;
use std::f64::consts::PI;

/// Sphere radius (metres) shared with the tile pyramid.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Metres to normalized world units: `1 / (2πR)`.
pub const MERCATOR_SCALE: f64 = 0.5 / (PI * EARTH_RADIUS);

/// Latitude at which the square world ends.
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Largest latitude a view projects. Rows above or below the square world
/// unproject past [`MAX_LATITUDE`] and must project back to themselves.
const POLE_LATITUDE: f64 = 90.0 - 1e-9;

/// Pixels per tile edge.
pub const TILE_SIZE: f64 = 256.0;

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Invalid pixel ratio {0}: expected 1 or 2")]
    InvalidPixelRatio(f64),

    #[error("Invalid zoom level: {0}")]
    InvalidZoom(f64),
}

/// Geographic <-> projected metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalMercator;

impl SphericalMercator {
    /// Project (lat, lng) degrees to (x, y) metres.
    ///
    /// Latitudes beyond [`MAX_LATITUDE`] are clamped.
    pub fn project(lat: f64, lng: f64) -> (f64, f64) {
        Self::project_unclamped(lat.clamp(-MAX_LATITUDE, MAX_LATITUDE), lng)
    }

    /// Project without the square-world clamp. `lat` must lie strictly
    /// between the poles.
    fn project_unclamped(lat: f64, lng: f64) -> (f64, f64) {
        let x = EARTH_RADIUS * lng.to_radians();
        let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        (x, y)
    }

    /// Inverse of [`SphericalMercator::project`]: (x, y) metres to (lat, lng) degrees.
    pub fn unproject(x: f64, y: f64) -> (f64, f64) {
        let to_deg = 180.0 / PI;
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0) * to_deg;
        let lng = x / EARTH_RADIUS * to_deg;
        (lat, lng)
    }
}

/// Projection for one rasterization pass.
///
/// A pure function of the view: two calls with identical inputs always
/// return identical outputs, which lets the rasterizer resolve longitudes
/// per column and latitudes per row independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    zoom: f64,
    origin_x: f64,
    origin_y: f64,
    pixel_ratio: f64,
    scale: f64,
}

impl ViewProjection {
    /// Create a view projection.
    ///
    /// # Arguments
    /// * `zoom` - Zoom level (fractional zooms allowed)
    /// * `origin` - World-pixel position of the viewport's top-left corner
    /// * `pixel_ratio` - Device pixel density, 1 or 2
    pub fn new(zoom: f64, origin: (f64, f64), pixel_ratio: f64) -> Result<Self, ProjectionError> {
        if !zoom.is_finite() || zoom < 0.0 {
            return Err(ProjectionError::InvalidZoom(zoom));
        }
        if pixel_ratio != 1.0 && pixel_ratio != 2.0 {
            return Err(ProjectionError::InvalidPixelRatio(pixel_ratio));
        }

        Ok(Self {
            zoom,
            origin_x: origin.0,
            origin_y: origin.1,
            pixel_ratio,
            scale: TILE_SIZE * 2f64.powf(zoom),
        })
    }

    /// Create a view centered on (lat, lng) for a viewport of
    /// `width` x `height` physical pixels.
    pub fn centered(
        lat: f64,
        lng: f64,
        zoom: f64,
        width: usize,
        height: usize,
        pixel_ratio: f64,
    ) -> Result<Self, ProjectionError> {
        let probe = Self::new(zoom, (0.0, 0.0), pixel_ratio)?;
        let (cx, cy) = probe.world_pixel(lat, lng);
        let half_w = width as f64 / pixel_ratio / 2.0;
        let half_h = height as f64 / pixel_ratio / 2.0;
        Self::new(zoom, (cx - half_w, cy - half_h), pixel_ratio)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// World size in pixels: `256 * 2^zoom`.
    pub fn world_scale(&self) -> f64 {
        self.scale
    }

    /// Longitude of physical pixel column `px`.
    pub fn unproject_lng(&self, px: f64) -> f64 {
        let wx = self.origin_x + px / self.pixel_ratio;
        (wx / self.scale - 0.5) * 360.0
    }

    /// Latitude of physical pixel row `py`.
    pub fn unproject_lat(&self, py: f64) -> f64 {
        let wy = self.origin_y + py / self.pixel_ratio;
        let mercator_y = (0.5 - wy / self.scale) / MERCATOR_SCALE;
        (2.0 * (mercator_y / EARTH_RADIUS).exp().atan() - PI / 2.0) * 180.0 / PI
    }

    /// Physical pixel (x, y) to (lat, lng) degrees.
    pub fn unproject(&self, px: f64, py: f64) -> (f64, f64) {
        (self.unproject_lat(py), self.unproject_lng(px))
    }

    /// (lat, lng) degrees to physical pixel (x, y).
    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let (wx, wy) = self.world_pixel(lat, lng);
        (
            (wx - self.origin_x) * self.pixel_ratio,
            (wy - self.origin_y) * self.pixel_ratio,
        )
    }

    /// Geographic bounds covered by a `width` x `height` physical-pixel viewport.
    pub fn bounds(&self, width: usize, height: usize) -> GeoBounds {
        let (north, west) = self.unproject(0.0, 0.0);
        let (south, east) = self.unproject(width as f64, height as f64);
        GeoBounds::new(south, west, north, east)
    }

    fn world_pixel(&self, lat: f64, lng: f64) -> (f64, f64) {
        let lat = lat.clamp(-POLE_LATITUDE, POLE_LATITUDE);
        let (x, y) = SphericalMercator::project_unclamped(lat, lng);
        (
            self.scale * (x * MERCATOR_SCALE + 0.5),
            self.scale * (0.5 - y * MERCATOR_SCALE),
        )
    }
}
