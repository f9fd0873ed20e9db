//! Grid placement on the globe.

use atmo_common::GeoBounds;
use serde::{Deserialize, Serialize};

use crate::error::{Axis, FieldError, Result};

/// Tolerance for deciding that a grid wraps around the globe.
const WRAP_EPSILON: f64 = 1e-6;

/// Specification of a regular lat/lng grid.
///
/// Row 0 is the northern edge; latitude decreases by `d_lat` per row.
/// Column 0 is the western edge; longitude increases by `d_lng` per column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Latitude of the first (north-west) grid point
    pub lat0: f64,
    /// Longitude of the first (north-west) grid point
    pub lng0: f64,
    /// Row spacing in degrees (positive)
    pub d_lat: f64,
    /// Column spacing in degrees (positive)
    pub d_lng: f64,
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl GridGeometry {
    pub fn new(lat0: f64, lng0: f64, d_lat: f64, d_lng: f64, nx: usize, ny: usize) -> Result<Self> {
        let geometry = Self {
            lat0,
            lng0,
            d_lat,
            d_lng,
            nx,
            ny,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nx == 0 || self.ny == 0 {
            return Err(FieldError::invalid_geometry(format!(
                "empty grid {}x{}",
                self.nx, self.ny
            )));
        }
        if !self.lat0.is_finite() || !self.lng0.is_finite() {
            return Err(FieldError::invalid_geometry("origin must be finite"));
        }
        if !(self.d_lat.is_finite() && self.d_lat > 0.0) || !(self.d_lng.is_finite() && self.d_lng > 0.0) {
            return Err(FieldError::invalid_geometry(format!(
                "spacing must be positive, got d_lat={} d_lng={}",
                self.d_lat, self.d_lng
            )));
        }
        Ok(())
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the columns span the full 360 degrees, so that the last
    /// column neighbours the first.
    pub fn wraps_lng(&self) -> bool {
        (self.nx as f64 * self.d_lng - 360.0).abs() < WRAP_EPSILON
    }

    /// Largest valid fractional column index.
    pub fn max_col(&self) -> f64 {
        if self.wraps_lng() {
            // Exclusive: col == nx is column 0 again.
            self.nx as f64 - f64::EPSILON * self.nx as f64
        } else {
            (self.nx - 1) as f64
        }
    }

    /// Largest valid fractional row index.
    pub fn max_row(&self) -> f64 {
        (self.ny - 1) as f64
    }

    /// Fractional column index of a longitude.
    ///
    /// The longitude is wrapped into `[lng0, lng0 + 360)` first, so a grid
    /// stored 0..360 accepts -180..180 input.
    pub fn axis_index_lng(&self, lng: f64) -> Result<f64> {
        if !lng.is_finite() {
            return Err(FieldError::out_of_bounds(Axis::Column, lng, self.max_col()));
        }
        let mut offset = (lng - self.lng0).rem_euclid(360.0);
        if offset >= 360.0 {
            // rem_euclid of a tiny negative offset rounds up to 360.
            offset = 0.0;
        }
        let col = offset / self.d_lng;
        self.check_col(col)
    }

    /// Fractional row index of a latitude.
    pub fn axis_index_lat(&self, lat: f64) -> Result<f64> {
        let row = (self.lat0 - lat) / self.d_lat;
        self.check_row(row)
    }

    /// Geographic position of an integer grid point.
    pub fn point(&self, col: usize, row: usize) -> Option<(f64, f64)> {
        if col >= self.nx || row >= self.ny {
            return None;
        }
        Some(self.grid_to_geo(col as f64, row as f64))
    }

    /// Geographic position of a fractional grid position.
    ///
    /// Used to place contour geometry computed in grid space.
    pub fn grid_to_geo(&self, col: f64, row: f64) -> (f64, f64) {
        (self.lat0 - self.d_lat * row, self.lng0 + self.d_lng * col)
    }

    /// Bounds spanned by the grid points.
    pub fn bounds(&self) -> GeoBounds {
        let (south, east) = self.grid_to_geo(self.max_col(), self.max_row());
        GeoBounds::new(south, self.lng0, self.lat0, east)
    }

    /// Row-major flat index.
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        row * self.nx + col
    }

    pub(crate) fn check_col(&self, col: f64) -> Result<f64> {
        let max = self.max_col();
        if col.is_finite() && col >= 0.0 && col <= max {
            Ok(col)
        } else {
            Err(FieldError::out_of_bounds(Axis::Column, col, max))
        }
    }

    pub(crate) fn check_row(&self, row: f64) -> Result<f64> {
        let max = self.max_row();
        if row.is_finite() && row >= 0.0 && row <= max {
            Ok(row)
        } else {
            Err(FieldError::out_of_bounds(Axis::Row, row, max))
        }
    }
}
