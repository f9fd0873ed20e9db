//! Scalar fields.

use atmo_common::GeoBounds;

use crate::error::{FieldError, Result};
use crate::geometry::GridGeometry;
use crate::interpolation::{self, InterpolationMethod};

/// An immutable grid of scalar samples; `NaN` marks NoData.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    geometry: GridGeometry,
    values: Vec<f32>,
}

impl ScalarField {
    /// Build a field, checking that `values.len() == nx * ny`.
    pub fn new(geometry: GridGeometry, values: Vec<f32>) -> Result<Self> {
        geometry.validate()?;
        if values.len() != geometry.len() {
            return Err(FieldError::ShapeMismatch {
                nx: geometry.nx,
                ny: geometry.ny,
                expected: geometry.len(),
                actual: values.len(),
            });
        }
        Ok(Self { geometry, values })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Raw row-major samples, `NaN` for NoData.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn bounds(&self) -> GeoBounds {
        self.geometry.bounds()
    }

    /// Value of one grid cell.
    pub fn cell(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.geometry.nx || row >= self.geometry.ny {
            return None;
        }
        let v = self.values[self.geometry.flat_index(col, row)];
        (!v.is_nan()).then_some(v)
    }

    /// Bilinear sample at fractional grid indices.
    ///
    /// Indices outside the grid are a caller bug and return
    /// [`FieldError::OutOfBounds`]; a NoData neighbour yields `Ok(None)`.
    pub fn sample_at(&self, col: f64, row: f64) -> Result<Option<f32>> {
        self.sample_with(InterpolationMethod::Bilinear, col, row)
    }

    /// Nearest-cell sample at fractional grid indices.
    pub fn sample_nearest(&self, col: f64, row: f64) -> Result<Option<f32>> {
        self.sample_with(InterpolationMethod::Nearest, col, row)
    }

    pub fn sample_with(&self, method: InterpolationMethod, col: f64, row: f64) -> Result<Option<f32>> {
        let col = self.geometry.check_col(col)?;
        let row = self.geometry.check_row(row)?;
        Ok(interpolation::interpolate(method, &self.values, &self.geometry, col, row))
    }

    /// Bilinear sample at a geographic coordinate.
    ///
    /// Coordinates outside the grid are NoData, never extrapolated.
    pub fn sample_geo(&self, lat: f64, lng: f64) -> Option<f32> {
        let col = self.geometry.axis_index_lng(lng).ok()?;
        let row = self.geometry.axis_index_lat(lat).ok()?;
        interpolation::bilinear(&self.values, &self.geometry, col, row)
    }

    /// Smallest and largest finite sample, if any.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
