//! Two-component (u, v) vector fields.

use crate::error::{FieldError, Result};
use crate::geometry::GridGeometry;
use crate::interpolation::{self, InterpolationMethod};

/// An immutable grid of (u, v) samples sharing one geometry.
///
/// Components are interpolated independently; speed and direction are
/// derived by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    geometry: GridGeometry,
    u: Vec<f32>,
    v: Vec<f32>,
}

impl VectorField {
    pub fn new(geometry: GridGeometry, u: Vec<f32>, v: Vec<f32>) -> Result<Self> {
        geometry.validate()?;
        for plane in [&u, &v] {
            if plane.len() != geometry.len() {
                return Err(FieldError::ShapeMismatch {
                    nx: geometry.nx,
                    ny: geometry.ny,
                    expected: geometry.len(),
                    actual: plane.len(),
                });
            }
        }
        Ok(Self { geometry, u, v })
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn u(&self) -> &[f32] {
        &self.u
    }

    pub fn v(&self) -> &[f32] {
        &self.v
    }

    /// Bilinear (u, v) at fractional grid indices.
    pub fn sample_at(&self, col: f64, row: f64) -> Result<Option<(f32, f32)>> {
        self.sample_with(InterpolationMethod::Bilinear, col, row)
    }

    pub fn sample_with(
        &self,
        method: InterpolationMethod,
        col: f64,
        row: f64,
    ) -> Result<Option<(f32, f32)>> {
        let col = self.geometry.check_col(col)?;
        let row = self.geometry.check_row(row)?;
        Ok(self.interpolate(method, col, row))
    }

    /// Bilinear (u, v) at a geographic coordinate; NoData outside the grid
    /// or where either component is missing.
    pub fn sample_geo(&self, lat: f64, lng: f64) -> Option<(f32, f32)> {
        let col = self.geometry.axis_index_lng(lng).ok()?;
        let row = self.geometry.axis_index_lat(lat).ok()?;
        self.interpolate(InterpolationMethod::Bilinear, col, row)
    }

    fn interpolate(&self, method: InterpolationMethod, col: f64, row: f64) -> Option<(f32, f32)> {
        let u = interpolation::interpolate(method, &self.u, &self.geometry, col, row)?;
        let v = interpolation::interpolate(method, &self.v, &self.geometry, col, row)?;
        Some((u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_interpolate_independently() {
        let g = GridGeometry::new(1.0, 0.0, 1.0, 1.0, 2, 2).unwrap();
        let f = VectorField::new(g, vec![0.0, 2.0, 0.0, 2.0], vec![-4.0, -4.0, 0.0, 0.0]).unwrap();
        assert_eq!(f.sample_at(0.5, 0.5).unwrap(), Some((1.0, -2.0)));
        assert_eq!(f.sample_geo(0.5, 0.5), Some((1.0, -2.0)));
    }

    #[test]
    fn test_missing_component_is_nodata() {
        let g = GridGeometry::new(1.0, 0.0, 1.0, 1.0, 2, 2).unwrap();
        let f = VectorField::new(g, vec![1.0; 4], vec![1.0, f32::NAN, 1.0, 1.0]).unwrap();
        assert_eq!(f.sample_at(0.5, 0.5).unwrap(), None);
    }

    #[test]
    fn test_plane_length_checked() {
        let g = GridGeometry::new(1.0, 0.0, 1.0, 1.0, 2, 2).unwrap();
        assert!(VectorField::new(g, vec![1.0; 4], vec![1.0; 3]).is_err());
    }
}
