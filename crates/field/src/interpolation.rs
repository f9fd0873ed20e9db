//! Interpolation methods for grid sampling.
//!
//! Both methods take fractional indices that the caller has already
//! validated against the geometry, and return `None` for NoData.

use serde::{Deserialize, Serialize};

use crate::geometry::GridGeometry;

/// Interpolation method for sampling between grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Value of the nearest grid point.
    Nearest,
    /// Weighted blend of the four surrounding grid points.
    #[default]
    Bilinear,
}

impl InterpolationMethod {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            _ => Self::Bilinear,
        }
    }
}

/// Read one cell, mapping the NaN sentinel to `None`.
#[inline]
fn cell(data: &[f32], geometry: &GridGeometry, col: usize, row: usize) -> Option<f32> {
    let v = data[geometry.flat_index(col, row)];
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

/// Column to the east of `col`: wraps on global grids, clamps at the edge otherwise.
#[inline]
fn next_col(geometry: &GridGeometry, col: usize) -> usize {
    if col + 1 < geometry.nx {
        col + 1
    } else if geometry.wraps_lng() {
        0
    } else {
        geometry.nx - 1
    }
}

/// Nearest neighbor interpolation.
pub fn nearest(data: &[f32], geometry: &GridGeometry, col: f64, row: f64) -> Option<f32> {
    let mut c = col.round() as usize;
    if c >= geometry.nx {
        // Rounded past the last column of a wrapping grid.
        c = if geometry.wraps_lng() { 0 } else { geometry.nx - 1 };
    }
    let r = (row.round() as usize).min(geometry.ny - 1);
    cell(data, geometry, c, r)
}

/// Bilinear interpolation.
///
/// If any of the contributing cells is NoData the result is NoData;
/// missing data is never blended. A neighbour with zero weight (the
/// position lies exactly on a grid line) does not contribute.
pub fn bilinear(data: &[f32], geometry: &GridGeometry, col: f64, row: f64) -> Option<f32> {
    let x0 = (col.floor() as usize).min(geometry.nx - 1);
    let y0 = (row.floor() as usize).min(geometry.ny - 1);

    let fx = col - x0 as f64;
    let fy = row - y0 as f64;

    let x1 = if fx > 0.0 { next_col(geometry, x0) } else { x0 };
    let y1 = if fy > 0.0 { (y0 + 1).min(geometry.ny - 1) } else { y0 };

    let v00 = cell(data, geometry, x0, y0)? as f64;
    let v10 = cell(data, geometry, x1, y0)? as f64;
    let v01 = cell(data, geometry, x0, y1)? as f64;
    let v11 = cell(data, geometry, x1, y1)? as f64;

    let top = v00 * (1.0 - fx) + v10 * fx;
    let bottom = v01 * (1.0 - fx) + v11 * fx;
    Some((top * (1.0 - fy) + bottom * fy) as f32)
}

/// Dispatch on an [`InterpolationMethod`].
pub fn interpolate(
    method: InterpolationMethod,
    data: &[f32],
    geometry: &GridGeometry,
    col: f64,
    row: f64,
) -> Option<f32> {
    match method {
        InterpolationMethod::Nearest => nearest(data, geometry, col, row),
        InterpolationMethod::Bilinear => bilinear(data, geometry, col, row),
    }
}
