//! JSON documents describing a decoded field.
//!
//! Decoding tiles is the fetcher's job; what reaches this crate is a plain
//! document with the grid placement and the samples, `null` marking NoData:
//!
//! ```json
//! { "lat0": 50.0, "lng0": 120.0, "dlat": 0.5, "dlng": 0.5, "nx": 2, "ny": 1,
//!   "values": [101300.0, null] }
//! ```
//!
//! Vector documents carry `u` and `v` instead of `values`.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};
use crate::geometry::GridGeometry;
use crate::scalar::ScalarField;
use crate::vector::VectorField;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDocument {
    pub lat0: f64,
    pub lng0: f64,
    pub dlat: f64,
    pub dlng: f64,
    pub nx: usize,
    pub ny: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Option<f32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<Vec<Option<f32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<Vec<Option<f32>>>,
}

impl FieldDocument {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Describe an existing scalar field.
    pub fn from_scalar(field: &ScalarField) -> Self {
        let mut doc = Self::with_geometry(field.geometry());
        doc.values = Some(to_optional(field.values()));
        doc
    }

    /// Describe an existing vector field.
    pub fn from_vector(field: &VectorField) -> Self {
        let mut doc = Self::with_geometry(field.geometry());
        doc.u = Some(to_optional(field.u()));
        doc.v = Some(to_optional(field.v()));
        doc
    }

    pub fn geometry(&self) -> Result<GridGeometry> {
        GridGeometry::new(self.lat0, self.lng0, self.dlat, self.dlng, self.nx, self.ny)
    }

    pub fn is_vector(&self) -> bool {
        self.u.is_some() && self.v.is_some()
    }

    pub fn into_scalar(self) -> Result<ScalarField> {
        let geometry = self.geometry()?;
        let values = self
            .values
            .ok_or_else(|| FieldError::invalid_geometry("document has no 'values' array"))?;
        ScalarField::new(geometry, from_optional(values))
    }

    pub fn into_vector(self) -> Result<VectorField> {
        let geometry = self.geometry()?;
        match (self.u, self.v) {
            (Some(u), Some(v)) => VectorField::new(geometry, from_optional(u), from_optional(v)),
            _ => Err(FieldError::invalid_geometry(
                "document needs both 'u' and 'v' arrays",
            )),
        }
    }

    fn with_geometry(g: &GridGeometry) -> Self {
        Self {
            lat0: g.lat0,
            lng0: g.lng0,
            dlat: g.d_lat,
            dlng: g.d_lng,
            nx: g.nx,
            ny: g.ny,
            values: None,
            u: None,
            v: None,
        }
    }
}

fn from_optional(values: Vec<Option<f32>>) -> Vec<f32> {
    values.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect()
}

fn to_optional(values: &[f32]) -> Vec<Option<f32>> {
    values.iter().map(|v| (!v.is_nan()).then_some(*v)).collect()
}
