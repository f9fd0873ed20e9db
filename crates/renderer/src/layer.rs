//! Overlay layers and the capabilities they expose.
//!
//! Layers hold the field of the current time slice behind an `Arc`.
//! Replacing the slice swaps the pointer; a pass already holding the old
//! field keeps reading a consistent grid.

use std::sync::Arc;

use atmo_common::VariableKind;
use field::{ScalarField, VectorField};
use projection::ViewProjection;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::format::{format_value, format_wind};
use crate::mask::{MaskRasterizer, RasterStats};
use crate::scale::ColorScale;

/// A layer that paints into an RGBA8 pixel buffer.
pub trait Rasterizable {
    fn rasterize_into(
        &self,
        view: &ViewProjection,
        pixels: &mut [u8],
        width: usize,
        height: usize,
    ) -> Result<RasterStats>;
}

/// A layer that can describe its value at a geographic point.
pub trait PointSampleable {
    /// Display string for (lat, lng); `"-"` where there is no data.
    fn probe(&self, lat: f64, lng: f64) -> String;
}

/// Color-mapped scalar layer.
#[derive(Debug, Clone)]
pub struct MaskLayer {
    kind: VariableKind,
    field: Option<Arc<ScalarField>>,
    scale: Option<ColorScale>,
    rasterizer: MaskRasterizer,
}

impl MaskLayer {
    pub fn new(kind: VariableKind, config: RenderConfig) -> Result<Self> {
        let scale = ColorScale::for_kind(&kind, config.max_alpha);
        if scale.is_none() {
            tracing::warn!(kind = %kind, "No color scale for mask variable");
        }
        Ok(Self {
            kind,
            field: None,
            scale,
            rasterizer: MaskRasterizer::new(config)?,
        })
    }

    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    pub fn field(&self) -> Option<&Arc<ScalarField>> {
        self.field.as_ref()
    }

    pub fn scale(&self) -> Option<&ColorScale> {
        self.scale.as_ref()
    }

    /// Install the field for a new time slice, returning the previous one.
    pub fn set_field(&mut self, field: Option<Arc<ScalarField>>) -> Option<Arc<ScalarField>> {
        std::mem::replace(&mut self.field, field)
    }

    pub fn value_at(&self, lat: f64, lng: f64) -> Option<f32> {
        self.field.as_ref()?.sample_geo(lat, lng)
    }
}

impl Rasterizable for MaskLayer {
    fn rasterize_into(
        &self,
        view: &ViewProjection,
        pixels: &mut [u8],
        width: usize,
        height: usize,
    ) -> Result<RasterStats> {
        self.rasterizer.rasterize_with_stats(
            self.field.as_deref(),
            view,
            self.scale.as_ref(),
            width,
            height,
            pixels,
        )
    }
}

impl PointSampleable for MaskLayer {
    fn probe(&self, lat: f64, lng: f64) -> String {
        format_value(self.value_at(lat, lng), &self.kind)
    }
}

/// Wind field feeding the streamline animation.
///
/// Particle advection lives with the animation itself; this layer only
/// answers "what is the wind here".
#[derive(Debug, Clone, Default)]
pub struct StreamlineSource {
    field: Option<Arc<VectorField>>,
}

impl StreamlineSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self) -> Option<&Arc<VectorField>> {
        self.field.as_ref()
    }

    pub fn set_field(&mut self, field: Option<Arc<VectorField>>) -> Option<Arc<VectorField>> {
        std::mem::replace(&mut self.field, field)
    }

    /// Interpolated (u, v) in m/s.
    pub fn vector_at(&self, lat: f64, lng: f64) -> Option<(f32, f32)> {
        self.field.as_ref()?.sample_geo(lat, lng)
    }
}

impl PointSampleable for StreamlineSource {
    fn probe(&self, lat: f64, lng: f64) -> String {
        format_wind(self.vector_at(lat, lng))
    }
}

/// Isoline polygons in grid coordinates, as produced by an extractor.
///
/// A point (x, y) is a fractional (column, row) position.
#[derive(Debug, Clone, PartialEq)]
pub struct GridContour {
    pub level: f64,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Isoline polygons in geographic coordinates; points are (lat, lng).
#[derive(Debug, Clone, PartialEq)]
pub struct GeoContour {
    pub level: f64,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Computes isolines over a row-major grid of `nx` x `ny` values.
///
/// NoData cells arrive as `NaN`.
pub trait ContourExtractor {
    fn extract(&self, values: &[f32], nx: usize, ny: usize) -> Vec<GridContour>;
}

/// Scalar field drawn as isolines.
#[derive(Debug, Clone)]
pub struct ContourSource {
    kind: VariableKind,
    field: Option<Arc<ScalarField>>,
}

impl ContourSource {
    pub fn new(kind: VariableKind) -> Self {
        Self { kind, field: None }
    }

    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    pub fn field(&self) -> Option<&Arc<ScalarField>> {
        self.field.as_ref()
    }

    pub fn set_field(&mut self, field: Option<Arc<ScalarField>>) -> Option<Arc<ScalarField>> {
        std::mem::replace(&mut self.field, field)
    }

    pub fn value_at(&self, lat: f64, lng: f64) -> Option<f32> {
        self.field.as_ref()?.sample_geo(lat, lng)
    }

    /// Run `extractor` over the current field and place its rings on the map.
    ///
    /// Empty when there is no field.
    pub fn contours(&self, extractor: &dyn ContourExtractor) -> Vec<GeoContour> {
        let Some(field) = self.field.as_ref() else {
            tracing::debug!(kind = %self.kind, "No contour field");
            return Vec::new();
        };

        let geometry = field.geometry();
        extractor
            .extract(field.values(), geometry.nx, geometry.ny)
            .into_iter()
            .map(|contour| GeoContour {
                level: contour.level,
                rings: contour
                    .rings
                    .into_iter()
                    .map(|ring| {
                        ring.into_iter()
                            .map(|(x, y)| geometry.grid_to_geo(x, y))
                            .collect()
                    })
                    .collect(),
            })
            .collect()
    }
}

impl PointSampleable for ContourSource {
    fn probe(&self, lat: f64, lng: f64) -> String {
        format_value(self.value_at(lat, lng), &self.kind)
    }
}
