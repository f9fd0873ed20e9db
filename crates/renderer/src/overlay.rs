//! Composition of the wind, mask and contour layers.
//!
//! A render pass paints the mask layer and refreshes the point readout at
//! the probed location. The pass returns a [`PassOutcome`]; there is no
//! completion callback.

use std::time::{Duration, Instant};

use atmo_common::VariableKind;
use projection::ViewProjection;

use crate::config::RenderConfig;
use crate::error::Result;
use crate::layer::{ContourSource, MaskLayer, PointSampleable, Rasterizable, StreamlineSource};
use crate::mask::{buffer_len, RasterStats};

/// Text shown at a probed point: wind, mask variable, contour variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointReadout {
    pub wind: String,
    pub mask: String,
    pub contour: String,
}

impl PointReadout {
    pub fn lines(&self) -> [&str; 3] {
        [&self.wind, &self.mask, &self.contour]
    }
}

/// Result of one render pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub stats: RasterStats,
    /// Readout at the probe location, when one is set and wind is present.
    pub readout: Option<PointReadout>,
    pub elapsed: Duration,
}

/// The three overlay layers plus an optional probe location.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub wind: StreamlineSource,
    pub mask: MaskLayer,
    pub contour: ContourSource,
    probe_at: Option<(f64, f64)>,
}

impl Overlay {
    pub fn new(mask: VariableKind, contour: VariableKind, config: RenderConfig) -> Result<Self> {
        Ok(Self {
            wind: StreamlineSource::new(),
            mask: MaskLayer::new(mask, config)?,
            contour: ContourSource::new(contour),
            probe_at: None,
        })
    }

    /// Precipitation mask under pressure contours.
    pub fn standard(config: RenderConfig) -> Result<Self> {
        Self::new(VariableKind::Precipitation, VariableKind::Pressure, config)
    }

    pub fn probe_location(&self) -> Option<(f64, f64)> {
        self.probe_at
    }

    /// Readout at (lat, lng) without moving the probe.
    ///
    /// `None` when the wind field has no data there.
    pub fn readout_at(&self, lat: f64, lng: f64) -> Option<PointReadout> {
        self.wind.vector_at(lat, lng)?;
        Some(PointReadout {
            wind: self.wind.probe(lat, lng),
            mask: self.mask.probe(lat, lng),
            contour: self.contour.probe(lat, lng),
        })
    }

    /// Move the probe to (lat, lng) and return its readout.
    ///
    /// The probe only moves when wind is present at the point.
    pub fn probe(&mut self, lat: f64, lng: f64) -> Option<PointReadout> {
        let readout = self.readout_at(lat, lng)?;
        self.probe_at = Some((lat, lng));
        Some(readout)
    }

    pub fn clear_probe(&mut self) {
        self.probe_at = None;
    }

    /// Paint the mask for `view` into a new `width` x `height` buffer.
    pub fn render(&self, view: &ViewProjection, width: usize, height: usize) -> Result<PassOutcome> {
        let start = Instant::now();
        let mut pixels = vec![0u8; buffer_len(width, height)?];

        let stats = self.mask.rasterize_into(view, &mut pixels, width, height)?;
        if stats.skipped {
            tracing::warn!(kind = %self.mask.kind(), "Render pass without mask field");
        }

        let readout = self
            .probe_at
            .and_then(|(lat, lng)| self.readout_at(lat, lng));

        let elapsed = start.elapsed();
        tracing::debug!(
            width,
            height,
            zoom = view.zoom(),
            sampled = stats.sampled,
            nodata = stats.nodata,
            has_readout = readout.is_some(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Render pass complete"
        );

        Ok(PassOutcome {
            pixels,
            width,
            height,
            stats,
            readout,
            elapsed,
        })
    }
}
