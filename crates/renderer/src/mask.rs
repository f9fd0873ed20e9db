//! Color-mapped raster ("mask") generation.
//!
//! The field is sampled once per 2x2 block of physical pixels. Because the
//! projection is separable, the grid column for every sampled x and the grid
//! row for every sampled y are resolved once per pass; the inner loop is a
//! bilinear lookup plus a color evaluation.
//!
//! Rows are split into disjoint bands of [`SAMPLE_STRIDE`] pixel rows and
//! painted in parallel. Every block is a pure function of its position, so
//! the buffer is identical whatever the thread count.

use std::time::Instant;

use field::ScalarField;
use projection::ViewProjection;
use rayon::prelude::*;

use crate::color::Rgba;
use crate::config::{RenderConfig, SAMPLE_STRIDE};
use crate::error::{RenderError, Result};
use crate::scale::ColorScale;

/// Counters for one rasterization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterStats {
    pub width: usize,
    pub height: usize,
    /// Sample points evaluated (one per block).
    pub sampled: usize,
    /// Sample points that fell outside the grid or on NoData.
    pub nodata: usize,
    /// The pass had no field or no scale and left the buffer transparent.
    pub skipped: bool,
}

impl RasterStats {
    /// Blocks that received a value (they may still be transparent, e.g.
    /// precipitation below the drawing floor).
    pub fn valid(&self) -> usize {
        self.sampled - self.nodata
    }
}

/// Byte length of a `width` x `height` RGBA8 buffer.
pub fn buffer_len(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(RenderError::Dimensions { width, height })
}

/// Paints a scalar field into an RGBA8 buffer.
#[derive(Debug, Clone, Default)]
pub struct MaskRasterizer {
    config: RenderConfig,
}

impl MaskRasterizer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Rasterize into a freshly allocated `width * height * 4` buffer.
    pub fn rasterize(
        &self,
        field: Option<&ScalarField>,
        view: &ViewProjection,
        scale: Option<&ColorScale>,
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>> {
        let mut pixels = vec![0u8; buffer_len(width, height)?];
        self.rasterize_with_stats(field, view, scale, width, height, &mut pixels)?;
        Ok(pixels)
    }

    /// Rasterize into a caller-owned buffer.
    pub fn rasterize_into(
        &self,
        field: Option<&ScalarField>,
        view: &ViewProjection,
        scale: Option<&ColorScale>,
        width: usize,
        height: usize,
        pixels: &mut [u8],
    ) -> Result<()> {
        self.rasterize_with_stats(field, view, scale, width, height, pixels)
            .map(|_| ())
    }

    /// Rasterize into a caller-owned buffer and report what was drawn.
    ///
    /// The buffer is cleared first. With no field or no scale it stays fully
    /// transparent.
    pub fn rasterize_with_stats(
        &self,
        field: Option<&ScalarField>,
        view: &ViewProjection,
        scale: Option<&ColorScale>,
        width: usize,
        height: usize,
        pixels: &mut [u8],
    ) -> Result<RasterStats> {
        let expected = buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        pixels.fill(0);
        let mut stats = RasterStats {
            width,
            height,
            ..Default::default()
        };

        let (field, scale) = match (field, scale) {
            (Some(field), Some(scale)) => (field, scale),
            (field, scale) => {
                tracing::debug!(
                    has_field = field.is_some(),
                    has_scale = scale.is_some(),
                    "Skipping mask pass"
                );
                stats.skipped = true;
                return Ok(stats);
            }
        };

        if width == 0 || height == 0 {
            return Ok(stats);
        }

        let start = Instant::now();
        let (sampled, nodata) = self.paint(field, view, scale, width, height, pixels);
        stats.sampled = sampled;
        stats.nodata = nodata;

        tracing::debug!(
            width,
            height,
            sampled,
            nodata,
            parallel = self.config.parallel,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Mask pass complete"
        );

        Ok(stats)
    }

    fn paint(
        &self,
        field: &ScalarField,
        view: &ViewProjection,
        scale: &ColorScale,
        width: usize,
        height: usize,
        pixels: &mut [u8],
    ) -> (usize, usize) {
        let geometry = field.geometry();

        // Grid index per sampled column and per sampled row; None is off-grid.
        let cols: Vec<Option<f64>> = (0..width)
            .step_by(SAMPLE_STRIDE)
            .map(|x| geometry.axis_index_lng(view.unproject_lng(x as f64)).ok())
            .collect();
        let rows: Vec<Option<f64>> = (0..height)
            .step_by(SAMPLE_STRIDE)
            .map(|y| geometry.axis_index_lat(view.unproject_lat(y as f64)).ok())
            .collect();

        let row_bytes = width * 4;
        let band_bytes = row_bytes * SAMPLE_STRIDE;

        let paint_band = |(band, chunk): (usize, &mut [u8])| -> (usize, usize) {
            let row = rows[band];
            let band_rows = chunk.len() / row_bytes;
            let mut nodata = 0;

            for (j, col) in cols.iter().enumerate() {
                let value = match (*col, row) {
                    (Some(c), Some(r)) => field.sample_at(c, r).ok().flatten(),
                    _ => None,
                };
                if value.is_none() {
                    nodata += 1;
                }

                let color = scale.evaluate(value);
                if color == Rgba::TRANSPARENT {
                    continue;
                }

                let px = color.to_array();
                let x0 = j * SAMPLE_STRIDE;
                let x1 = (x0 + SAMPLE_STRIDE).min(width);
                for dy in 0..band_rows {
                    let line = &mut chunk[dy * row_bytes..(dy + 1) * row_bytes];
                    for x in x0..x1 {
                        line[x * 4..x * 4 + 4].copy_from_slice(&px);
                    }
                }
            }

            (cols.len(), nodata)
        };

        if self.config.parallel {
            pixels
                .par_chunks_mut(band_bytes)
                .enumerate()
                .map(paint_band)
                .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
        } else {
            pixels
                .chunks_mut(band_bytes)
                .enumerate()
                .map(paint_band)
                .fold((0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field::GridGeometry;

    fn view() -> ViewProjection {
        ViewProjection::centered(0.0, 0.0, 3.0, 16, 16, 1.0).unwrap()
    }

    #[test]
    fn test_buffer_size_checked() {
        let rasterizer = MaskRasterizer::default();
        let mut pixels = vec![0u8; 10];
        let err = rasterizer
            .rasterize_into(None, &view(), None, 4, 4, &mut pixels)
            .unwrap_err();
        assert!(matches!(err, RenderError::BufferSize { expected: 64, actual: 10, .. }));
    }

    #[test]
    fn test_missing_field_is_transparent() {
        let rasterizer = MaskRasterizer::default();
        let mut pixels = vec![7u8; 16 * 16 * 4];
        let stats = rasterizer
            .rasterize_with_stats(None, &view(), None, 16, 16, &mut pixels)
            .unwrap();
        assert!(stats.skipped);
        assert!(pixels.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_odd_dimensions_are_covered() {
        let geometry = GridGeometry::new(80.0, -170.0, 1.0, 1.0, 341, 161).unwrap();
        let field = ScalarField::new(geometry, vec![290.0; 341 * 161]).unwrap();
        let scale = ColorScale::for_kind(&atmo_common::VariableKind::Temperature, 180).unwrap();
        let view = ViewProjection::centered(0.0, 0.0, 3.0, 15, 9, 1.0).unwrap();

        let rasterizer = MaskRasterizer::default();
        let pixels = rasterizer
            .rasterize(Some(&field), &view, Some(&scale), 15, 9)
            .unwrap();
        assert_eq!(pixels.len(), 15 * 9 * 4);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 180));
    }
}
