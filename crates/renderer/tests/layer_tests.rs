//! Tests for overlay layers and the composed overlay.

use std::sync::Arc;

use atmo_common::VariableKind;
use field::{GridGeometry, ScalarField, VectorField};
use projection::ViewProjection;
use renderer::{
    ContourExtractor, ContourSource, GridContour, MaskLayer, Overlay, PointSampleable,
    Rasterizable, RenderConfig, RenderError, StreamlineSource,
};
use test_utils::fixtures::grid::{GridFixture, JAPAN_0P5};
use test_utils::fixtures::views::TOKYO;
use test_utils::{create_constant_grid, create_precipitation_grid, create_pressure_grid};

fn geometry(fixture: GridFixture) -> GridGeometry {
    GridGeometry::new(
        fixture.lat0,
        fixture.lng0,
        fixture.d_lat,
        fixture.d_lng,
        fixture.nx,
        fixture.ny,
    )
    .unwrap()
}

fn constant_scalar(value: f32) -> Arc<ScalarField> {
    let f = JAPAN_0P5;
    Arc::new(ScalarField::new(geometry(f), create_constant_grid(f.nx, f.ny, value)).unwrap())
}

fn constant_wind(u: f32, v: f32) -> Arc<VectorField> {
    let f = JAPAN_0P5;
    Arc::new(
        VectorField::new(
            geometry(f),
            create_constant_grid(f.nx, f.ny, u),
            create_constant_grid(f.nx, f.ny, v),
        )
        .unwrap(),
    )
}

/// Returns one fixed square ring in grid coordinates.
struct SquareExtractor;

impl ContourExtractor for SquareExtractor {
    fn extract(&self, values: &[f32], nx: usize, ny: usize) -> Vec<GridContour> {
        assert_eq!(values.len(), nx * ny);
        vec![GridContour {
            level: 1000.0,
            rings: vec![vec![(0.0, 0.0), (2.0, 0.0), (2.0, 4.0), (0.0, 0.0)]],
        }]
    }
}

// ============================================================================
// MaskLayer
// ============================================================================

#[test]
fn test_mask_layer_without_field_is_transparent() {
    let layer = MaskLayer::new(VariableKind::Precipitation, RenderConfig::default()).unwrap();
    let view = ViewProjection::centered(TOKYO.0, TOKYO.1, TOKYO.2, 32, 32, 1.0).unwrap();
    let mut buf = vec![1u8; 32 * 32 * 4];

    let stats = layer.rasterize_into(&view, &mut buf, 32, 32).unwrap();
    assert!(stats.skipped);
    assert!(buf.iter().all(|b| *b == 0));
    assert_eq!(layer.probe(TOKYO.0, TOKYO.1), "-");
}

#[test]
fn test_mask_layer_set_field_supersedes() {
    let mut layer = MaskLayer::new(VariableKind::Temperature, RenderConfig::default()).unwrap();
    let old = constant_scalar(280.0);
    assert!(layer.set_field(Some(old.clone())).is_none());

    let previous = layer.set_field(Some(constant_scalar(300.0))).unwrap();
    assert!(Arc::ptr_eq(&previous, &old));
    // The superseded slice is untouched.
    assert_eq!(old.sample_geo(TOKYO.0, TOKYO.1), Some(280.0));
    assert_eq!(layer.probe(TOKYO.0, TOKYO.1), "26.9℃");
}

#[test]
fn test_wind_mask_has_no_scale() {
    let layer = MaskLayer::new(VariableKind::Wind, RenderConfig::default()).unwrap();
    assert!(layer.scale().is_none());
}

// ============================================================================
// StreamlineSource / ContourSource
// ============================================================================

#[test]
fn test_streamline_probe() {
    let mut wind = StreamlineSource::new();
    assert_eq!(wind.probe(TOKYO.0, TOKYO.1), "-");
    wind.set_field(Some(constant_wind(0.0, -5.0)));
    assert_eq!(wind.vector_at(TOKYO.0, TOKYO.1), Some((0.0, -5.0)));
    assert_eq!(wind.probe(TOKYO.0, TOKYO.1), "0° 5.0m/s");
    // Outside the grid.
    assert_eq!(wind.vector_at(0.0, 0.0), None);
}

#[test]
fn test_contours_are_placed_geographically() {
    let mut contour = ContourSource::new(VariableKind::Pressure);
    assert!(contour.contours(&SquareExtractor).is_empty());

    let f = JAPAN_0P5;
    let pressure = ScalarField::new(geometry(f), create_pressure_grid(f.nx, f.ny)).unwrap();
    contour.set_field(Some(Arc::new(pressure)));

    let contours = contour.contours(&SquareExtractor);
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].level, 1000.0);
    assert_eq!(
        contours[0].rings[0],
        vec![(50.0, 120.0), (50.0, 121.0), (48.0, 121.0), (50.0, 120.0)]
    );
}

// ============================================================================
// Overlay
// ============================================================================

#[test]
fn test_probe_requires_wind() {
    let mut overlay = Overlay::standard(RenderConfig::default()).unwrap();
    overlay.mask.set_field(Some(constant_scalar(2.0)));
    assert!(overlay.probe(TOKYO.0, TOKYO.1).is_none());
    assert!(overlay.probe_location().is_none());

    overlay.wind.set_field(Some(constant_wind(0.0, -5.0)));
    overlay.contour.set_field(Some(constant_scalar(101300.0)));
    let readout = overlay.probe(TOKYO.0, TOKYO.1).unwrap();
    assert_eq!(readout.lines(), ["0° 5.0m/s", "2.0mm/h", "1013hPa"]);
    assert_eq!(overlay.probe_location(), Some((TOKYO.0, TOKYO.1)));
}

#[test]
fn test_render_refreshes_readout() {
    let mut overlay = Overlay::standard(RenderConfig::default()).unwrap();
    overlay.wind.set_field(Some(constant_wind(0.0, -5.0)));
    overlay.probe(TOKYO.0, TOKYO.1).unwrap();

    // New time slice.
    overlay.wind.set_field(Some(constant_wind(5.0, 0.0)));
    let view = ViewProjection::centered(TOKYO.0, TOKYO.1, TOKYO.2, 64, 48, 1.0).unwrap();
    let outcome = overlay.render(&view, 64, 48).unwrap();

    let readout = outcome.readout.unwrap();
    assert_eq!(readout.wind, "270° 5.0m/s");
    assert_eq!(readout.mask, "-");
    assert_eq!(outcome.pixels.len(), 64 * 48 * 4);
    assert!(outcome.stats.skipped);
}

#[test]
fn test_render_paints_precipitation() {
    let f = JAPAN_0P5;
    let mut overlay = Overlay::standard(RenderConfig::default()).unwrap();
    let rain = ScalarField::new(geometry(f), create_precipitation_grid(f.nx, f.ny, 42)).unwrap();
    overlay.mask.set_field(Some(Arc::new(rain)));

    let view = ViewProjection::centered(TOKYO.0, TOKYO.1, TOKYO.2, 64, 48, 1.0).unwrap();
    let outcome = overlay.render(&view, 64, 48).unwrap();

    assert!(!outcome.stats.skipped);
    assert_eq!(outcome.stats.nodata, 0);
    assert!(outcome.pixels.chunks_exact(4).any(|px| px[3] > 0));
    assert!(outcome.readout.is_none());
}

#[test]
fn test_render_rejects_unallocatable_viewport() {
    let overlay = Overlay::standard(RenderConfig::default()).unwrap();
    let view = ViewProjection::centered(TOKYO.0, TOKYO.1, TOKYO.2, 64, 48, 1.0).unwrap();

    let err = overlay.render(&view, usize::MAX, usize::MAX).unwrap_err();
    assert!(matches!(err, RenderError::Dimensions { .. }));
}
