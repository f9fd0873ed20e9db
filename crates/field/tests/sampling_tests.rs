//! Sampling tests against the shared grid fixtures.

use field::{Axis, FieldError, GridGeometry, InterpolationMethod, ScalarField, VectorField};
use test_utils::fixtures::grid::{GridFixture, GLOBAL_1P0, JAPAN_0P5, SIMPLE_4X4};
use test_utils::{
    create_constant_grid, create_pressure_grid, create_test_grid, create_u_wind_grid,
    create_v_wind_grid, punch_nodata,
};

fn geometry(f: GridFixture) -> GridGeometry {
    GridGeometry::new(f.lat0, f.lng0, f.d_lat, f.d_lng, f.nx, f.ny).unwrap()
}

// ============================================================================
// Coverage
// ============================================================================

#[test]
fn test_outside_coverage_is_nodata() {
    let f = JAPAN_0P5;
    let field = ScalarField::new(geometry(f), create_pressure_grid(f.nx, f.ny)).unwrap();

    let (lat, lng) = f.center();
    assert!(field.sample_geo(lat, lng).is_some());
    assert_eq!(field.sample_geo(51.0, 135.0), None);
    assert_eq!(field.sample_geo(35.0, 100.0), None);
    assert_eq!(field.sample_geo(f64::NAN, 135.0), None);
}

#[test]
fn test_grid_corners_are_exact() {
    let f = SIMPLE_4X4;
    let field = ScalarField::new(geometry(f), create_test_grid(f.nx, f.ny)).unwrap();
    let (south, west, north, east) = f.bounds();

    assert_eq!(field.sample_geo(north, west), Some(0.0));
    assert_eq!(field.sample_geo(north, east), Some(3000.0));
    assert_eq!(field.sample_geo(south, west), Some(3.0));
    assert_eq!(field.sample_geo(south, east), Some(3003.0));
}

#[test]
fn test_index_errors_name_the_axis() {
    let f = SIMPLE_4X4;
    let field = ScalarField::new(geometry(f), create_test_grid(f.nx, f.ny)).unwrap();

    match field.sample_at(4.5, 0.0) {
        Err(FieldError::OutOfBounds { axis, .. }) => assert_eq!(axis, Axis::Column),
        other => panic!("expected column error, got {:?}", other),
    }
    match field.sample_at(0.0, -0.1) {
        Err(FieldError::OutOfBounds { axis, .. }) => assert_eq!(axis, Axis::Row),
        other => panic!("expected row error, got {:?}", other),
    }
}

// ============================================================================
// NoData
// ============================================================================

#[test]
fn test_nodata_propagates_from_any_contributing_cell() {
    let f = SIMPLE_4X4;
    for (col, row) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        let mut values = create_test_grid(f.nx, f.ny);
        punch_nodata(&mut values, f.nx, col..col + 1, row..row + 1);
        let field = ScalarField::new(geometry(f), values).unwrap();

        assert_eq!(field.sample_at(1.5, 1.5).unwrap(), None, "hole at ({}, {})", col, row);
        // A cell not touching the hole still interpolates.
        assert!(field.sample_at(2.5, 0.0).unwrap().is_some());
    }
}

#[test]
fn test_nearest_ignores_distant_nodata() {
    let f = SIMPLE_4X4;
    let mut values = create_test_grid(f.nx, f.ny);
    punch_nodata(&mut values, f.nx, 2..3, 2..3);
    let field = ScalarField::new(geometry(f), values).unwrap();

    assert_eq!(field.sample_with(InterpolationMethod::Nearest, 1.2, 1.2).unwrap(), Some(1001.0));
    assert_eq!(field.sample_with(InterpolationMethod::Bilinear, 1.2, 1.2).unwrap(), None);
}

// ============================================================================
// Global grids
// ============================================================================

#[test]
fn test_global_grid_accepts_negative_longitudes() {
    let f = GLOBAL_1P0;
    let field = ScalarField::new(geometry(f), create_constant_grid(f.nx, f.ny, 5.0)).unwrap();

    assert_eq!(field.sample_geo(0.0, -90.0), Some(5.0));
    assert_eq!(field.sample_geo(0.0, -0.5), Some(5.0));
    assert_eq!(field.sample_geo(0.0, 359.5), Some(5.0));
    assert_eq!(field.sample_geo(-90.0, 180.0), Some(5.0));
}

#[test]
fn test_global_wind_wraps_between_last_and_first_column() {
    let f = GLOBAL_1P0;
    let u = create_u_wind_grid(f.nx, f.ny);
    let v = create_v_wind_grid(f.nx, f.ny);
    let field = VectorField::new(geometry(f), u.clone(), v.clone()).unwrap();

    // Half a degree west of the prime meridian: halfway between columns 359 and 0.
    let row = 10;
    let (su, sv) = field.sample_geo(f.lat0 - row as f64, -0.5).unwrap();
    let expected_u = (u[row * f.nx + 359] + u[row * f.nx]) / 2.0;
    let expected_v = (v[row * f.nx + 359] + v[row * f.nx]) / 2.0;
    assert!((su - expected_u).abs() < 1e-4);
    assert!((sv - expected_v).abs() < 1e-4);
}
