//! Tests for time-slice resolution and tile addressing.

use atmo_common::{AtmoError, Coverage, Level, TileMetadata, ValidTime, VariableKind};
use chrono::{TimeZone, Utc};

fn vt(s: &str) -> ValidTime {
    ValidTime::parse_compact(s).unwrap()
}

fn coverage() -> Coverage {
    Coverage::new(vt("202401010000"), vt("202401020000")).unwrap()
}

// ============================================================================
// Coverage clamp tests
// ============================================================================

#[test]
fn test_resolve_after_end_clamps_to_end() {
    assert_eq!(coverage().resolve(vt("202401030000")), vt("202401020000"));
}

#[test]
fn test_resolve_before_start_clamps_to_start() {
    assert_eq!(coverage().resolve(vt("202312310000")), vt("202401010000"));
}

#[test]
fn test_resolve_inside_is_identity() {
    assert_eq!(coverage().resolve(vt("202401011300")), vt("202401011300"));
}

#[test]
fn test_resolve_inside_truncates_minutes() {
    assert_eq!(coverage().resolve(vt("202401011230")), vt("202401011200"));
    assert_eq!(coverage().resolve(vt("202401020059")), vt("202401020000"));
}

#[test]
fn test_bounds_are_inclusive() {
    let c = coverage();
    assert!(c.contains(vt("202401010000")));
    assert!(c.contains(vt("202401020000")));
    assert!(!c.contains(vt("202401020100")));
}

#[test]
fn test_coverage_bounds_truncated_to_hour() {
    let c = Coverage::new(vt("202401010045"), vt("202401020059")).unwrap();
    assert_eq!(c.start.compact(), "202401010000");
    assert_eq!(c.end.compact(), "202401020000");
}

#[test]
fn test_inverted_coverage_rejected() {
    let err = Coverage::new(vt("202401020000"), vt("202401010000")).unwrap_err();
    assert!(matches!(err, AtmoError::InvalidTime(_)));
}

// ============================================================================
// Default instant tests
// ============================================================================

#[test]
fn test_default_instant_is_last_whole_hour() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 13, 47, 12).unwrap();
    assert_eq!(coverage().default_instant(now).compact(), "202401011300");
}

#[test]
fn test_default_instant_clamped_to_coverage() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(coverage().default_instant(now).compact(), "202401020000");
}

// ============================================================================
// Serialization tests
// ============================================================================

#[test]
fn test_compact_format_is_zero_padded() {
    let t = ValidTime::new(Utc.with_ymd_and_hms(2024, 3, 5, 7, 9, 0).unwrap());
    assert_eq!(t.compact(), "202403050709");
    assert_eq!(t.to_string(), "202403050709");
}

#[test]
fn test_valid_time_serde_roundtrip_string() {
    let json = serde_json::to_string(&vt("202401010600")).unwrap();
    assert_eq!(json, "\"202401010600\"");
    let back: ValidTime = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vt("202401010600"));
}

// ============================================================================
// Tile request tests
// ============================================================================

#[test]
fn test_request_clamps_and_formats_url() {
    let meta = TileMetadata::from_json(
        r#"{
            "url": "https://tiles.example.com/{level}/{valid_time}/{e}.bin",
            "surface": { "valid_time": ["202401010000", "202401020000"] }
        }"#,
    )
    .unwrap();

    let req = meta
        .request(VariableKind::Pressure, Level::surface(), vt("202401030000"))
        .unwrap();

    assert_eq!(req.instant, vt("202401020000"));
    assert_eq!(
        req.url(&meta.url),
        "https://tiles.example.com/surface/202401020000/PRMSL.bin"
    );
    assert_eq!(req.tile_zooms(), &[0, 1]);
}

#[test]
fn test_empty_valid_time_rejected() {
    let result = TileMetadata::from_json(
        r#"{ "url": "//x/{valid_time}", "surface": { "valid_time": [] } }"#,
    );
    assert!(matches!(result, Err(AtmoError::InvalidConfig { .. })));
}

#[test]
fn test_malformed_valid_time_rejected() {
    let result = TileMetadata::from_json(
        r#"{ "url": "//x/{valid_time}", "surface": { "valid_time": ["2024-01-01"] } }"#,
    );
    assert!(result.is_err());
}
