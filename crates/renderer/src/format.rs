//! Human-readable value strings for point readouts.

use atmo_common::VariableKind;

/// Shown in place of a value when the sample is NoData.
pub const NO_DATA: &str = "-";

/// Shown when the wind is calm and has no direction.
pub const CALM_WIND: &str = "-° 0.0m/s";

const KELVIN_OFFSET: f64 = 273.15;

/// Convert U and V wind components (m/s) to speed (m/s) and direction
/// (degrees FROM which the wind blows, 0 = North, 90 = East).
///
/// Returns `None` for a calm wind, whose direction is undefined.
pub fn uv_to_speed_direction(u: f32, v: f32) -> Option<(f64, f64)> {
    let u = u as f64;
    let v = v as f64;
    let speed = (u * u + v * v).sqrt();
    if speed <= 0.0 || !speed.is_finite() {
        return None;
    }

    // Rounding can push |v / speed| a hair past 1.
    let ratio = (v / speed).clamp(-1.0, 1.0);
    let mut angle = ratio.acos().to_degrees() + 180.0;
    if u < 0.0 {
        angle = 360.0 - angle;
    }

    Some((speed, angle.rem_euclid(360.0)))
}

/// Format a wind sample as `"{direction}° {speed}m/s"`.
pub fn format_wind(uv: Option<(f32, f32)>) -> String {
    let Some((u, v)) = uv else {
        return NO_DATA.to_string();
    };

    match uv_to_speed_direction(u, v) {
        Some((speed, direction)) => {
            let degrees = direction.round() as i64 % 360;
            format!("{}° {:.1}m/s", degrees, round1(speed))
        }
        None => CALM_WIND.to_string(),
    }
}

/// Format a scalar sample in the display unit of `kind`.
pub fn format_value(value: Option<f32>, kind: &VariableKind) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return NO_DATA.to_string();
    };
    let v = v as f64;

    match kind {
        VariableKind::Temperature => format!("{:.1}℃", round1(v - KELVIN_OFFSET)),
        VariableKind::CloudCover => format!("{:.0}%", v.round() + 0.0),
        VariableKind::Precipitation => format!("{:.1}mm/h", round1(v)),
        VariableKind::Pressure => format!("{}hPa", (v / 100.0).round() as i64),
        VariableKind::Wind | VariableKind::Other(_) => format!("{:.1}", round1(v)),
    }
}

/// Round half away from zero to one decimal place.
fn round1(v: f64) -> f64 {
    // Adding 0.0 turns -0.0 into 0.0 so it never prints as "-0.0".
    (v * 10.0).round() / 10.0 + 0.0
}
