//! Value-to-color scales for the mask layer.
//!
//! Each supported variable maps to one [`ColorScale`] built from static
//! tables. Two families exist:
//!
//! - stop tables: ascending `(value, color)` pairs blended linearly in sRGB
//!   (temperature, keyed in Kelvin)
//! - ramps: the value is normalized into `[0, 1]` and looked up in a
//!   [`ColorRamp`](crate::ramp::ColorRamp), with a per-variable alpha policy
//!
//! NoData and non-finite values always evaluate to [`Rgba::TRANSPARENT`].

use atmo_common::VariableKind;
use thiserror::Error;

use crate::color::{scaled_alpha, Rgba};
use crate::ramp::{ColorRamp, LchRamp, RgbRamp};

/// Default maximum mask opacity.
pub const DEFAULT_MASK_ALPHA: u8 = 180;

/// Temperature stops in Kelvin.
pub const TEMPERATURE_STOPS: [(f64, [u8; 3]); 11] = [
    (193.0, [37, 4, 42]),
    (206.0, [41, 10, 130]),
    (219.0, [81, 40, 40]),
    (233.15, [192, 37, 149]),
    (255.372, [70, 215, 215]),
    (273.15, [21, 84, 187]),
    (275.15, [24, 132, 14]),
    (291.0, [247, 251, 59]),
    (298.0, [235, 167, 21]),
    (311.0, [230, 71, 39]),
    (328.0, [88, 27, 67]),
];

/// Precipitation below this rate (mm/h) is not drawn.
pub const PRECIPITATION_FLOOR: f64 = 0.1;

/// Precipitation rate (mm/h) at the top of the ramp.
pub const PRECIPITATION_CEILING: f64 = 100.0;

/// Pressure window in hPa mapped onto the ramp.
pub const PRESSURE_LOW_HPA: f64 = 993.0;
pub const PRESSURE_SPAN_HPA: f64 = 40.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaleError {
    #[error("stop table is empty")]
    Empty,

    #[error("stop values must be strictly increasing (stop {index}: {value})")]
    UnorderedStops { index: usize, value: f64 },
}

/// One breakpoint of a [`StopTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgba,
}

/// Piecewise-linear color table over strictly increasing values.
///
/// Values below the first stop take the first color, values above the last
/// stop take the last color.
#[derive(Debug, Clone, PartialEq)]
pub struct StopTable {
    stops: Vec<ColorStop>,
}

impl StopTable {
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ScaleError> {
        if stops.is_empty() {
            return Err(ScaleError::Empty);
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].value.is_nan() || pair[1].value <= pair[0].value {
                return Err(ScaleError::UnorderedStops {
                    index: index + 1,
                    value: pair[1].value,
                });
            }
        }
        Ok(Self { stops })
    }

    pub fn from_rgb(stops: &[(f64, [u8; 3])]) -> Result<Self, ScaleError> {
        Self::new(
            stops
                .iter()
                .map(|(value, rgb)| ColorStop { value: *value, color: Rgba::from(*rgb) })
                .collect(),
        )
    }

    pub fn temperature() -> Result<Self, ScaleError> {
        Self::from_rgb(&TEMPERATURE_STOPS)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn min_value(&self) -> f64 {
        self.stops[0].value
    }

    pub fn max_value(&self) -> f64 {
        self.stops[self.stops.len() - 1].value
    }

    /// Color at `value`, opaque.
    ///
    /// A value equal to a stop takes that stop's color exactly.
    pub fn color_at(&self, value: f64) -> Rgba {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }

        // First stop strictly above `value`; never 0 or len here.
        let upper = self.stops.partition_point(|s| s.value <= value);
        let lo = self.stops[upper - 1];
        let hi = self.stops[upper];
        let t = (value - lo.value) / (hi.value - lo.value);
        lo.color.lerp(hi.color, t)
    }
}

/// Color scale for one variable.
#[derive(Debug, Clone)]
pub enum ColorScale {
    /// Kelvin stop table at constant alpha.
    Temperature { table: StopTable, max_alpha: u8 },
    /// Black to white; alpha grows with cover.
    CloudCover { ramp: RgbRamp, max_alpha: u8 },
    /// LCh ramp; light rain fades in, drizzle below the floor is hidden.
    Precipitation { ramp: LchRamp, max_alpha: u8 },
    /// Reversed RdYlBu over a 40 hPa window: highs red, lows blue.
    Pressure { ramp: RgbRamp, max_alpha: u8 },
}

impl ColorScale {
    /// The scale drawn for `kind`, or `None` when the variable has no mask
    /// coloring.
    pub fn for_kind(kind: &VariableKind, max_alpha: u8) -> Option<Self> {
        match kind {
            VariableKind::Temperature => StopTable::temperature()
                .ok()
                .map(|table| ColorScale::Temperature { table, max_alpha }),
            VariableKind::CloudCover => Some(ColorScale::CloudCover {
                ramp: RgbRamp::grayscale(),
                max_alpha,
            }),
            VariableKind::Precipitation => Some(ColorScale::Precipitation {
                ramp: LchRamp::precipitation(),
                max_alpha,
            }),
            VariableKind::Pressure => Some(ColorScale::Pressure {
                ramp: RgbRamp::rdylbu(),
                max_alpha,
            }),
            VariableKind::Wind | VariableKind::Other(_) => None,
        }
    }

    pub fn max_alpha(&self) -> u8 {
        match self {
            ColorScale::Temperature { max_alpha, .. }
            | ColorScale::CloudCover { max_alpha, .. }
            | ColorScale::Precipitation { max_alpha, .. }
            | ColorScale::Pressure { max_alpha, .. } => *max_alpha,
        }
    }

    /// Position of `value` along the scale, clamped into `[0, 1]`.
    pub fn normalized(&self, value: f64) -> f64 {
        let t = match self {
            ColorScale::Temperature { table, .. } => {
                (value - table.min_value()) / (table.max_value() - table.min_value())
            }
            ColorScale::CloudCover { .. } => value / 100.0,
            ColorScale::Precipitation { .. } => value / PRECIPITATION_CEILING,
            ColorScale::Pressure { .. } => {
                let hpa = (value / 100.0).round();
                (hpa - PRESSURE_LOW_HPA) / PRESSURE_SPAN_HPA
            }
        };
        if t.is_nan() {
            0.0
        } else {
            t.clamp(0.0, 1.0)
        }
    }

    /// Color for a sample; `None` (NoData) is transparent.
    pub fn evaluate(&self, value: Option<f32>) -> Rgba {
        match value {
            Some(v) if v.is_finite() => self.color(v as f64),
            _ => Rgba::TRANSPARENT,
        }
    }

    fn color(&self, value: f64) -> Rgba {
        match self {
            ColorScale::Temperature { table, max_alpha } => {
                table.color_at(value).with_alpha(*max_alpha)
            }
            ColorScale::CloudCover { ramp, max_alpha } => {
                let t = self.normalized(value);
                ramp.sample(t).with_alpha(scaled_alpha(*max_alpha, t))
            }
            ColorScale::Precipitation { ramp, max_alpha } => {
                if value < PRECIPITATION_FLOOR {
                    return Rgba::TRANSPARENT;
                }
                let alpha = if value < 1.0 {
                    scaled_alpha(*max_alpha, value)
                } else {
                    *max_alpha
                };
                ramp.sample(self.normalized(value)).with_alpha(alpha)
            }
            ColorScale::Pressure { ramp, max_alpha } => {
                // Red end of the ramp is the top of the window.
                ramp.sample(1.0 - self.normalized(value)).with_alpha(*max_alpha)
            }
        }
    }
}
