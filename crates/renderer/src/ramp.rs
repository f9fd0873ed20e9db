//! Continuous color ramps over a normalized `[0, 1]` domain.
//!
//! Two interpolation spaces are supported:
//! - [`RgbRamp`]: per-channel linear blend in sRGB
//! - [`LchRamp`]: blend in CIE LCh, hue taking the shorter arc
//!
//! Inputs outside `[0, 1]` clamp to the end colors. Ramps are opaque; alpha
//! belongs to the [`crate::scale::ColorScale`] using them.

use palette::{FromColor, Lch, Mix, Srgb};

use crate::color::Rgba;

/// ColorBrewer RdYlBu, 11 classes, red end first.
pub const RDYLBU: [Rgba; 11] = [
    Rgba::opaque(0xa5, 0x00, 0x26),
    Rgba::opaque(0xd7, 0x30, 0x27),
    Rgba::opaque(0xf4, 0x6d, 0x43),
    Rgba::opaque(0xfd, 0xae, 0x61),
    Rgba::opaque(0xfe, 0xe0, 0x90),
    Rgba::opaque(0xff, 0xff, 0xbf),
    Rgba::opaque(0xe0, 0xf3, 0xf8),
    Rgba::opaque(0xab, 0xd9, 0xe9),
    Rgba::opaque(0x74, 0xad, 0xd1),
    Rgba::opaque(0x45, 0x75, 0xb4),
    Rgba::opaque(0x31, 0x36, 0x95),
];

/// Black to white.
pub const GRAYSCALE: [Rgba; 2] = [Rgba::opaque(0, 0, 0), Rgba::opaque(255, 255, 255)];

/// Blue through yellow to magenta, with yellow placed at 0.3.
pub const PRECIPITATION: [(f64, Rgba); 3] = [
    (0.0, Rgba::opaque(0x00, 0x8a, 0xe5)),
    (0.3, Rgba::opaque(0xff, 0xff, 0x00)),
    (1.0, Rgba::opaque(0xfa, 0x00, 0x80)),
];

/// A color ramp sampled by a normalized position.
pub trait ColorRamp: Send + Sync {
    /// Color at `t`; `t` is clamped into `[0, 1]`.
    fn sample(&self, t: f64) -> Rgba;
}

/// Locate `t` among ascending stops.
///
/// Returns the index of the lower stop and the local blend factor. The
/// caller guarantees at least two stops.
fn segment<T>(stops: &[(f64, T)], t: f64) -> (usize, f64) {
    let last = stops.len() - 1;
    let t = if t.is_nan() { 0.0 } else { t };

    if t <= stops[0].0 {
        return (0, 0.0);
    }
    if t >= stops[last].0 {
        return (last - 1, 1.0);
    }

    let upper = stops.partition_point(|s| s.0 <= t).clamp(1, last);
    let lower = upper - 1;
    let span = stops[upper].0 - stops[lower].0;
    let f = if span > 0.0 { (t - stops[lower].0) / span } else { 0.0 };
    (lower, f)
}

fn evenly_spaced(count: usize) -> impl Iterator<Item = f64> {
    let denom = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| i as f64 / denom)
}

/// Linear sRGB ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbRamp {
    stops: Vec<(f64, Rgba)>,
}

impl RgbRamp {
    /// Colors placed at equal intervals over `[0, 1]`.
    pub fn evenly(colors: &[Rgba]) -> Self {
        let stops = evenly_spaced(colors.len()).zip(colors.iter().copied()).collect();
        Self::from_stops(stops)
    }

    /// Explicit positions; a single color is widened into a flat ramp.
    pub fn from_stops(mut stops: Vec<(f64, Rgba)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        if stops.len() == 1 {
            let only = stops[0].1;
            stops = vec![(0.0, only), (1.0, only)];
        }
        Self { stops }
    }

    pub fn grayscale() -> Self {
        Self::evenly(&GRAYSCALE)
    }

    pub fn rdylbu() -> Self {
        Self::evenly(&RDYLBU)
    }
}

impl ColorRamp for RgbRamp {
    fn sample(&self, t: f64) -> Rgba {
        if self.stops.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let (i, f) = segment(&self.stops, t);
        self.stops[i].1.lerp(self.stops[i + 1].1, f)
    }
}

/// Perceptual ramp interpolated in CIE LCh (D65).
#[derive(Debug, Clone)]
pub struct LchRamp {
    stops: Vec<(f64, Lch)>,
}

impl LchRamp {
    pub fn from_stops(stops: &[(f64, Rgba)]) -> Self {
        let mut stops: Vec<(f64, Lch)> = stops
            .iter()
            .map(|(pos, c)| (*pos, to_lch(*c)))
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        if stops.len() == 1 {
            let only = stops[0].1;
            stops = vec![(0.0, only), (1.0, only)];
        }
        Self { stops }
    }

    pub fn precipitation() -> Self {
        Self::from_stops(&PRECIPITATION)
    }
}

impl ColorRamp for LchRamp {
    fn sample(&self, t: f64) -> Rgba {
        if self.stops.is_empty() {
            return Rgba::TRANSPARENT;
        }
        let (i, f) = segment(&self.stops, t);
        let mixed = self.stops[i].1.mix(self.stops[i + 1].1, f as f32);
        from_lch(mixed)
    }
}

fn to_lch(c: Rgba) -> Lch {
    let srgb = Srgb::new(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
    );
    Lch::from_color(srgb)
}

fn from_lch(lch: Lch) -> Rgba {
    let srgb: Srgb = Srgb::from_color(lch);
    let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::opaque(channel(srgb.red), channel(srgb.green), channel(srgb.blue))
}
