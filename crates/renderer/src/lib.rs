//! Color-mapped rasterization of weather fields.
//!
//! - [`scale`]: value to RGBA color scales per variable
//! - [`ramp`]: continuous RGB and LCh color ramps
//! - [`mask`]: parallel 2x2-block rasterizer
//! - [`format`]: readout strings for point values
//! - [`layer`] / [`overlay`]: the layers composing a weather overlay

pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod layer;
pub mod mask;
pub mod overlay;
pub mod ramp;
pub mod scale;

pub use color::Rgba;
pub use config::{RenderConfig, SAMPLE_STRIDE};
pub use error::{RenderError, Result};
pub use format::{format_value, format_wind};
pub use layer::{
    ContourExtractor, ContourSource, GeoContour, GridContour, MaskLayer, PointSampleable,
    Rasterizable, StreamlineSource,
};
pub use mask::{buffer_len, MaskRasterizer, RasterStats};
pub use overlay::{Overlay, PassOutcome, PointReadout};
pub use ramp::{ColorRamp, LchRamp, RgbRamp};
pub use scale::{ColorScale, ColorStop, ScaleError, StopTable, DEFAULT_MASK_ALPHA};
