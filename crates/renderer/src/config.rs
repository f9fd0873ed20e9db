//! Configuration for overlay rendering.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::scale::DEFAULT_MASK_ALPHA;

/// Physical pixels per sample along each axis.
pub const SAMPLE_STRIDE: usize = 2;

/// Configuration for mask rasterization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Maximum opacity of mask pixels (0-255).
    pub max_alpha: u8,

    /// Sampling stride in physical pixels. Only 2 is supported.
    pub stride: usize,

    /// Split rows across the rayon pool.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_alpha: DEFAULT_MASK_ALPHA,
            stride: SAMPLE_STRIDE,
            parallel: true,
        }
    }
}

impl RenderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MASK_ALPHA") {
            if let Ok(alpha) = val.trim().parse() {
                config.max_alpha = alpha;
            }
        }

        if let Ok(val) = std::env::var("RENDER_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.stride != SAMPLE_STRIDE {
            return Err(RenderError::InvalidConfig(format!(
                "stride must be {}, got {}",
                SAMPLE_STRIDE, self.stride
            )));
        }

        Ok(())
    }
}
