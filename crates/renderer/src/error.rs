//! Error types for rendering.

use thiserror::Error;

use crate::scale::ScaleError;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} ({width}x{height} RGBA)")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{width}x{height} RGBA buffer exceeds addressable memory")]
    Dimensions { width: usize, height: usize },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
