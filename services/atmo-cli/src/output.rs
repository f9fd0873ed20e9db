//! Writing rendered buffers to disk.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, RgbaImage};

/// Write a straight-alpha RGBA8 buffer as a PNG.
pub fn write_png(path: &Path, width: usize, height: usize, pixels: Vec<u8>) -> Result<()> {
    let image = RgbaImage::from_raw(width as u32, height as u32, pixels)
        .ok_or_else(|| anyhow!("pixel buffer does not match {}x{} RGBA", width, height))?;

    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write PNG to {}", path.display()))?;

    tracing::debug!(path = %path.display(), width, height, "Wrote PNG");
    Ok(())
}
