//! Subcommand implementations. Each returns the text printed on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use atmo_common::{Level, TileMetadata, ValidTime, VariableKind};
use field::{FieldDocument, ScalarField, VectorField};
use projection::ViewProjection;
use renderer::{buffer_len, MaskLayer, Overlay, Rasterizable, RenderConfig};

use crate::output;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Scalar field document (JSON)
    #[arg(long)]
    pub field: PathBuf,

    /// Element code of the field (TMP, TCDC, APCP, PRMSL)
    #[arg(long, default_value = "APCP")]
    pub element: String,

    /// View center latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// View center longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Zoom level
    #[arg(long, default_value_t = 5.0)]
    pub zoom: f64,

    /// Output width in physical pixels
    #[arg(long, default_value_t = 512)]
    pub width: usize,

    /// Output height in physical pixels
    #[arg(long, default_value_t = 512)]
    pub height: usize,

    /// Device pixel ratio (1 or 2)
    #[arg(long, default_value_t = 1.0)]
    pub pixel_ratio: f64,

    /// Maximum mask opacity (default: MASK_ALPHA or 180)
    #[arg(long)]
    pub mask_alpha: Option<u8>,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct ProbeArgs {
    /// Wind (u/v) field document
    #[arg(long)]
    pub wind: Option<PathBuf>,

    /// Mask field document
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Element code of the mask field
    #[arg(long, default_value = "APCP")]
    pub mask_element: String,

    /// Contour field document
    #[arg(long)]
    pub contour: Option<PathBuf>,

    /// Element code of the contour field
    #[arg(long, default_value = "PRMSL")]
    pub contour_element: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Print JSON instead of plain lines
    #[arg(long)]
    pub json: bool,
}

fn read_document(path: &Path) -> Result<FieldDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read field document {}", path.display()))?;
    FieldDocument::from_json(&json)
        .with_context(|| format!("failed to parse field document {}", path.display()))
}

fn load_scalar(path: &Path) -> Result<ScalarField> {
    read_document(path)?
        .into_scalar()
        .with_context(|| format!("{} is not a scalar field", path.display()))
}

fn load_vector(path: &Path) -> Result<VectorField> {
    read_document(path)?
        .into_vector()
        .with_context(|| format!("{} is not a vector field", path.display()))
}

pub fn render(args: &RenderArgs) -> Result<String> {
    let kind = VariableKind::from_code(&args.element);
    let mut config = RenderConfig::from_env();
    if let Some(alpha) = args.mask_alpha {
        config.max_alpha = alpha;
    }

    let mut layer = MaskLayer::new(kind, config).context("invalid render configuration")?;
    layer.set_field(Some(Arc::new(load_scalar(&args.field)?)));

    let view = ViewProjection::centered(
        args.lat,
        args.lng,
        args.zoom,
        args.width,
        args.height,
        args.pixel_ratio,
    )
    .context("invalid view")?;

    let len = buffer_len(args.width, args.height).context("invalid output size")?;
    let mut pixels = vec![0u8; len];
    let stats = layer.rasterize_into(&view, &mut pixels, args.width, args.height)?;
    output::write_png(&args.output, args.width, args.height, pixels)?;

    info!(
        element = %layer.kind(),
        output = %args.output.display(),
        sampled = stats.sampled,
        nodata = stats.nodata,
        "Rendered mask"
    );

    Ok(format!(
        "wrote {} ({}x{}, {} samples, {} without data)",
        args.output.display(),
        args.width,
        args.height,
        stats.sampled,
        stats.nodata
    ))
}

pub fn probe(args: &ProbeArgs) -> Result<String> {
    let mut overlay = Overlay::new(
        VariableKind::from_code(&args.mask_element),
        VariableKind::from_code(&args.contour_element),
        RenderConfig::from_env(),
    )?;

    if let Some(path) = &args.wind {
        overlay.wind.set_field(Some(Arc::new(load_vector(path)?)));
    }
    if let Some(path) = &args.mask {
        overlay.mask.set_field(Some(Arc::new(load_scalar(path)?)));
    }
    if let Some(path) = &args.contour {
        overlay.contour.set_field(Some(Arc::new(load_scalar(path)?)));
    }

    let readout = overlay.probe(args.lat, args.lng);
    if readout.is_none() {
        info!(lat = args.lat, lng = args.lng, "No wind at probe location");
    }

    if args.json {
        let value = match &readout {
            Some(r) => serde_json::json!({
                "lat": args.lat,
                "lng": args.lng,
                "wind": r.wind,
                "mask": r.mask,
                "contour": r.contour,
            }),
            None => serde_json::json!({ "lat": args.lat, "lng": args.lng, "readout": null }),
        };
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    Ok(match readout {
        Some(r) => r.lines().join("\n"),
        None => "-".to_string(),
    })
}

pub fn resolve(
    tile_json: &Path,
    level: &str,
    element: &str,
    time: Option<&str>,
    now: DateTime<Utc>,
) -> Result<String> {
    let metadata = TileMetadata::from_file(tile_json)
        .with_context(|| format!("failed to load tile metadata from {}", tile_json.display()))?;

    let level = Level::new(level);
    let coverage = metadata.coverage(&level)?;
    let requested = match time {
        Some(t) => ValidTime::parse_compact(t)?,
        None => coverage.default_instant(now),
    };
    if !coverage.contains(requested) {
        info!(requested = %requested, start = %coverage.start, end = %coverage.end, "Clamping requested time into coverage");
    }

    let request = metadata.request(VariableKind::from_code(element), level, requested)?;
    let zooms: Vec<String> = request.tile_zooms().iter().map(|z| z.to_string()).collect();

    Ok(format!(
        "valid_time={}\nurl={}\nzooms={}",
        request.instant.compact(),
        request.url(&metadata.url),
        zooms.join(",")
    ))
}
