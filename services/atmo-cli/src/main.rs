//! Atmospheric overlay command-line tool.
//!
//! Works on decoded field documents (JSON) and tile metadata:
//! - `render`: rasterize a scalar field to a PNG mask
//! - `probe`: print the wind / mask / contour readout at a point
//! - `resolve`: clamp a time into a level's coverage and build tile URLs

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "atmo")]
#[command(about = "Weather overlay rasterization and point sampling")]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, env = "ATMO_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Log output format
    #[arg(long, env = "ATMO_LOG_FORMAT", global = true)]
    #[arg(value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a scalar field into a PNG
    Render(commands::RenderArgs),

    /// Print the readout at a point
    Probe(commands::ProbeArgs),

    /// Resolve a valid time and tile URLs from tile metadata
    Resolve {
        /// Tile metadata JSON
        #[arg(long, env = "ATMO_TILE_JSON")]
        tile_json: PathBuf,

        /// Level id ("surface", "850", ...)
        #[arg(long, default_value = "surface")]
        level: String,

        /// Element code (wind, TMP, TCDC, APCP, PRMSL)
        #[arg(long, default_value = "wind")]
        element: String,

        /// Requested time, YYYYMMDDHHmm (default: the last whole hour)
        #[arg(long)]
        time: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }

    let report = match args.command {
        Command::Render(render) => commands::render(&render)?,
        Command::Probe(probe) => commands::probe(&probe)?,
        Command::Resolve {
            tile_json,
            level,
            element,
            time,
        } => commands::resolve(&tile_json, &level, &element, time.as_deref(), chrono::Utc::now())?,
    };

    println!("{}", report);
    Ok(())
}
