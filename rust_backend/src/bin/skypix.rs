//! skypix CLI
//!
//! Reads a JSON coordinate file and prints per-coordinate pixel densities,
//! or chart-ready all-sky positions, as JSON on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use flexi_logger::Logger;
use std::path::PathBuf;

use skypix::config::SkyPixConfig;
use skypix::healpix::{Nside, PixelScheme};
use skypix::parsing::parse_coordinates_json;
use skypix::services::pixel_density::compute_pixel_density_map;
use skypix::services::sky_map::{density_colored_sky_map, Projection};

#[derive(Parser)]
#[command(name = "skypix")]
#[command(about = "Count how many sky positions share each HEALPix pixel", long_about = None)]
struct Args {
    /// JSON file with `ra`/`dec` records or columns, in degrees
    #[arg(long, short)]
    input: PathBuf,

    /// HEALPix resolution (overrides the config file)
    #[arg(long)]
    nside: Option<i64>,

    /// Use the nested pixel numbering instead of ring
    #[arg(long)]
    nested: bool,

    /// Configuration file (defaults to skypix.toml if present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Emit density-colored all-sky chart positions instead of densities
    #[arg(long)]
    project: bool,

    /// Projection name for --project (overrides the config file)
    #[arg(long)]
    projection: Option<String>,

    /// Chart origin in degrees for --project (overrides the config file)
    #[arg(long)]
    origin: Option<f64>,

    /// Log verbosely to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<SkyPixConfig> {
    match path {
        Some(path) => SkyPixConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SkyPixConfig::from_default_location().unwrap_or_else(|e| {
            log::debug!("using built-in defaults: {}", e);
            SkyPixConfig::default()
        })),
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    let nside = match args.nside {
        Some(value) => Nside::new(value)?,
        None => config.nside()?,
    };
    let mut options = config.density_options();
    if args.nested {
        options = options.with_scheme(PixelScheme::Nested);
    }

    let batch = parse_coordinates_json(&args.input)
        .with_context(|| format!("Failed to read coordinates from {}", args.input.display()))?;
    log::info!("loaded {} coordinates from {}", batch.len(), args.input.display());

    let json = if args.project {
        let projection = match args.projection.as_deref() {
            Some(name) => name.parse::<Projection>()?,
            None => config.projection.kind,
        };
        let origin = args.origin.unwrap_or(config.projection.origin_deg);
        let map = density_colored_sky_map(&batch, nside, &options, origin, projection)?;
        serde_json::to_string_pretty(&map)?
    } else {
        let map = compute_pixel_density_map(&batch, nside, &options)?;
        log::info!(
            "{} coordinates over {} distinct pixels (max density {})",
            map.density.len(),
            map.distinct_pixels,
            map.max_density
        );
        serde_json::to_string_pretty(&map)?
    };

    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let _logger = Logger::try_with_env_or_str(level)
        .context("Invalid log specification")?
        .start()
        .context("Logger initialization failed")?;

    run(args)
}
