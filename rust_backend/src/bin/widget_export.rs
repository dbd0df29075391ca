//! Command-line access to widget derivation.
//!
//! Reads a JSON request from a file (or `-` for stdin) and writes the JSON
//! result to stdout. Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deep_widgets::api::requests;
use deep_widgets::config::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "widget-export")]
#[command(about = "Derive filter, export and report data from widget values")]
#[command(version)]
struct Args {
    /// Pipeline configuration file (defaults to widgets.toml lookup)
    #[arg(short, long, global = true, env = "DEEP_WIDGETS_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build comprehensive views for `{"widgets": [...], "entries": [...]}`
    Views {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Derive filter and export data for one attribute
    Derive {
        #[arg(short, long)]
        widget: PathBuf,
        #[arg(short, long)]
        attribute: PathBuf,
    },
    /// Detect field types of `{"rows": [...], "fields": [...], "geos": {...}}`
    Fields {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Resolve admin-level titles of `{"areas": [...], "geo_options": [...]}`
    Locations {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    let config = match path {
        Some(path) => PipelineConfig::from_file(path),
        None => PipelineConfig::from_default_location(),
    };
    config.context("Failed to load configuration")
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deep_widgets=info,widget_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let output = match &args.command {
        Command::Views { input } => {
            info!("Building comprehensive views from {}", input.display());
            requests::handle_views(&config, &read_input(input)?, args.pretty)
                .context(requests::BUILD_COMPREHENSIVE_VIEWS)?
        }
        Command::Derive { widget, attribute } => requests::handle_derive_parts(
            &config,
            &read_input(widget)?,
            &read_input(attribute)?,
            args.pretty,
        )
        .with_context(|| format!("{} ({}, {})", requests::DERIVE_ATTRIBUTE, widget.display(), attribute.display()))?,
        Command::Fields { input } => {
            info!("Detecting field types from {}", input.display());
            requests::handle_fields(&config, &read_input(input)?, args.pretty)
                .context(requests::DETECT_FIELD_TYPES)?
        }
        Command::Locations { input } => {
            requests::handle_locations(&config, &read_input(input)?, args.pretty)
                .context(requests::LOCATIONS_INFO)?
        }
    };

    println!("{}", output);
    Ok(())
}
