//! Gauge CLI
//!
//! Commands:
//! - convert: Convert a value between two units of a dimension
//! - units: List the units of a dimension
//! - dimensions: List the available dimensions
//! - demo: Run sample conversions for every built-in dimension
//!
//! Results go to stdout, diagnostics and errors to stderr.

mod commands;
mod config;
mod demo;
mod error;
mod format;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use gauge_units::Catalog;

use crate::commands::{ConvertArgs, Report};
use crate::config::Settings;
use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "gauge", version, about = "Convert between units of measurement")]
struct Cli {
    /// JSON catalog merged over the built-in tables [env: GAUGE_UNITS_PATH]
    #[arg(long, global = true, value_name = "FILE")]
    units: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `gauge_core=trace` [env: GAUGE_LOG, RUST_LOG]
    #[arg(long, global = true, value_name = "FILTER")]
    log: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a value from one unit to another
    Convert {
        #[arg(allow_negative_numbers = true)]
        value: String,
        from: String,
        to: String,

        /// Dimension to look the units up in; inferred from the units when omitted
        #[arg(short, long)]
        dimension: Option<String>,

        /// Convert a difference between values, ignoring offsets
        #[arg(long)]
        delta: bool,

        /// Exchange FROM and TO
        #[arg(long)]
        swap: bool,
    },

    /// List the units of a dimension
    Units { dimension: String },

    /// List the available dimensions
    Dimensions,

    /// Run sample conversions
    Demo,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, catalog: &Catalog) -> Result<Report, CliError> {
    match command {
        Command::Convert { value, from, to, dimension, delta, swap } => {
            commands::convert(catalog, &ConvertArgs { value, from, to, dimension, delta, swap })
        }
        Command::Units { dimension } => commands::units(catalog, &dimension),
        Command::Dimensions => Ok(commands::dimensions(catalog)),
        Command::Demo => demo::run(catalog),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.units, cli.log);
    init_tracing(&settings.log_filter);
    debug!(?settings, "starting");

    let result = settings
        .catalog()
        .map_err(CliError::from)
        .and_then(|catalog| run(cli.command, &catalog));

    match result {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report.json) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", report.text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                eprintln!("{}", json!({ "error": e.kind(), "message": e.to_string() }));
            } else {
                eprintln!("{}: {}", e.kind(), e);
            }
            ExitCode::FAILURE
        }
    }
}
