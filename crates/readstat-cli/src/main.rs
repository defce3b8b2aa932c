//! readstat CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "readstat",
    version,
    about = "Reading assessment statistics and reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics for a dataset
    Summarize {
        /// Path to .toml dataset or directory
        #[arg(long)]
        dataset: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Write JSON and/or HTML reports
    Report {
        /// Path to .toml dataset or directory
        #[arg(long)]
        dataset: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all (defaults to the configured default_format)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate dataset TOML files
    Validate {
        /// Path to dataset file or directory
        #[arg(long)]
        dataset: PathBuf,
    },

    /// Create starter config and example dataset
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("readstat=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Summarize { dataset, format } => commands::summarize::execute(dataset, format),
        Commands::Report {
            dataset,
            output,
            format,
            config,
        } => commands::report::execute(dataset, output, format, config),
        Commands::Validate { dataset } => commands::validate::execute(dataset),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
