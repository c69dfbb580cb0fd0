//! import-restrict CLI tool.
//!
//! Usage:
//! ```bash
//! import-restrict check [OPTIONS] [INPUT]
//! import-restrict list
//! import-restrict explain NAME [--file-path PATH]
//! import-restrict init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use import_restrict_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Checks import and require targets against configured restrictions
#[derive(Parser)]
#[command(name = "import-restrict")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a JSON feed of importees
    Check {
        /// Importee feed file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Override the configured severity
        #[arg(long)]
        severity: Option<Severity>,
    },

    /// List configured restrictions
    List,

    /// Explain how a single importee is matched
    Explain {
        /// Importee name as written in the import
        name: String,

        /// Resolved file path of the importee
        #[arg(long)]
        file_path: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Check {
            input,
            format,
            severity,
        } => commands::check::run(&input, format, severity, config_path),
        Commands::List => commands::list::run(config_path),
        Commands::Explain { name, file_path } => {
            commands::explain::run(&name, file_path.as_deref(), config_path)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
