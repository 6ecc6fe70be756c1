//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod annotate;
mod helpers;
mod inspect;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use verus::config::{load_settings_with_options, LoadOptions};

/// Output format for `annotate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// A single indented JSON array
    Pretty,
    /// Human-readable table
    Table,
}

#[derive(Parser)]
#[command(name = "verus")]
#[command(about = "Annotate search results with content age and technology signals")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Evaluate ages as of this RFC 3339 timestamp instead of the current time
    #[arg(long, global = true, env = "VERUS_NOW")]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate result records read as JSON lines or a JSON array
    Annotate {
        /// Input file (reads stdin if omitted or "-")
        input: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Detect the publication date in a snippet and/or URL
    Date {
        /// Snippet text
        text: String,
        /// Result URL, used when the snippet has no date
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Scan text for legacy and modern technology signals
    Scan {
        /// Snippet or title text
        text: String,
    },

    /// Classify a URL as official documentation and/or a known platform
    Url {
        /// Result URL
        url: String,
    },

    /// List the built-in pattern tables
    Patterns,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let (settings, _config) = load_settings_with_options(options).await?;

    // Read the clock once; every result in this run is aged against it.
    let now = cli.now.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Annotate { input, format } => {
            annotate::cmd_annotate(&settings, input.as_deref(), format, now).await
        }
        Commands::Date { text, url } => inspect::cmd_date(&settings, &text, url.as_deref(), now),
        Commands::Scan { text } => inspect::cmd_scan(&text),
        Commands::Url { url } => inspect::cmd_url(&url),
        Commands::Patterns => inspect::cmd_patterns(),
    }
}
