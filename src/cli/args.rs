//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Render blockdiag-family diagrams encoded in request URLs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: diagserve.toml)
    #[arg(short = 'C', long, global = true, default_value = "diagserve.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output (per-request logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the diagram HTTP server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Number of request worker threads
        #[arg(short, long)]
        workers: Option<usize>,

        /// Largest accepted decompressed source (e.g., 64KB, 1MB)
        #[arg(long = "max-source", value_name = "SIZE")]
        max_source: Option<String>,
    },

    /// Encode a diagram source file for use in a request URL
    #[command(visible_alias = "e")]
    Encode {
        /// Diagram source file. Reads stdin when omitted or `-`.
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Output format used in the printed path
        #[arg(short, long, default_value = "svg")]
        format: String,
    },
}
