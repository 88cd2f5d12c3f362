//! diagserve - render blockdiag-family diagrams from encoded request URLs.

mod cli;
mod config;
mod core;
mod diagram;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ServerConfig;
use diagram::{CommandRenderer, Dispatcher};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Serve { .. } => serve(&cli),
        Commands::Encode { file, format } => cli::encode::run(file.as_deref(), format),
    }
}

/// Load config, wire the command renderer and run the server until Ctrl+C.
fn serve(cli: &Cli) -> Result<()> {
    let config = ServerConfig::load(cli)?;
    if let Some(path) = &config.config_path {
        log!("config"; "using {}", path.display());
    }

    let renderer = CommandRenderer::new(&config.render);
    let dispatcher = Dispatcher::new(Box::new(renderer), config.max_source_bytes());

    let server = cli::serve::bind_server(&config, dispatcher)?;
    log!("serve"; "http://{}", server.addr());
    server.run()
}
