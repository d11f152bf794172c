//! theu - build and publish pipeline for the THE∪ sites.

mod asset;
mod cli;
mod config;
mod core;
mod hooks;
mod logger;
mod page;
mod stamp;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, FinishArgs};
use config::Config;

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

    let config = Config::load(&cli)?;

    match &cli.command {
        Commands::Stamp => cli::build::stamp_build(&config).map(|_| ()),
        Commands::Finish {
            finish_args,
            routes,
        } => {
            cli::build::finish_build(&config, routes)?;
            serve_unless_disabled(&config, finish_args)
        }
        Commands::Build { finish_args, .. } => {
            cli::build::build_site(&config)?;
            serve_unless_disabled(&config, finish_args)
        }
        Commands::Serve { .. } => cli::serve::serve_site(&config),
    }
}

/// Preview the output after a successful build unless `--no-serve`.
fn serve_unless_disabled(config: &Config, args: &FinishArgs) -> Result<()> {
    if args.no_serve {
        return Ok(());
    }
    cli::serve::serve_site(config)
}
