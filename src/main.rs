//! cvbuild - build automation for a LaTeX resume.

#![allow(dead_code)]

mod cli;
mod compiler;
mod config;
mod core;
mod hooks;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
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
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli)?;

    match cli.command() {
        Commands::Build => cli::build::run(&config),
        Commands::Clean => cli::clean::run(&config),
        Commands::Watch => cli::watch::run(&config),
        Commands::Tailor { offer } => cli::tailor::run(&config, &offer),
    }
}
