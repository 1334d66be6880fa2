//! manview-config - inspect, check and generate manview configuration files.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use manview_config::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Check => cli::check::check_config(&cli),
        Commands::Init { path, dry, force } => {
            cli::init::init_config(path.as_deref(), *dry, *force)
        }
        Commands::Get { option } => cli::query::get_option(&cli, option),
        Commands::Dump { all } => cli::query::dump_config(&cli, *all),
    }
}
