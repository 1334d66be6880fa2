//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect, check and generate manview configuration files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: ~/.config/manview.conf, then /etc/xdg/manview.conf)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the config file and report every problem
    #[command(visible_alias = "c")]
    Check,

    /// Write a starter config file holding every default
    #[command(visible_alias = "i")]
    Init {
        /// Target file (default: ~/.config/manview.conf)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: Option<PathBuf>,

        /// Print the file to stdout instead of writing it
        #[arg(short, long)]
        dry: bool,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective value of one option
    #[command(visible_alias = "g")]
    Get {
        /// Option to query
        #[arg(value_name = "SECTION.OPTION")]
        option: String,
    },

    /// Print the effective configuration
    #[command(visible_alias = "d")]
    Dump {
        /// Include internal options (as comments)
        #[arg(short, long)]
        all: bool,
    },
}
