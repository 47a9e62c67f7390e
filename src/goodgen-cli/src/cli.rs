//! CLI argument definitions for goodgen

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "goodgen")]
#[command(about = "Normalized game stat dataset generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch upstream tables and generate entity data bundles
    #[command(visible_alias = "g")]
    Generate {
        /// Output directory for generated bundles
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Generate character bundles only
        #[arg(long)]
        characters: bool,

        /// Generate weapon bundles only
        #[arg(long)]
        weapons: bool,

        /// Generate artifact bundles only
        #[arg(long)]
        artifacts: bool,

        /// Skip icon downloads
        #[arg(long)]
        no_images: bool,

        /// Roster file restricting which entities are emitted
        /// (defaults to <frontend>/src/constants.json when configured)
        #[arg(long)]
        roster: Option<PathBuf>,
    },

    /// Copy generated bundles into the front-end data directory
    #[command(name = "copy-data")]
    CopyData {
        /// Directory holding previously generated bundles
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Front-end checkout (uses configured default if not provided)
        #[arg(long)]
        frontend: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the upstream data mirror base URL
        #[arg(long)]
        data_url: Option<String>,

        /// Set the texture CDN base URL
        #[arg(long)]
        textures_url: Option<String>,

        /// Set the front-end checkout directory
        #[arg(long)]
        frontend: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
