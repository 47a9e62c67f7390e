mod cli;
mod commands;
mod config;
mod fetch;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::generate::GenerateOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            characters,
            weapons,
            artifacts,
            no_images,
            roster,
        } => {
            commands::generate::handle(GenerateOptions {
                output,
                characters,
                weapons,
                artifacts,
                no_images,
                roster,
            })?;
        }

        Commands::CopyData { output, frontend } => {
            commands::copy_data::handle(&output, frontend.as_deref())?;
        }

        Commands::Configure {
            data_url,
            textures_url,
            frontend,
            show,
        } => {
            commands::configure::handle(data_url, textures_url, frontend, show)?;
        }
    }

    Ok(())
}
