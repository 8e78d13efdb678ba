//! Claquette CLI binary.
//!
//! This binary provides command-line access to the screenplay pipeline:
//! - Generate a full screenplay from a story brief
//! - Generate only the characters
//! - Generate a poster

use clap::Parser;
use claquette::{ClaquetteConfig, LoggingOptions, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_characters, run_generate, run_poster};

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClaquetteConfig::from_file(path)?,
        None => ClaquetteConfig::load()?,
    };

    let mut logging = LoggingOptions::from(&config.logging);
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    init_logging(logging)?;

    match &cli.command {
        Commands::Generate(args) => run_generate(&config, args).await?,
        Commands::Characters(args) => run_characters(&config, args).await?,
        Commands::Poster(args) => run_poster(&config, args).await?,
    }

    Ok(())
}
