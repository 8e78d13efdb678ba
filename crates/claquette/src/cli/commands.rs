//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use claquette::{ProjectKind, StoryBrief};
use std::path::PathBuf;

/// Claquette - screenplay generation from a story brief
#[derive(Parser, Debug)]
#[command(name = "claquette")]
#[command(about = "Generate characters, episodes or a film, and casting from a story brief", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default search path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline and print the screenplay as JSON
    Generate(BriefArgs),

    /// Generate only the characters
    Characters(BriefArgs),

    /// Generate a poster and print the project with its base64 image
    Poster(BriefArgs),
}

/// The story brief, as given on the command line
#[derive(Args, Debug, Clone)]
pub struct BriefArgs {
    /// Story description
    #[arg(long)]
    pub description: String,

    /// Film or series
    #[arg(long, value_enum, default_value = "film")]
    pub kind: KindArg,

    /// Number of episodes (series only)
    #[arg(long)]
    pub episodes: Option<u32>,

    /// Project title
    #[arg(long, default_value = "Untitled")]
    pub title: String,
}

/// Project kind options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    /// A single feature film
    Film,
    /// A series of episodes
    Series,
}

impl From<KindArg> for ProjectKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Film => ProjectKind::Film,
            KindArg::Series => ProjectKind::Series,
        }
    }
}

impl BriefArgs {
    /// The brief these arguments describe. A series without `--episodes` is
    /// rejected later by brief validation.
    pub fn brief(&self) -> StoryBrief {
        match ProjectKind::from(self.kind) {
            ProjectKind::Film => StoryBrief::film(&self.description),
            ProjectKind::Series => {
                StoryBrief::series(&self.description, self.episodes.unwrap_or(0))
            }
        }
    }
}
