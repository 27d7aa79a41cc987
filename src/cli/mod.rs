pub mod colors;
pub mod completions;
pub mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// loupe - Page inspection engine
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Engine configuration file (loupe.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the colour palette of a page snapshot
    Colors(colors::ColorsArgs),

    /// Inspect an element's inline and computed styles
    Inspect(inspect::InspectArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
