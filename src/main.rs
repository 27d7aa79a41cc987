use clap::Parser;
use loupe::cli::{Cli, Commands};
use loupe::config::EngineConfig;
use loupe::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Colors(args) => loupe::cli::colors::run(args, config, &printer)?,
        Commands::Inspect(args) => loupe::cli::inspect::run(args, config, &printer)?,
        Commands::Completions(args) => loupe::cli::completions::run(args)?,
    }

    Ok(())
}
