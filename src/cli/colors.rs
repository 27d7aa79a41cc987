//! Colour extraction command.
//!
//! Loads a page snapshot, runs a GET_PAGE_COLORS request through the engine,
//! and prints the collected palette. An empty palette is reported as
//! "nothing found", never as an error.

use std::path::PathBuf;

use clap::Args;

use crate::config::EngineConfig;
use crate::dom::PageSnapshot;
use crate::engine::{Engine, Request, Response};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

/// Extract the colour palette of a page snapshot
#[derive(Args, Debug)]
pub struct ColorsArgs {
    /// Page snapshot to scan (YAML or JSON)
    #[arg(required = true)]
    pub snapshot: PathBuf,

    /// Emit the raw response as JSON instead of palette lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ColorsArgs, config: EngineConfig, printer: &Printer) -> Result<()> {
    let display = display_path(&args.snapshot);
    let mut doc = PageSnapshot::load(&args.snapshot)?.into_document();
    let mut engine = Engine::new(config);

    printer.status(
        "Scanning",
        &format!("{} ({})", display, plural(doc.len(), "element", "elements")),
    );

    let response = engine.dispatch(&mut doc, Request::GetPageColors);

    if args.json {
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let Response::Colors { colors } = response else {
        unreachable!("GET_PAGE_COLORS always yields a colors response");
    };

    if colors.is_empty() {
        printer.info("Finished", "no colors found on this page");
        return Ok(());
    }

    printer.status(
        "Collected",
        &plural(colors.len(), "colour", "colours"),
    );
    for (i, color) in colors.iter().enumerate() {
        println!("$colour-{}: {}", i + 1, color);
    }

    Ok(())
}
