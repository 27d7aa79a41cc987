//! Element inspection command.
//!
//! Loads a page snapshot, resolves a target element, and prints the same
//! report the in-page inspector panel shows: selector summary, inline
//! declarations, then the allow-listed computed properties.

use std::path::PathBuf;

use clap::Args;

use crate::config::EngineConfig;
use crate::dom::{Document, NodeId, PageSnapshot};
use crate::engine::{Engine, Request};
use crate::error::{LoupeError, Result};
use crate::output::{display_path, Printer};
use crate::overlay::ElementInfo;

/// Inspect an element's inline and computed styles
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Page snapshot to inspect (YAML or JSON)
    #[arg(required = true)]
    pub snapshot: PathBuf,

    /// Target element: an id attribute, or a tag name to match the first
    /// element with that tag
    #[arg(long, short)]
    pub target: String,

    /// Set an inline property on the target before reporting, as "name:value"
    #[arg(long)]
    pub set: Option<String>,
}

pub fn run(args: InspectArgs, config: EngineConfig, printer: &Printer) -> Result<()> {
    let display = display_path(&args.snapshot);
    let mut doc = PageSnapshot::load(&args.snapshot)?.into_document();

    let target = resolve_target(&doc, &args.target)?;
    printer.status("Inspecting", &format!("{} in {}", args.target, display));

    let mut engine = Engine::new(config);
    engine.dispatch(&mut doc, Request::StartCssInspection);
    engine.handle_event(
        &mut doc,
        crate::dom::InputEvent::PointerMove { target },
    );
    engine.handle_event(&mut doc, crate::dom::InputEvent::Click { target });

    if let Some(edit) = &args.set {
        let (name, value) = edit.split_once(':').ok_or_else(|| LoupeError::Style {
            message: format!("Invalid property edit: {}", edit),
            help: Some("Use name:value, e.g. --set color:rgb(0,0,0)".to_string()),
        })?;
        engine.dispatch(
            &mut doc,
            Request::UpdateCssProperty {
                property: name.trim().to_string(),
                value: value.trim().to_string(),
            },
        );
    }

    let info = ElementInfo::resolve(&doc, target).ok_or_else(|| LoupeError::TargetNotFound {
        target: args.target.clone(),
    })?;
    print!("{}", info.render());

    engine.dispatch(&mut doc, Request::StopCssInspection);
    Ok(())
}

fn resolve_target(doc: &Document, target: &str) -> Result<NodeId> {
    doc.find_by_id(target)
        .or_else(|| doc.find_first_tag(target))
        .ok_or_else(|| LoupeError::TargetNotFound {
            target: target.to_string(),
        })
}
