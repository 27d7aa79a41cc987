//! loupe - Page inspection engine
//!
//! A library for inspecting rendered page snapshots: extracting colour
//! palettes from styles and images, editing visible text in place, and
//! live-inspecting CSS properties through floating overlays.

pub mod cli;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod output;
pub mod overlay;

pub use config::{EngineConfig, ModePolicy};
pub use dom::{
    Document, Element, EventDisposition, EventKind, InputEvent, NodeId, PageSnapshot, Rect,
    StyleProperty,
};
pub use engine::{Engine, ModeState, Request, Response};
pub use error::{LoupeError, Result};
pub use extract::{ColorCollector, ColorValue, Palette, SamplerConfig, ScanConfig};
pub use overlay::{CssInspector, ElementInfo, TextEditOverlay, TextEditState};
