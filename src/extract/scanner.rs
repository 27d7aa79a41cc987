//! Computed-style colour scanning.
//!
//! A single synchronous pass over every element in the document, reading a
//! configurable list of colour-bearing properties from computed style.
//! Invisible sentinels are skipped; surviving values dedupe by exact string in
//! first-seen order.

use std::collections::HashSet;

use crate::dom::Document;

use super::color::ColorValue;

/// Colour-bearing computed properties read by the default scan.
pub const DEFAULT_COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
];

/// Configuration for a style colour scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Property names to read from each element's computed style.
    pub properties: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            properties: DEFAULT_COLOR_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Scan the whole document for computed-style colours.
///
/// Elements with no computed entry for a property are skipped silently.
pub fn scan_style_colors(doc: &Document, config: &ScanConfig) -> Vec<ColorValue> {
    let mut seen = HashSet::new();
    let mut colors = Vec::new();

    for id in doc.elements() {
        let Some(element) = doc.element(id) else {
            continue;
        };
        for property in &config.properties {
            let Some(value) = element.computed.get(property) else {
                continue;
            };
            let color = ColorValue::new(value);
            if color.is_invisible() {
                continue;
            }
            if seen.insert(color.clone()) {
                colors.push(color);
            }
        }
    }

    colors
}
