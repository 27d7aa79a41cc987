//! Unified palette collection.
//!
//! Composes the style scan and image sampling into one deduplicated palette:
//! style colours first (their scan order is fixed before any image work
//! lands), then image-derived colours in image-then-palette-index order. An
//! empty palette is a valid outcome, distinct from any failure.

use crate::dom::Document;

use super::color::ColorValue;
use super::sampler::{self, SamplerConfig};
use super::scanner::{self, ScanConfig};

/// A collected page palette: ordered, no duplicates.
pub type Palette = Vec<ColorValue>;

/// Palette collection over a document.
#[derive(Debug, Clone, Default)]
pub struct ColorCollector {
    pub scan: ScanConfig,
    pub sampler: SamplerConfig,
}

impl ColorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the unified page palette.
    pub fn collect(&self, doc: &Document) -> Palette {
        let mut palette = scanner::scan_style_colors(doc, &self.scan);

        for color in sampler::sample_image_colors(doc, &self.sampler) {
            if !palette.contains(&color) {
                palette.push(color);
            }
        }

        palette
    }
}
