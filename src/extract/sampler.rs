//! Image palette sampling.
//!
//! Decodes every `img` element's source and quantizes its pixels to a handful
//! of representative colours. Best-effort by contract: a missing source, an
//! unreadable file, or a decode failure contributes nothing and never fails
//! the batch. Images are sampled in parallel and joined back in document
//! order.

use std::path::PathBuf;

use rayon::prelude::*;

use crate::dom::Document;

use super::color::ColorValue;
use super::quantize::{self, DEFAULT_COLORS_PER_IMAGE};

/// Pixel budget sampled per image before quantization.
const DEFAULT_PIXEL_BUDGET: usize = 65_536;

/// Configuration for image palette sampling.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Representative colours extracted per image.
    pub colors_per_image: usize,

    /// Maximum number of pixels fed to the quantizer per image. Larger
    /// images are sampled at a stride, bounding cost on pathological pages.
    pub pixel_budget: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            colors_per_image: DEFAULT_COLORS_PER_IMAGE,
            pixel_budget: DEFAULT_PIXEL_BUDGET,
        }
    }
}

/// Sample representative colours from every image in the document.
///
/// Fan-out across images, fan-in in document order: the result interleaves
/// nothing — image 0's palette colours come before image 1's.
pub fn sample_image_colors(doc: &Document, config: &SamplerConfig) -> Vec<ColorValue> {
    let sources: Vec<Option<PathBuf>> = doc
        .images()
        .into_iter()
        .map(|id| doc.resolve_src(id))
        .collect();

    let per_image: Vec<Vec<ColorValue>> = sources
        .par_iter()
        .map(|source| match source {
            Some(path) => sample_one(path, config),
            None => Vec::new(),
        })
        .collect();

    per_image.into_iter().flatten().collect()
}

/// Decode and quantize a single image, absorbing failure as empty.
fn sample_one(path: &PathBuf, config: &SamplerConfig) -> Vec<ColorValue> {
    let Ok(img) = image::open(path) else {
        return Vec::new();
    };
    let rgba = img.to_rgba8();

    let total = rgba.pixels().len();
    let stride = total.div_ceil(config.pixel_budget.max(1)).max(1);

    let pixels: Vec<[u8; 4]> = rgba
        .pixels()
        .step_by(stride)
        .map(|p| p.0)
        .collect();

    quantize::quantize(&pixels, config.colors_per_image)
        .into_iter()
        .map(|[r, g, b]| ColorValue::rgb(r, g, b))
        .collect()
}
