//! Colour extraction: style scanning, image sampling, palette collection.

pub mod collect;
pub mod color;
pub mod quantize;
pub mod sampler;
pub mod scanner;

pub use collect::{ColorCollector, Palette};
pub use color::{ColorValue, TRANSPARENT_RGBA};
pub use quantize::{quantize, DEFAULT_COLORS_PER_IMAGE};
pub use sampler::{sample_image_colors, SamplerConfig};
pub use scanner::{scan_style_colors, ScanConfig, DEFAULT_COLOR_PROPERTIES};
