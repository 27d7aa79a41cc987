//! Engine configuration (loupe.yaml).
//!
//! Every knob defaults to the stock behavior; a config file only needs the
//! fields it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoupeError, Result};
use crate::extract::{quantize, scanner, SamplerConfig, ScanConfig};
use crate::overlay::{text_edit, TextEditConfig};

/// How the two overlay modes interact.
///
/// `Independent` matches the observed design: both modes may be enabled at
/// once, with the inspector consuming clicks while it is active. `Exclusive`
/// makes activation of one suspend the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePolicy {
    #[default]
    Independent,
    Exclusive,
}

/// Engine configuration loaded from loupe.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Computed-style properties the colour scan reads.
    pub color_properties: Vec<String>,

    /// Tag allow-list for text-edit mode.
    pub editable_tags: Vec<String>,

    /// Representative colours extracted per image.
    pub colors_per_image: usize,

    /// Maximum pixels sampled per image before quantization.
    pub pixel_budget: usize,

    /// Overlay mode interaction policy.
    pub mode_policy: ModePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let sampler = SamplerConfig::default();
        Self {
            color_properties: scanner::DEFAULT_COLOR_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            editable_tags: text_edit::DEFAULT_EDITABLE_TAGS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            colors_per_image: quantize::DEFAULT_COLORS_PER_IMAGE,
            pixel_budget: sampler.pixel_budget,
            mode_policy: ModePolicy::Independent,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a loupe.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LoupeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from YAML text.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| LoupeError::Snapshot {
            message: format!("Invalid config: {}", e),
            help: Some("Check loupe.yaml syntax".to_string()),
        })
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            properties: self.color_properties.clone(),
        }
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            colors_per_image: self.colors_per_image,
            pixel_budget: self.pixel_budget,
        }
    }

    pub fn text_edit_config(&self) -> TextEditConfig {
        TextEditConfig {
            tags: self.editable_tags.clone(),
        }
    }
}
