//! Extracted colour values.
//!
//! A [`ColorValue`] is a colour as the page spelled it. Identity is the exact
//! string: `#fff` and `rgb(255, 255, 255)` are distinct values on purpose,
//! because the palette reports what the page actually uses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fully-transparent computed-style sentinel.
pub const TRANSPARENT_RGBA: &str = "rgba(0, 0, 0, 0)";

/// A colour in CSS textual form, compared by exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorValue(String);

impl ColorValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Format an opaque colour as `rgb(r, g, b)`, the form image sampling
    /// produces.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("rgb({}, {}, {})", r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is one of the invisible sentinels a scan skips.
    pub fn is_invisible(&self) -> bool {
        self.0 == TRANSPARENT_RGBA || self.0 == "transparent"
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_formatting() {
        assert_eq!(ColorValue::rgb(1, 2, 3).as_str(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_identity_is_exact_string() {
        assert_ne!(
            ColorValue::new("#fff"),
            ColorValue::new("rgb(255, 255, 255)")
        );
    }

    #[test]
    fn test_invisible_sentinels() {
        assert!(ColorValue::new("rgba(0, 0, 0, 0)").is_invisible());
        assert!(ColorValue::new("transparent").is_invisible());
        assert!(!ColorValue::new("rgba(0, 0, 0, 0.5)").is_invisible());
    }
}
