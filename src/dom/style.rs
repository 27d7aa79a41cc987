//! Style declarations attached to document elements.
//!
//! An element carries two style surfaces: the ordered inline declaration list
//! (what would appear in a `style="..."` attribute) and the flat computed map
//! (what style resolution produced). Inline declarations may carry
//! `!important`; computed values never do.

use std::collections::HashMap;
use std::fmt;

/// A single style declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl StyleProperty {
    /// Create a declaration without the important flag.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            important: false,
        }
    }

    /// Create a declaration carrying `!important`.
    pub fn important(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            important: true,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(f, "{}: {} !important", self.name, self.value)
        } else {
            write!(f, "{}: {}", self.name, self.value)
        }
    }
}

/// An ordered list of inline style declarations.
///
/// Order is declaration order, preserved through edits: setting an existing
/// property updates it in place, setting a new one appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<StyleProperty>,
}

impl InlineStyle {
    /// Create an empty inline style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSS declaration text (the body of a `style` attribute).
    ///
    /// Lenient like a browser: malformed segments are dropped, never an error.
    /// `!important` (any case) is stripped from the value and recorded as a flag.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();

        for segment in text.split(';') {
            let Some((name, value)) = segment.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let mut value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }

            let mut important = false;
            if let Some(stripped) = strip_important(value) {
                value = stripped;
                important = true;
            }
            if value.is_empty() {
                continue;
            }

            style.declarations.push(StyleProperty {
                name: name.to_string(),
                value: value.to_string(),
                important,
            });
        }

        style
    }

    /// Get a declaration's value by property name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Set a property, updating in place when it already exists.
    pub fn set(&mut self, name: &str, value: &str, important: bool) {
        if let Some(existing) = self.declarations.iter_mut().find(|d| d.name == name) {
            existing.value = value.to_string();
            existing.important = important;
        } else {
            self.declarations.push(StyleProperty {
                name: name.to_string(),
                value: value.to_string(),
                important,
            });
        }
    }

    /// Remove a property. Returns true when it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|d| d.name != name);
        self.declarations.len() != before
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize back to declaration text.
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Strip a trailing `!important` token, case-insensitively.
fn strip_important(value: &str) -> Option<&str> {
    let lower = value.to_ascii_lowercase();
    let idx = lower.rfind("!important")?;
    if lower[idx + "!important".len()..].trim().is_empty() {
        Some(value[..idx].trim_end())
    } else {
        None
    }
}

/// The resolved computed style of an element.
///
/// Snapshot-provided; the document mirrors inline edits into it so that inline
/// declarations win, matching how a browser reports computed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: HashMap<String, String>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a computed value by property name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
