//! Page snapshot parsing.
//!
//! A snapshot is a declarative description of a rendered page: a tree of
//! elements with their tags, attributes, inline style text, computed style
//! map, text content, and bounding rectangles. Snapshots load from YAML or
//! JSON (chosen by file extension) and build a [`Document`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoupeError, Result};

use super::document::{Document, NodeId, Rect, ScrollOffset};
use super::style::InlineStyle;

/// A page snapshot loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    /// Viewport scroll offset as `[x, y]`.
    pub scroll: [f64; 2],

    /// Base directory image sources resolve against. Relative to the
    /// snapshot file's own directory when relative.
    pub base: Option<String>,

    /// Top-level elements of the page.
    pub elements: Vec<ElementSnapshot>,
}

/// One element in a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSnapshot {
    pub tag: String,

    pub id: Option<String>,

    pub classes: Vec<String>,

    /// Inline declaration text, as it would appear in a `style` attribute.
    pub style: Option<String>,

    /// Computed style map for the element.
    pub computed: std::collections::BTreeMap<String, String>,

    pub text: Option<String>,

    /// Image source (for `img` elements).
    pub src: Option<String>,

    /// Bounding rectangle as `[x, y, width, height]` in viewport coordinates.
    pub rect: Option<[f64; 4]>,

    pub children: Vec<ElementSnapshot>,
}

impl PageSnapshot {
    /// Load a snapshot from a file, YAML or JSON by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LoupeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read snapshot: {}", e),
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut snapshot = if is_json {
            Self::parse_json(&content)?
        } else {
            Self::parse_yaml(&content)?
        };

        // Relative base paths resolve against the snapshot's directory
        if let Some(dir) = path.parent() {
            snapshot.base = Some(match &snapshot.base {
                Some(base) if Path::new(base).is_absolute() => base.clone(),
                Some(base) => dir.join(base).to_string_lossy().into_owned(),
                None => dir.to_string_lossy().into_owned(),
            });
        }

        Ok(snapshot)
    }

    /// Parse a snapshot from YAML text.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| LoupeError::Snapshot {
            message: format!("Invalid snapshot: {}", e),
            help: Some("Check the snapshot YAML syntax".to_string()),
        })
    }

    /// Parse a snapshot from JSON text.
    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| LoupeError::Snapshot {
            message: format!("Invalid snapshot: {}", e),
            help: Some("Check the snapshot JSON syntax".to_string()),
        })
    }

    /// Build a live document from this snapshot.
    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        doc.scroll = ScrollOffset {
            x: self.scroll[0],
            y: self.scroll[1],
        };
        if let Some(base) = self.base {
            doc.set_base(base);
        }

        for element in self.elements {
            let id = build_element(&mut doc, element);
            doc.append_top_level(id);
        }
        doc
    }
}

fn build_element(doc: &mut Document, snapshot: ElementSnapshot) -> NodeId {
    let id = doc.create_element(if snapshot.tag.is_empty() {
        "div".to_string()
    } else {
        snapshot.tag
    });

    {
        let el = doc.element_mut(id).expect("freshly created element");
        el.id = snapshot.id;
        if let Some(style) = &snapshot.style {
            el.style = InlineStyle::parse(style);
        }
        el.computed = snapshot.computed.into_iter().collect();
        el.src = snapshot.src;
        if let Some([x, y, w, h]) = snapshot.rect {
            el.rect = Rect::new(x, y, w, h);
        }
    }
    for class in snapshot.classes {
        doc.add_class(id, &class);
    }
    if let Some(text) = snapshot.text {
        doc.set_text(id, &text);
    }

    // Inline declarations win computed resolution
    let inline: Vec<(String, String)> = doc
        .element(id)
        .map(|el| {
            el.style
                .iter()
                .map(|d| (d.name.clone(), d.value.clone()))
                .collect()
        })
        .unwrap_or_default();
    for (name, value) in inline {
        if let Some(el) = doc.element_mut(id) {
            el.computed.set(name, value);
        }
    }

    for child in snapshot.children {
        let child_id = build_element(doc, child);
        doc.append_child(id, child_id);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
scroll: [0, 120]
elements:
  - tag: body
    computed:
      background-color: "rgb(255, 255, 255)"
    children:
      - tag: h1
        id: title
        classes: [hero]
        style: "color: rgb(10, 20, 30) !important"
        text: "Welcome"
        rect: [0, 0, 800, 60]
      - tag: img
        src: banner.png
"#;

    #[test]
    fn test_parse_yaml_snapshot() {
        let snapshot = PageSnapshot::parse_yaml(SAMPLE).unwrap();

        assert_eq!(snapshot.scroll, [0.0, 120.0]);
        assert_eq!(snapshot.elements.len(), 1);
        assert_eq!(snapshot.elements[0].children.len(), 2);
    }

    #[test]
    fn test_into_document() {
        let doc = PageSnapshot::parse_yaml(SAMPLE).unwrap().into_document();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.scroll.y, 120.0);

        let title = doc.find_by_id("title").unwrap();
        let el = doc.element(title).unwrap();
        assert_eq!(el.tag, "h1");
        assert_eq!(el.text(), "Welcome");
        assert!(el.has_class("hero"));
        assert_eq!(el.rect, Rect::new(0.0, 0.0, 800.0, 60.0));
        assert!(el.style.iter().next().unwrap().important);

        assert_eq!(doc.images().len(), 1);
    }

    #[test]
    fn test_inline_wins_computed() {
        let yaml = r#"
elements:
  - tag: p
    style: "color: rgb(1, 2, 3)"
    computed:
      color: "rgb(200, 200, 200)"
      display: block
"#;
        let doc = PageSnapshot::parse_yaml(yaml).unwrap().into_document();
        let p = doc.find_first_tag("p").unwrap();
        let el = doc.element(p).unwrap();

        assert_eq!(el.computed.get("color"), Some("rgb(1, 2, 3)"));
        assert_eq!(el.computed.get("display"), Some("block"));
    }

    #[test]
    fn test_parse_json_snapshot() {
        let json = r#"{"elements": [{"tag": "div", "text": "hi"}]}"#;
        let doc = PageSnapshot::parse_json(json).unwrap().into_document();

        assert_eq!(doc.len(), 1);
        let div = doc.find_first_tag("div").unwrap();
        assert_eq!(doc.element(div).unwrap().text(), "hi");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(PageSnapshot::parse_yaml("elements: {bad").is_err());
    }
}
