//! Live CSS inspection.
//!
//! While active, the inspector owns exactly two nodes in the document: a
//! pointer-transparent highlight that tracks the hovered element's bounding
//! box, and an information panel showing the element's selector, its inline
//! declarations, and an allow-listed slice of its computed style. Pointer
//! movement rebuilds the panel wholesale; pointer-leave hides the highlight
//! without destroying it; clicks are fully suppressed and pin the selection
//! so property edits land on a stable target.
//!
//! The inspector's own nodes are excluded from hit resolution, otherwise
//! hovering the panel would inspect the panel.

use crate::dom::{Document, EventDisposition, EventKind, ListenerId, NodeId, StyleProperty};

/// Class carried by the highlight overlay node.
pub const HIGHLIGHT_CLASS: &str = "loupe-highlight";

/// Class carried by the information panel node.
pub const PANEL_CLASS: &str = "loupe-panel";

/// Cursor affordance while inspecting.
pub const INSPECT_CURSOR: &str = "crosshair";

/// Panel text before anything has been hovered.
pub const PANEL_PLACEHOLDER: &str = "Hover over an element to inspect its styles";

/// Computed properties the panel reports, in display order.
pub const COMPUTED_ALLOWLIST: &[&str] = &[
    "display",
    "position",
    "width",
    "height",
    "margin",
    "padding",
    "border",
    "background-color",
    "color",
    "font-size",
    "font-family",
    "font-weight",
    "line-height",
    "text-align",
    "opacity",
    "z-index",
    "flex-direction",
    "justify-content",
];

/// Computed values filtered out of the panel as noise.
const NOISE_VALUES: &[&str] = &["", "auto", "normal", "none"];

/// A read snapshot of one element's identity and styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementInfo {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline declarations, in declaration order.
    pub inline: Vec<StyleProperty>,
    /// Allow-listed computed properties, noise filtered, in allow-list order.
    pub computed: Vec<StyleProperty>,
}

impl ElementInfo {
    /// Resolve a snapshot of `target`, or None when it no longer exists.
    pub fn resolve(doc: &Document, target: NodeId) -> Option<Self> {
        let element = doc.element(target)?;

        let inline: Vec<StyleProperty> = element.style.iter().cloned().collect();

        let computed = COMPUTED_ALLOWLIST
            .iter()
            .filter_map(|name| {
                let value = element.computed.get(name)?;
                if NOISE_VALUES.contains(&value) {
                    return None;
                }
                // Computed values never carry !important
                Some(StyleProperty::new(*name, value))
            })
            .collect();

        Some(Self {
            tag: element.tag.clone(),
            id: element.id.clone(),
            classes: element.classes().to_vec(),
            inline,
            computed,
        })
    }

    /// CSS selector summary: `tag#id.class1.class2`.
    pub fn selector(&self) -> String {
        let mut out = self.tag.clone();
        if let Some(id) = &self.id {
            out.push('#');
            out.push_str(id);
        }
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        out
    }

    /// Render the panel text: selector, inline declarations, then computed.
    pub fn render(&self) -> String {
        let mut out = self.selector();
        out.push('\n');

        out.push_str("Inline styles:\n");
        if self.inline.is_empty() {
            out.push_str("  (none)\n");
        }
        for decl in &self.inline {
            out.push_str(&format!("  {}\n", decl));
        }

        out.push_str("Computed styles:\n");
        for decl in &self.computed {
            out.push_str(&format!("  {}\n", decl));
        }
        out
    }
}

#[derive(Debug)]
struct InspectionSession {
    highlight: NodeId,
    panel: NodeId,
    listeners: [ListenerId; 3],
    highlight_visible: bool,
    hovered: Option<NodeId>,
    pinned: Option<NodeId>,
}

/// CSS inspector state machine.
#[derive(Debug, Default)]
pub struct CssInspector {
    session: Option<InspectionSession>,
}

impl CssInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start inspecting. Idempotent: an active inspector is left untouched.
    pub fn start(&mut self, doc: &mut Document) {
        if self.session.is_some() {
            return;
        }

        let highlight = doc.create_element("div");
        doc.add_class(highlight, HIGHLIGHT_CLASS);
        doc.append_top_level(highlight);

        let panel = doc.create_element("div");
        doc.add_class(panel, PANEL_CLASS);
        doc.set_text(panel, PANEL_PLACEHOLDER);
        doc.append_top_level(panel);

        let listeners = [
            doc.install_listener(EventKind::PointerMove, true),
            doc.install_listener(EventKind::PointerLeave, true),
            doc.install_listener(EventKind::Click, true),
        ];
        doc.set_cursor(Some(INSPECT_CURSOR));

        self.session = Some(InspectionSession {
            highlight,
            panel,
            listeners,
            highlight_visible: false,
            hovered: None,
            pinned: None,
        });
    }

    /// Stop inspecting: remove both nodes, all listeners, and the cursor
    /// affordance. Idempotent when already inactive.
    pub fn stop(&mut self, doc: &mut Document) {
        let Some(session) = self.session.take() else {
            return;
        };

        doc.remove(session.highlight);
        doc.remove(session.panel);
        for listener in session.listeners {
            doc.remove_listener(listener);
        }
        doc.set_cursor(None);
    }

    /// The element property edits apply to: the pinned element when one was
    /// clicked, else the last hovered one.
    pub fn selected(&self) -> Option<NodeId> {
        let session = self.session.as_ref()?;
        session.pinned.or(session.hovered)
    }

    /// Whether the highlight is currently shown.
    pub fn highlight_visible(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.highlight_visible)
    }

    /// The highlight node, while active.
    pub fn highlight_node(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.highlight)
    }

    /// The panel node, while active.
    pub fn panel_node(&self) -> Option<NodeId> {
        self.session.as_ref().map(|s| s.panel)
    }

    /// Route pointer movement over `target`.
    pub fn handle_pointer_move(&mut self, doc: &mut Document, target: NodeId) {
        if !self.is_active() || self.is_own_node(doc, target) {
            return;
        }
        let Some(info) = ElementInfo::resolve(doc, target) else {
            return;
        };
        let rect = doc.element(target).map(|el| el.rect).unwrap_or_default();

        let session = self.session.as_mut().expect("active session");
        session.hovered = Some(target);
        session.highlight_visible = true;
        let highlight = session.highlight;
        let panel = session.panel;

        if let Some(el) = doc.element_mut(highlight) {
            el.rect = rect;
        }
        doc.set_text(panel, &info.render());
    }

    /// Route pointer-leave: hide, never destroy, the highlight.
    pub fn handle_pointer_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.highlight_visible = false;
        }
    }

    /// Route a captured click: fully suppressed, and pins the selection so
    /// the panel stays focused on the clicked element.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> EventDisposition {
        if !self.is_active() {
            return EventDisposition::default();
        }
        if !self.is_own_node(doc, target) {
            if let Some(session) = self.session.as_mut() {
                session.pinned = Some(target);
            }
        }
        EventDisposition::prevented()
    }

    /// Apply a property edit to the selected element's inline style.
    ///
    /// Fire-and-forget: returns whether an edit landed, but callers are free
    /// to ignore it.
    pub fn update_property(&mut self, doc: &mut Document, property: &str, value: &str) -> bool {
        let Some(target) = self.selected() else {
            return false;
        };
        if !doc.contains(target) {
            return false;
        }
        doc.set_inline_property(target, property, value, false);

        // Keep the panel truthful when it is showing the edited element
        if let Some(info) = ElementInfo::resolve(doc, target) {
            if let Some(panel) = self.panel_node() {
                doc.set_text(panel, &info.render());
            }
        }
        true
    }

    fn is_own_node(&self, doc: &Document, target: NodeId) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        target == session.highlight
            || session.panel == target
            || (doc.contains(session.panel) && doc.is_ancestor_or_self(session.panel, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Rect};

    fn page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_id(div, "hero");
        doc.add_class(div, "card");
        doc.add_class(div, "wide");
        doc.element_mut(div).unwrap().style =
            crate::dom::InlineStyle::parse("color: rgb(1, 2, 3) !important");
        let el = doc.element_mut(div).unwrap();
        el.computed.set("color", "rgb(1, 2, 3)");
        el.computed.set("display", "block");
        el.computed.set("width", "auto");
        el.computed.set("font-weight", "normal");
        el.rect = Rect::new(5.0, 6.0, 100.0, 50.0);
        doc.append_top_level(div);
        (doc, div)
    }

    #[test]
    fn test_element_info_selector() {
        let (doc, div) = page();
        let info = ElementInfo::resolve(&doc, div).unwrap();

        assert_eq!(info.selector(), "div#hero.card.wide");
    }

    #[test]
    fn test_element_info_filters_noise_and_allowlist() {
        let (doc, div) = page();
        let info = ElementInfo::resolve(&doc, div).unwrap();

        // auto and normal values are noise; allow-list order is preserved
        let names: Vec<&str> = info.computed.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["display", "color"]);
        // Computed properties never report important
        assert!(info.computed.iter().all(|p| !p.important));
        // Inline keeps its flag
        assert!(info.inline[0].important);
    }

    #[test]
    fn test_start_creates_one_overlay_and_one_panel() {
        let (mut doc, _) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.start(&mut doc);

        assert_eq!(doc.elements_with_class(HIGHLIGHT_CLASS).len(), 1);
        assert_eq!(doc.elements_with_class(PANEL_CLASS).len(), 1);
        assert_eq!(doc.listeners().len(), 3);
        assert_eq!(doc.cursor(), Some(INSPECT_CURSOR));
    }

    #[test]
    fn test_stop_removes_everything() {
        let (mut doc, _) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.stop(&mut doc);

        assert!(doc.elements_with_class(HIGHLIGHT_CLASS).is_empty());
        assert!(doc.elements_with_class(PANEL_CLASS).is_empty());
        assert!(doc.listeners().is_empty());
        assert_eq!(doc.cursor(), None);

        // Idempotent
        inspector.stop(&mut doc);
        assert!(!inspector.is_active());
    }

    #[test]
    fn test_start_stop_start_leaves_exactly_one_of_each() {
        let (mut doc, _) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.stop(&mut doc);
        inspector.start(&mut doc);

        assert_eq!(doc.elements_with_class(HIGHLIGHT_CLASS).len(), 1);
        assert_eq!(doc.elements_with_class(PANEL_CLASS).len(), 1);
        assert_eq!(doc.listeners().len(), 3);
    }

    #[test]
    fn test_pointer_move_updates_highlight_and_panel() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);

        inspector.handle_pointer_move(&mut doc, div);

        assert!(inspector.highlight_visible());
        let highlight = inspector.highlight_node().unwrap();
        assert_eq!(
            doc.element(highlight).unwrap().rect,
            Rect::new(5.0, 6.0, 100.0, 50.0)
        );
        let panel = inspector.panel_node().unwrap();
        let text = doc.element(panel).unwrap().text().to_string();
        assert!(text.starts_with("div#hero.card.wide"));
        assert!(text.contains("color: rgb(1, 2, 3) !important"));
    }

    #[test]
    fn test_own_nodes_excluded_from_resolution() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.handle_pointer_move(&mut doc, div);

        let panel = inspector.panel_node().unwrap();
        let before = doc.element(panel).unwrap().text().to_string();

        inspector.handle_pointer_move(&mut doc, panel);
        inspector.handle_pointer_move(&mut doc, inspector.highlight_node().unwrap());

        assert_eq!(doc.element(panel).unwrap().text(), before);
        assert_eq!(inspector.selected(), Some(div));
    }

    #[test]
    fn test_pointer_leave_hides_but_keeps_highlight() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.handle_pointer_move(&mut doc, div);

        inspector.handle_pointer_leave();

        assert!(!inspector.highlight_visible());
        assert_eq!(doc.elements_with_class(HIGHLIGHT_CLASS).len(), 1);
    }

    #[test]
    fn test_click_is_suppressed_and_pins() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);

        let disposition = inspector.handle_click(&mut doc, div);

        assert!(disposition.default_prevented);
        assert_eq!(inspector.selected(), Some(div));
    }

    #[test]
    fn test_update_property_mutates_inline_style() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);
        inspector.handle_pointer_move(&mut doc, div);

        assert!(inspector.update_property(&mut doc, "background-color", "rgb(0, 0, 0)"));

        let el = doc.element(div).unwrap();
        assert_eq!(el.style.get("background-color"), Some("rgb(0, 0, 0)"));
        assert_eq!(el.computed.get("background-color"), Some("rgb(0, 0, 0)"));

        // Panel reflects the edit
        let panel = inspector.panel_node().unwrap();
        assert!(doc
            .element(panel)
            .unwrap()
            .text()
            .contains("background-color: rgb(0, 0, 0)"));
    }

    #[test]
    fn test_update_property_without_selection_is_noop() {
        let (mut doc, _) = page();
        let mut inspector = CssInspector::new();
        inspector.start(&mut doc);

        assert!(!inspector.update_property(&mut doc, "color", "red"));
    }

    #[test]
    fn test_inactive_inspector_ignores_events() {
        let (mut doc, div) = page();
        let mut inspector = CssInspector::new();

        inspector.handle_pointer_move(&mut doc, div);
        let disposition = inspector.handle_click(&mut doc, div);

        assert!(!disposition.default_prevented);
        assert_eq!(inspector.selected(), None);
    }
}
