//! In-place text editing.
//!
//! Once enabled, every text-bearing element is tagged with a marker class and
//! a single capturing click listener waits for a click on a tagged element.
//! That click opens a floating editor bound to the element, positioned just
//! below its bounding box. At most one editor exists at a time: saving,
//! closing, clicking outside, or retargeting onto another tagged element all
//! tear the current one down first.
//!
//! Enabling has no inverse in this design: marker classes stay until the
//! document is discarded. Enabling twice is a no-op.

use crate::dom::{Document, EventDisposition, EventKind, ListenerId, NodeId, Rect};

/// Marker class applied to editable elements.
pub const EDITABLE_MARKER_CLASS: &str = "loupe-editable";

/// Class carried by the floating editor container.
pub const EDITOR_CLASS: &str = "loupe-editor";

/// Tags considered text-bearing by default.
pub const DEFAULT_EDITABLE_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "a", "span", "li", "button", "label",
];

/// Vertical gap between a target and its editor.
const EDITOR_GAP: f64 = 5.0;

/// Minimum editor width.
const EDITOR_MIN_WIDTH: f64 = 220.0;

const EDITOR_HEIGHT: f64 = 40.0;

/// Configuration for text-edit mode.
#[derive(Debug, Clone)]
pub struct TextEditConfig {
    /// Tag allow-list for editable elements.
    pub tags: Vec<String>,
}

impl Default for TextEditConfig {
    fn default() -> Self {
        Self {
            tags: DEFAULT_EDITABLE_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// The observable state of text-edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditState {
    Disabled,
    EnabledNoSession,
    EnabledEditing,
}

/// The floating editor bound to one target element.
#[derive(Debug, Clone, Copy)]
pub struct EditorSession {
    pub target: NodeId,
    pub container: NodeId,
    pub input: NodeId,
    pub save_button: NodeId,
    pub close_button: NodeId,
}

/// Text-edit overlay state machine.
#[derive(Debug, Default)]
pub struct TextEditOverlay {
    enabled: bool,
    click_listener: Option<ListenerId>,
    session: Option<EditorSession>,
}

impl TextEditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TextEditState {
        match (self.enabled, &self.session) {
            (false, _) => TextEditState::Disabled,
            (true, None) => TextEditState::EnabledNoSession,
            (true, Some(_)) => TextEditState::EnabledEditing,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The open editor, if any.
    pub fn active_session(&self) -> Option<&EditorSession> {
        self.session.as_ref()
    }

    /// Enable text-edit mode. Idempotent: a second call changes nothing.
    ///
    /// Tags every element whose tag is in the allow-list and installs one
    /// capturing click listener.
    pub fn enable(&mut self, doc: &mut Document, config: &TextEditConfig) {
        if self.enabled {
            return;
        }
        self.enabled = true;

        for id in doc.elements() {
            let eligible = doc
                .element(id)
                .is_some_and(|el| config.tags.iter().any(|t| *t == el.tag));
            if eligible {
                doc.add_class(id, EDITABLE_MARKER_CLASS);
            }
        }

        self.click_listener = Some(doc.install_listener(EventKind::Click, true));
    }

    /// Remove the click listener and any open editor, keeping the mode
    /// enabled so it can be resumed. Used when another mode takes over input.
    pub fn suspend(&mut self, doc: &mut Document) {
        self.close_session(doc, false);
        if let Some(id) = self.click_listener.take() {
            doc.remove_listener(id);
        }
    }

    /// Reinstall the click listener after a suspend. No-op when disabled or
    /// already listening.
    pub fn resume(&mut self, doc: &mut Document) {
        if self.enabled && self.click_listener.is_none() {
            self.click_listener = Some(doc.install_listener(EventKind::Click, true));
        }
    }

    /// Whether this overlay currently captures clicks.
    pub fn is_listening(&self) -> bool {
        self.click_listener.is_some()
    }

    /// Route a captured click.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> EventDisposition {
        if !self.enabled || self.click_listener.is_none() {
            return EventDisposition::default();
        }

        if let Some(session) = self.session {
            if target == session.save_button {
                self.close_session(doc, true);
                return EventDisposition::prevented();
            }
            if target == session.close_button {
                self.close_session(doc, false);
                return EventDisposition::prevented();
            }
            if doc.contains(session.container)
                && doc.is_ancestor_or_self(session.container, target)
            {
                // Clicks inside the editor surface are the user's own
                return EventDisposition::default();
            }
            if is_marked(doc, target) {
                // Retarget: the old session's edits are discarded
                self.close_session(doc, false);
                self.open_session(doc, target);
                return EventDisposition::prevented();
            }
            self.close_session(doc, false);
            return EventDisposition::default();
        }

        if is_marked(doc, target) {
            self.open_session(doc, target);
            return EventDisposition::prevented();
        }
        EventDisposition::default()
    }

    /// Build a floating editor below the target and bind it. The target's
    /// viewport rect is converted to document coordinates via the scroll
    /// offset, since the editor scrolls with the page.
    fn open_session(&mut self, doc: &mut Document, target: NodeId) {
        self.close_session(doc, false);
        let Some(element) = doc.element(target) else {
            return;
        };
        let target_rect = element.rect;
        let text = element.text().to_string();
        let scroll = doc.scroll;

        let container = doc.create_element("div");
        doc.add_class(container, EDITOR_CLASS);
        if let Some(el) = doc.element_mut(container) {
            el.rect = Rect::new(
                target_rect.x + scroll.x,
                target_rect.bottom() + EDITOR_GAP + scroll.y,
                target_rect.width.max(EDITOR_MIN_WIDTH),
                EDITOR_HEIGHT,
            );
        }

        let input = doc.create_element("input");
        doc.set_text(input, &text);
        let save_button = doc.create_element("button");
        doc.set_text(save_button, "Save");
        let close_button = doc.create_element("button");
        doc.set_text(close_button, "Close");

        doc.append_top_level(container);
        doc.append_child(container, input);
        doc.append_child(container, save_button);
        doc.append_child(container, close_button);

        self.session = Some(EditorSession {
            target,
            container,
            input,
            save_button,
            close_button,
        });
    }

    /// Tear down the editor, optionally committing the input text back into
    /// the target. Safe when no session is open.
    fn close_session(&mut self, doc: &mut Document, save: bool) {
        let Some(session) = self.session.take() else {
            return;
        };

        if save && doc.contains(session.target) {
            let text = doc
                .element(session.input)
                .map(|el| el.text().to_string())
                .unwrap_or_default();
            doc.set_text(session.target, &text);
        }

        doc.remove(session.container);
    }
}

fn is_marked(doc: &Document, id: NodeId) -> bool {
    doc.element(id)
        .is_some_and(|el| el.has_class(EDITABLE_MARKER_CLASS))
}
