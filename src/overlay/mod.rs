//! Floating overlay subsystems: in-place text editing and CSS inspection.
//!
//! Every node an overlay creates is removed on its stop transition, and
//! re-entering an already-active state never duplicates listeners or nodes.

pub mod inspector;
pub mod text_edit;

pub use inspector::{
    CssInspector, ElementInfo, COMPUTED_ALLOWLIST, HIGHLIGHT_CLASS, INSPECT_CURSOR,
    PANEL_CLASS, PANEL_PLACEHOLDER,
};
pub use text_edit::{
    EditorSession, TextEditConfig, TextEditOverlay, TextEditState, DEFAULT_EDITABLE_TAGS,
    EDITABLE_MARKER_CLASS, EDITOR_CLASS,
};
