//! The mode controller and request boundary.
//!
//! One [`Engine`] exists per loaded document. It owns both overlay
//! subsystems, routes typed requests to them, and routes native input events
//! to whichever subsystem is active. Mode flags live here, not in globals, so
//! the interaction between the two overlay modes is an explicit policy
//! ([`ModePolicy`]) instead of an accident of shared state.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, ModePolicy};
use crate::dom::{Document, EventDisposition, InputEvent};
use crate::extract::{ColorCollector, ColorValue};
use crate::overlay::{CssInspector, TextEditOverlay};

/// The engine-wide mode, derived from overlay state.
///
/// Under [`ModePolicy::Independent`] both overlays may be active at once; the
/// reported mode is then the one that owns input routing (inspection wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Idle,
    TextEditing,
    CssInspecting,
}

/// A typed request delivered across the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "GET_PAGE_COLORS")]
    GetPageColors,

    #[serde(rename = "ENABLE_TEXT_EDIT_MODE")]
    EnableTextEditMode,

    #[serde(rename = "START_CSS_INSPECTION")]
    StartCssInspection,

    #[serde(rename = "STOP_CSS_INSPECTION")]
    StopCssInspection,

    #[serde(rename = "UPDATE_CSS_PROPERTY")]
    UpdateCssProperty { property: String, value: String },
}

/// A typed response returned across the boundary.
///
/// An empty `colors` array is a valid result, distinct from `Error`, which is
/// reserved for transport-level failure (the engine could not be reached or
/// fed at all).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Colors { colors: Vec<ColorValue> },
    Ack { status: String },
    Error { error: String },
}

impl Response {
    pub fn ack(status: impl Into<String>) -> Self {
        Response::Ack {
            status: status.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            error: message.into(),
        }
    }
}

/// The per-document engine instance.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    text_edit: TextEditOverlay,
    inspector: CssInspector,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            text_edit: TextEditOverlay::new(),
            inspector: CssInspector::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn text_edit(&self) -> &TextEditOverlay {
        &self.text_edit
    }

    pub fn inspector(&self) -> &CssInspector {
        &self.inspector
    }

    /// The current engine mode.
    pub fn mode(&self) -> ModeState {
        if self.inspector.is_active() {
            ModeState::CssInspecting
        } else if self.text_edit.is_enabled() {
            ModeState::TextEditing
        } else {
            ModeState::Idle
        }
    }

    /// Dispatch one request against the document and produce its response.
    pub fn dispatch(&mut self, doc: &mut Document, request: Request) -> Response {
        match request {
            Request::GetPageColors => {
                let collector = ColorCollector {
                    scan: self.config.scan_config(),
                    sampler: self.config.sampler_config(),
                };
                Response::Colors {
                    colors: collector.collect(doc),
                }
            }
            Request::EnableTextEditMode => {
                if self.config.mode_policy == ModePolicy::Exclusive {
                    self.inspector.stop(doc);
                }
                self.text_edit.enable(doc, &self.config.text_edit_config());
                if self.inspector.is_active() {
                    // Inspection owns clicks; text edit waits until it stops
                    self.text_edit.suspend(doc);
                } else {
                    // A prior suspension must not survive re-enabling
                    self.text_edit.resume(doc);
                }
                Response::ack("text-edit-mode-enabled")
            }
            Request::StartCssInspection => {
                if self.config.mode_policy == ModePolicy::Exclusive {
                    self.text_edit.suspend(doc);
                }
                self.inspector.start(doc);
                Response::ack("css-inspection-started")
            }
            Request::StopCssInspection => {
                self.inspector.stop(doc);
                self.text_edit.resume(doc);
                Response::ack("css-inspection-stopped")
            }
            Request::UpdateCssProperty { property, value } => {
                // Fire-and-forget by contract; the ack is a courtesy
                self.inspector.update_property(doc, &property, &value);
                Response::ack("css-property-updated")
            }
        }
    }

    /// Route a native input event to the active subsystem.
    ///
    /// While inspecting, the inspector consumes clicks outright so that
    /// inspection never triggers page navigation or a text-edit session.
    pub fn handle_event(&mut self, doc: &mut Document, event: InputEvent) -> EventDisposition {
        match event {
            InputEvent::PointerMove { target } => {
                self.inspector.handle_pointer_move(doc, target);
                EventDisposition::default()
            }
            InputEvent::PointerLeave => {
                self.inspector.handle_pointer_leave();
                EventDisposition::default()
            }
            InputEvent::Click { target } => {
                if self.inspector.is_active() {
                    return self.inspector.handle_click(doc, target);
                }
                self.text_edit.handle_click(doc, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, EventKind, NodeId};
    use crate::overlay::{EDITABLE_MARKER_CLASS, HIGHLIGHT_CLASS, PANEL_CLASS};
    use pretty_assertions::assert_eq;

    fn single_div_page() -> (Document, NodeId) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.element_mut(div)
            .unwrap()
            .computed
            .set("color", "rgb(1, 2, 3)");
        doc.append_top_level(div);
        (doc, div)
    }

    #[test]
    fn test_get_page_colors_single_div() {
        let (mut doc, _) = single_div_page();
        let mut engine = Engine::default();

        let response = engine.dispatch(&mut doc, Request::GetPageColors);

        assert_eq!(
            response,
            Response::Colors {
                colors: vec![ColorValue::rgb(1, 2, 3)]
            }
        );
    }

    #[test]
    fn test_get_page_colors_empty_page_is_valid() {
        let mut doc = Document::new();
        let mut engine = Engine::default();

        let response = engine.dispatch(&mut doc, Request::GetPageColors);

        assert_eq!(response, Response::Colors { colors: vec![] });
    }

    #[test]
    fn test_get_page_colors_survives_broken_image() {
        let (mut doc, _) = single_div_page();
        let img = doc.create_element("img");
        doc.append_top_level(img);
        doc.element_mut(img).unwrap().src = Some("/nonexistent/banner.png".to_string());
        let mut engine = Engine::default();

        let response = engine.dispatch(&mut doc, Request::GetPageColors);

        assert_eq!(
            response,
            Response::Colors {
                colors: vec![ColorValue::rgb(1, 2, 3)]
            }
        );
    }

    #[test]
    fn test_mode_transitions() {
        let (mut doc, _) = single_div_page();
        let mut engine = Engine::default();
        assert_eq!(engine.mode(), ModeState::Idle);

        engine.dispatch(&mut doc, Request::EnableTextEditMode);
        assert_eq!(engine.mode(), ModeState::TextEditing);

        engine.dispatch(&mut doc, Request::StartCssInspection);
        assert_eq!(engine.mode(), ModeState::CssInspecting);

        engine.dispatch(&mut doc, Request::StopCssInspection);
        assert_eq!(engine.mode(), ModeState::TextEditing);
    }

    #[test]
    fn test_enable_text_edit_is_idempotent_through_dispatch() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_top_level(p);
        let mut engine = Engine::default();

        engine.dispatch(&mut doc, Request::EnableTextEditMode);
        engine.dispatch(&mut doc, Request::EnableTextEditMode);

        assert_eq!(doc.listeners().count(EventKind::Click), 1);
        assert_eq!(doc.element(p).unwrap().classes().len(), 1);
        assert!(doc.element(p).unwrap().has_class(EDITABLE_MARKER_CLASS));
    }

    #[test]
    fn test_start_stop_start_inspection_node_counts() {
        let (mut doc, _) = single_div_page();
        let mut engine = Engine::default();

        engine.dispatch(&mut doc, Request::StartCssInspection);
        engine.dispatch(&mut doc, Request::StartCssInspection);
        engine.dispatch(&mut doc, Request::StopCssInspection);
        engine.dispatch(&mut doc, Request::StartCssInspection);

        assert_eq!(doc.elements_with_class(HIGHLIGHT_CLASS).len(), 1);
        assert_eq!(doc.elements_with_class(PANEL_CLASS).len(), 1);
    }

    #[test]
    fn test_inspection_consumes_clicks_over_text_edit() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.set_text(p, "hello");
        doc.append_top_level(p);
        let mut engine = Engine::default();

        engine.dispatch(&mut doc, Request::EnableTextEditMode);
        engine.dispatch(&mut doc, Request::StartCssInspection);

        let disposition = engine.handle_event(&mut doc, InputEvent::Click { target: p });

        assert!(disposition.default_prevented);
        // No editor opened while inspecting
        assert!(engine.text_edit().active_session().is_none());

        // Once inspection stops, the same click opens an editor
        engine.dispatch(&mut doc, Request::StopCssInspection);
        engine.handle_event(&mut doc, InputEvent::Click { target: p });
        assert!(engine.text_edit().active_session().is_some());
    }

    #[test]
    fn test_exclusive_policy_suspends_text_edit() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.append_top_level(p);
        let config = EngineConfig {
            mode_policy: ModePolicy::Exclusive,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config);

        engine.dispatch(&mut doc, Request::EnableTextEditMode);
        engine.dispatch(&mut doc, Request::StartCssInspection);

        // Only the inspector's listeners remain
        assert_eq!(doc.listeners().len(), 3);

        engine.dispatch(&mut doc, Request::StopCssInspection);
        assert!(engine.text_edit().is_listening());
        assert_eq!(doc.listeners().count(EventKind::Click), 1);
    }

    #[test]
    fn test_reenable_text_edit_after_exclusive_inspection() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.set_text(p, "hello");
        doc.append_top_level(p);
        let config = EngineConfig {
            mode_policy: ModePolicy::Exclusive,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(config);

        engine.dispatch(&mut doc, Request::EnableTextEditMode);
        engine.dispatch(&mut doc, Request::StartCssInspection);
        engine.dispatch(&mut doc, Request::EnableTextEditMode);

        // Inspection is gone and text edit is listening again
        assert!(!engine.inspector().is_active());
        assert_eq!(engine.mode(), ModeState::TextEditing);
        assert_eq!(doc.listeners().count(EventKind::Click), 1);

        // Clicks on marked elements open an editor as in a fresh enable
        let disposition = engine.handle_event(&mut doc, InputEvent::Click { target: p });
        assert!(disposition.default_prevented);
        assert!(engine.text_edit().active_session().is_some());
    }

    #[test]
    fn test_update_css_property_through_dispatch() {
        let (mut doc, div) = single_div_page();
        let mut engine = Engine::default();
        engine.dispatch(&mut doc, Request::StartCssInspection);
        engine.handle_event(&mut doc, InputEvent::PointerMove { target: div });
        engine.handle_event(&mut doc, InputEvent::Click { target: div });

        engine.dispatch(
            &mut doc,
            Request::UpdateCssProperty {
                property: "color".to_string(),
                value: "rgb(7, 7, 7)".to_string(),
            },
        );

        assert_eq!(
            doc.element(div).unwrap().style.get("color"),
            Some("rgb(7, 7, 7)")
        );
    }

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_str(r#"{"type": "GET_PAGE_COLORS"}"#).unwrap();
        assert_eq!(request, Request::GetPageColors);

        let request: Request = serde_json::from_str(
            r#"{"type": "UPDATE_CSS_PROPERTY", "property": "color", "value": "red"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::UpdateCssProperty {
                property: "color".to_string(),
                value: "red".to_string(),
            }
        );
    }

    #[test]
    fn test_response_wire_format() {
        let response = Response::Colors {
            colors: vec![ColorValue::rgb(1, 2, 3)],
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"colors":["rgb(1, 2, 3)"]}"#
        );

        let response = Response::error("Could not connect to the page");
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"error":"Could not connect to the page"}"#
        );
    }

    #[test]
    fn test_pointer_events_route_to_inspector() {
        let (mut doc, div) = single_div_page();
        let mut engine = Engine::default();
        engine.dispatch(&mut doc, Request::StartCssInspection);

        engine.handle_event(&mut doc, InputEvent::PointerMove { target: div });
        assert!(engine.inspector().highlight_visible());

        engine.handle_event(&mut doc, InputEvent::PointerLeave);
        assert!(!engine.inspector().highlight_visible());
    }
}
