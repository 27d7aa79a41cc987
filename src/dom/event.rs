//! Input events and the capturing-listener registry.
//!
//! Overlay subsystems register interest in document-level events; the engine
//! routes synthesized input events to whichever subsystems hold a live
//! registration. Counting registrations is how idempotence is verified: an
//! already-active subsystem must never hold two registrations for the same
//! event.

use std::collections::BTreeMap;
use std::fmt;

use super::document::NodeId;

/// The kind of document-level event a listener can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerMove,
    PointerLeave,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::PointerMove => "pointermove",
            EventKind::PointerLeave => "pointerleave",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A synthesized input event delivered to the engine.
///
/// Targets are explicit, like `event.target` in a real event: hit-testing is
/// the host's job, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click { target: NodeId },
    PointerMove { target: NodeId },
    PointerLeave,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Click { .. } => EventKind::Click,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::PointerLeave => EventKind::PointerLeave,
        }
    }
}

/// What happened to an event after routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventDisposition {
    /// The native action of the event was suppressed (link navigation, form
    /// submission, button activation).
    pub default_prevented: bool,
}

impl EventDisposition {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }
}

/// Handle for an installed listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Registration {
    kind: EventKind,
    capturing: bool,
}

/// Registry of document-level listener registrations.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    registrations: BTreeMap<ListenerId, Registration>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener registration and return its handle.
    pub fn install(&mut self, kind: EventKind, capturing: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.insert(id, Registration { kind, capturing });
        id
    }

    /// Remove a registration. Safe to call with an already-removed handle.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.registrations.remove(&id).is_some()
    }

    /// Whether a registration exists and captures, by handle.
    pub fn is_capturing(&self, id: ListenerId) -> Option<bool> {
        self.registrations.get(&id).map(|r| r.capturing)
    }

    /// Count live registrations for an event kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.registrations.values().filter(|r| r.kind == kind).count()
    }

    /// Total live registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
