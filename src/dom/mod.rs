//! In-memory document model: element arena, styles, events, snapshots.

pub mod document;
pub mod event;
pub mod snapshot;
pub mod style;

pub use document::{Document, Element, NodeId, Rect, ScrollOffset};
pub use event::{EventDisposition, EventKind, InputEvent, ListenerId, ListenerRegistry};
pub use snapshot::{ElementSnapshot, PageSnapshot};
pub use style::{ComputedStyle, InlineStyle, StyleProperty};
