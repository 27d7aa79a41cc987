//! The in-memory document model.
//!
//! An arena of elements with tree structure, the substrate every engine
//! subsystem works against. Elements carry tag/id/class, inline and computed
//! style, text content, a bounding rectangle in viewport coordinates, and
//! (for `img` elements) a source reference resolvable against the document
//! base path.
//!
//! Node handles stay stable across mutation; operating on a removed node is a
//! no-op rather than a fault.

use std::path::{Path, PathBuf};

use super::event::{EventKind, ListenerId, ListenerRegistry};
use super::style::{ComputedStyle, InlineStyle};

/// Handle to an element in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// An axis-aligned bounding rectangle in viewport coordinates, as a
/// bounding-box query reports them. Add the document scroll offset to get
/// document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge y coordinate.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// The viewport scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// A single element in the document.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    classes: Vec<String>,
    pub style: InlineStyle,
    pub computed: ComputedStyle,
    text: Option<String>,
    pub src: Option<String>,
    pub rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            style: InlineStyle::new(),
            computed: ComputedStyle::new(),
            text: None,
            src: None,
            rect: Rect::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Ordered class list.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Text content, empty when the element carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The inspected document: element arena plus document-level state.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    roots: Vec<NodeId>,
    pub scroll: ScrollOffset,
    base: Option<PathBuf>,
    listeners: ListenerRegistry,
    cursor: Option<String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base path image sources resolve against.
    pub fn set_base(&mut self, base: impl Into<PathBuf>) {
        self.base = Some(base.into());
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element::new(tag)));
        id
    }

    /// Append a detached element as a child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) {
            return;
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Append a detached element at the top level of the document.
    pub fn append_top_level(&mut self, id: NodeId) {
        if self.contains(id) && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Detach and destroy an element and its whole subtree.
    ///
    /// Safe to call on an already-removed handle.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.contains(id) {
            return false;
        }

        // Unlink from parent or the root list
        if let Some(parent) = self.node(id).and_then(|n| n.parent) {
            if let Some(p) = self.node_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        } else {
            self.roots.retain(|r| *r != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes[next.0].take() {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Whether the handle refers to a live element.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|slot| slot.is_some())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.node_mut(id)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every live element in document (preorder) order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Every element carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Every `img` element, in document order.
    pub fn images(&self) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| n.tag == "img"))
            .collect()
    }

    /// First element with the given id attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|n| self.node(*n).is_some_and(|e| e.id.as_deref() == Some(id)))
    }

    /// First element with the given tag, in document order.
    pub fn find_first_tag(&self, tag: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|n| self.node(*n).is_some_and(|e| e.tag == tag))
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }

    /// Add a class to an element, once.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.has_class(class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    pub fn set_id(&mut self, id: NodeId, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.id = Some(value.to_string());
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.node_mut(id) {
            node.text = Some(text.to_string());
        }
    }

    /// Set an inline property and mirror it into the computed map, since an
    /// inline declaration wins style resolution for that property.
    pub fn set_inline_property(&mut self, id: NodeId, name: &str, value: &str, important: bool) {
        if let Some(node) = self.node_mut(id) {
            node.style.set(name, value, important);
            node.computed.set(name, value);
        }
    }

    /// Resolve an `img` element's source against the document base path.
    pub fn resolve_src(&self, id: NodeId) -> Option<PathBuf> {
        let src = self.node(id)?.src.as_deref()?;
        Some(match self.base() {
            Some(base) => base.join(src),
            None => PathBuf::from(src),
        })
    }

    /// Install a capturing document-level listener registration.
    pub fn install_listener(&mut self, kind: EventKind, capturing: bool) -> ListenerId {
        self.listeners.install(kind, capturing)
    }

    /// Remove a listener registration; safe on a stale handle.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Set or clear the document-wide cursor affordance.
    pub fn set_cursor(&mut self, cursor: Option<&str>) {
        self.cursor = cursor.map(|c| c.to_string());
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn node(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }
}
