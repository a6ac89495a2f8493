//! Stored node data and the handles that address it.

use std::fmt;
use std::sync::Arc;

/// Handle of a node inside a [`TreeItems`](super::TreeItems) arena.
///
/// Handles stay valid across every store mutation that keeps the structure,
/// so a renderer can hold on to them between notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Handle for an arena slot, or `None` past the last addressable one.
    pub(crate) fn try_new(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Rendering hook attached to a node.
///
/// The tree never calls it; it is carried along for the rendering layer,
/// which decides what the returned glyph or icon name means.
#[derive(Clone)]
pub struct Icon(Arc<dyn Fn() -> String + Send + Sync>);

impl Icon {
    /// Create an icon from a render callback.
    pub fn new(render: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    /// An icon that always renders the same name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move || name.clone())
    }

    /// Invoke the hook.
    pub fn render(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Icon").field(&self.render()).finish()
    }
}

/// A single node: a domain value plus its flags and structural links.
///
/// The value is shared behind an [`Arc`], so copying a node when one of its
/// flags changes never clones the payload.
pub struct TreeItem<T> {
    value: Arc<T>,
    expanded: bool,
    selected: bool,
    icon: Option<Icon>,
    expanded_icon: Option<Icon>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl<T> TreeItem<T> {
    /// Create a detached node. Nodes start expanded and unselected.
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
            expanded: true,
            selected: false,
            icon: None,
            expanded_icon: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Set the initial expansion flag.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Set the initial selection flag.
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the icon shown while collapsed (or always, without an expanded icon).
    pub fn with_icon(mut self, icon: Option<Icon>) -> Self {
        self.icon = icon;
        self
    }

    /// Set the icon shown while expanded.
    pub fn with_expanded_icon(mut self, icon: Option<Icon>) -> Self {
        self.expanded_icon = icon;
        self
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn expanded_icon(&self) -> Option<&Icon> {
        self.expanded_icon.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion (render) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

impl<T> Clone for TreeItem<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            expanded: self.expanded,
            selected: self.selected,
            icon: self.icon.clone(),
            expanded_icon: self.expanded_icon.clone(),
            parent: self.parent,
            children: self.children.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeItem")
            .field("value", &self.value)
            .field("expanded", &self.expanded)
            .field("selected", &self.selected)
            .field("icon", &self.icon)
            .field("expanded_icon", &self.expanded_icon)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}
