//! Borrowed view of a node inside a forest.

use std::fmt;

use crate::id;

use super::item::{Icon, NodeId, TreeItem};
use super::items::TreeItems;

/// A node together with the forest it lives in.
///
/// This is what the rendering layer reads: the value, the flags, and the
/// links to parent and children. It cannot change anything; flag changes go
/// through [`TreeStore`](crate::TreeStore).
pub struct TreeNode<'a, T> {
    items: &'a TreeItems<T>,
    id: NodeId,
    item: &'a TreeItem<T>,
}

impl<'a, T> TreeNode<'a, T> {
    pub(crate) fn new(items: &'a TreeItems<T>, id: NodeId, item: &'a TreeItem<T>) -> Self {
        Self { items, id, item }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a T {
        self.item.value()
    }

    /// The stored node data.
    pub fn item(&self) -> &'a TreeItem<T> {
        self.item
    }

    /// Whether children are revealed. Only meaningful when [`has_children`](Self::has_children).
    pub fn expanded(&self) -> bool {
        self.item.is_expanded()
    }

    pub fn selected(&self) -> bool {
        self.item.is_selected()
    }

    pub fn has_children(&self) -> bool {
        self.item.has_children()
    }

    pub fn has_parent(&self) -> bool {
        self.item.has_parent()
    }

    pub fn parent(&self) -> Option<TreeNode<'a, T>> {
        self.item.parent().and_then(|id| self.items.get(id))
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = TreeNode<'a, T>> + use<'a, T> {
        let items = self.items;
        self.item
            .children()
            .iter()
            .filter_map(move |&id| items.get(id))
    }

    /// Number of ancestors (0 for roots).
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |node| node.parent()).count()
    }

    pub fn icon(&self) -> Option<&'a Icon> {
        self.item.icon()
    }

    pub fn expanded_icon(&self) -> Option<&'a Icon> {
        self.item.expanded_icon()
    }

    /// The icon matching the node's current state.
    ///
    /// Expanded nodes with children prefer the expanded icon.
    pub fn current_icon(&self) -> Option<&'a Icon> {
        if self.has_children() && self.expanded() {
            self.expanded_icon().or_else(|| self.icon())
        } else {
            self.icon()
        }
    }

    /// Lookup key of this node's value.
    pub fn key(&self) -> String {
        self.items.key(self.value())
    }

    /// Key that changes whenever the node's flags change.
    ///
    /// Renderers key their per-node output on this so that expanding or
    /// selecting a node forces that subtree to be redrawn.
    pub fn render_key(&self) -> String {
        let key = self.key();
        let expanded = self.expanded().to_string();
        let selected = self.selected().to_string();
        id::build(&key, &["exp", &expanded, "sel", &selected])
    }

    /// Depth-first, pre-order search of this subtree, self included.
    ///
    /// The first match in insertion order wins.
    pub fn find(&self, key: &str) -> Option<TreeNode<'a, T>> {
        if self.key() == key {
            return Some(*self);
        }
        self.children().find_map(|child| child.find(key))
    }

    /// Like [`find`](Self::find), keyed by a value.
    pub fn find_value(&self, value: &T) -> Option<TreeNode<'a, T>> {
        self.find(&self.items.key(value))
    }

    /// Check `predicate` over this subtree.
    ///
    /// Children are only visited when their parent passed, and the walk stops
    /// at the first failing node.
    pub fn all(&self, mut predicate: impl FnMut(&TreeNode<'a, T>) -> bool) -> bool {
        self.all_inner(&mut predicate)
    }

    fn all_inner(&self, predicate: &mut dyn FnMut(&TreeNode<'a, T>) -> bool) -> bool {
        predicate(self) && self.children().all(|child| child.all_inner(&mut *predicate))
    }
}

impl<T> Clone for TreeNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TreeNode<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for TreeNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNode")
            .field("id", &self.id)
            .field("value", self.value())
            .field("expanded", &self.expanded())
            .field("selected", &self.selected())
            .field("children", &self.item.children())
            .finish()
    }
}
