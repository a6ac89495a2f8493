//! The forest: an arena of nodes plus the ordered root sequence.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::TreeError;
use crate::identifier::Identifier;

use super::flat::FlatNode;
use super::item::{NodeId, TreeItem};
use super::node::TreeNode;

/// An ordered forest of [`TreeItem`]s with identity-based lookup.
///
/// Nodes live in an arena addressed by [`NodeId`]; parents own their children
/// through handle lists and children refer back with a plain handle, so there
/// is exactly one owner per node and no reference cycles.
///
/// Every node sits behind its own [`Arc`]. Cloning a collection is shallow, and
/// changing a node's flags through the store copies only that node; untouched
/// nodes stay shared with the previous snapshot (see [`TreeItems::shares_node`]).
pub struct TreeItems<T> {
    identifier: Identifier<T>,
    nodes: Vec<Arc<TreeItem<T>>>,
    roots: Vec<NodeId>,
    /// Key → first node in document order. Clones share it until one of them
    /// changes structure; flag changes never alter keys, so store snapshots
    /// keep sharing it.
    index: Arc<OnceLock<HashMap<String, NodeId>>>,
}

impl<T> TreeItems<T> {
    /// Create an empty forest.
    pub fn new(identifier: Identifier<T>) -> Self {
        Self {
            identifier,
            nodes: Vec::new(),
            roots: Vec::new(),
            index: Arc::new(OnceLock::new()),
        }
    }

    /// The key function used for lookups.
    pub fn identifier(&self) -> &Identifier<T> {
        &self.identifier
    }

    /// Compute the lookup key of a value.
    pub fn key(&self, value: &T) -> String {
        self.identifier.key(value)
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Store a detached node and return its handle.
    ///
    /// The node is not part of the forest until it is [added](Self::add) as a
    /// root or [attached](Self::add_child) to another node.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX + 1` nodes.
    pub fn insert(&mut self, item: TreeItem<T>) -> NodeId {
        let Some(id) = NodeId::try_new(self.nodes.len()) else {
            panic!("node arena is full ({} nodes)", self.nodes.len());
        };
        let mut item = item;
        item.parent = None;
        item.children.clear();
        self.nodes.push(Arc::new(item));
        id
    }

    /// Append a node to the root sequence.
    ///
    /// Returns whether the root sequence changed. Unknown handles, nodes that
    /// already have a parent and nodes that already are roots are rejected.
    pub fn add(&mut self, id: NodeId) -> bool {
        let Some(item) = self.item(id) else {
            log::warn!("Rejected root {}: unknown node", id);
            return false;
        };
        if let Some(parent) = item.parent {
            log::warn!("Rejected root {}: already a child of {}", id, parent);
            return false;
        }
        if self.roots.contains(&id) {
            log::debug!("Rejected root {}: already a root", id);
            return false;
        }
        self.roots.push(id);
        self.invalidate_index();
        true
    }

    /// Insert a node and append it to the root sequence in one step.
    pub fn push(&mut self, item: TreeItem<T>) -> NodeId {
        let id = self.insert(item);
        self.roots.push(id);
        self.invalidate_index();
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Nodes are never detached implicitly: a child that already has a parent,
    /// or that already is a root, is refused, as is any attachment that would
    /// make a node its own ancestor.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let child_item = self.item(child).ok_or(TreeError::UnknownNode(child))?;
        if self.item(parent).is_none() {
            return Err(TreeError::UnknownNode(parent));
        }
        if let Some(current) = child_item.parent {
            return Err(TreeError::AlreadyAttached {
                child,
                parent: current,
            });
        }
        if self.roots.contains(&child) {
            return Err(TreeError::AlreadyRoot(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }
        self.link(parent, child);
        Ok(())
    }

    /// Wire a freshly finalized subtree under `parent`.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.index()].parent.is_none(),
            "node {child} attached twice"
        );
        Arc::make_mut(&mut self.nodes[child.index()]).parent = Some(parent);
        Arc::make_mut(&mut self.nodes[parent.index()])
            .children
            .push(child);
        self.invalidate_index();
    }

    /// Check whether `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = self.item(id).and_then(|item| item.parent);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.item(current).and_then(|item| item.parent);
        }
        false
    }

    /// Forget the key index after a structural change.
    ///
    /// A shared index is never cleared in place: other clones may still rely
    /// on it, and an unset one would be filled from whichever clone looks up
    /// first.
    fn invalidate_index(&mut self) {
        match Arc::get_mut(&mut self.index) {
            Some(index) => {
                index.take();
            }
            None => self.index = Arc::new(OnceLock::new()),
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Number of nodes stored, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the forest has no roots.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Root handles in order.
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Root nodes in order.
    pub fn roots(&self) -> impl Iterator<Item = TreeNode<'_, T>> + '_ {
        self.roots.iter().filter_map(|&id| self.get(id))
    }

    /// Borrow a node.
    pub fn get(&self, id: NodeId) -> Option<TreeNode<'_, T>> {
        self.item(id).map(|item| TreeNode::new(self, id, item))
    }

    /// Borrow a node's stored data.
    pub fn item(&self, id: NodeId) -> Option<&TreeItem<T>> {
        self.nodes.get(id.index()).map(Arc::as_ref)
    }

    /// All nodes reachable from the roots, depth-first and pre-order.
    pub fn iter(&self) -> impl Iterator<Item = TreeNode<'_, T>> + '_ {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            let node = self.get(id)?;
            stack.extend(node.item().children().iter().rev());
            Some(node)
        })
    }

    /// Selected nodes in document order.
    pub fn selected(&self) -> Vec<TreeNode<'_, T>> {
        self.iter().filter(|node| node.selected()).collect()
    }

    /// Check whether `self` and `other` hold the very same allocation for `id`.
    ///
    /// After a store mutation, only the nodes whose flags changed differ.
    pub fn shares_node(&self, other: &Self, id: NodeId) -> bool {
        match (self.nodes.get(id.index()), other.nodes.get(id.index())) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Find the node whose key matches the key of `value`.
    ///
    /// Searches the whole forest depth-first in root order; the first match in
    /// document order wins.
    pub fn find(&self, value: &T) -> Option<TreeNode<'_, T>> {
        self.find_key(&self.key(value))
    }

    /// Find the first node, in document order, with the given key.
    pub fn find_key(&self, key: &str) -> Option<TreeNode<'_, T>> {
        self.find_id(key).and_then(|id| self.get(id))
    }

    /// Handle of the first node, in document order, with the given key.
    pub fn find_id(&self, key: &str) -> Option<NodeId> {
        self.index
            .get_or_init(|| self.build_index())
            .get(key)
            .copied()
    }

    fn build_index(&self) -> HashMap<String, NodeId> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for node in self.iter() {
            index.entry(node.key()).or_insert(node.id());
        }
        index
    }

    // -------------------------------------------------------------------------
    // Visible rows
    // -------------------------------------------------------------------------

    /// Flatten the forest into the rows a renderer shows.
    ///
    /// Pre-order; descends only into nodes that have children and are expanded.
    pub fn visible(&self) -> Vec<FlatNode> {
        let mut out = Vec::new();
        self.collect_visible(&self.roots, 0, &mut out);
        out
    }

    fn collect_visible(&self, ids: &[NodeId], depth: u16, out: &mut Vec<FlatNode>) {
        for &id in ids {
            let Some(item) = self.item(id) else { continue };
            let has_children = item.has_children();
            let expanded = has_children && item.is_expanded();
            out.push(FlatNode {
                id,
                depth,
                has_children,
                expanded,
                selected: item.is_selected(),
            });
            if expanded {
                self.collect_visible(item.children(), depth + 1, out);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Copy-on-write updates (store only)
    // -------------------------------------------------------------------------

    /// Mutate one node, copying it first if a snapshot still shares it.
    pub(crate) fn update(&mut self, id: NodeId, f: impl FnOnce(&mut TreeItem<T>)) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) => {
                f(Arc::make_mut(node));
                true
            }
            None => false,
        }
    }
}

impl<T> Clone for TreeItems<T> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            nodes: self.nodes.clone(),
            roots: self.roots.clone(),
            index: Arc::clone(&self.index),
        }
    }
}

impl<T: fmt::Display + 'static> Default for TreeItems<T> {
    fn default() -> Self {
        Self::new(Identifier::from_display())
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeItems<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeItems")
            .field("roots", &self.roots)
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}
