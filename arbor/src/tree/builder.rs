//! Declarative construction of a forest.
//!
//! A [`TreeItemsBuilder`] collects [`TreeItemBuilder`]s; each of those holds a
//! value, its flags and a nested [`TreeItemsBuilder`] for its children. Nothing
//! is wired until [`TreeItemsBuilder::build`]: every subtree is finalized
//! completely before it is attached to its parent, so the single-parent rule
//! can never be broken half way through.
//!
//! ```
//! use arbor::prelude::*;
//!
//! let mut forest = TreeItemsBuilder::new();
//! forest.item("Application Launcher", |launcher| {
//!     launcher.item("Application 1", |app| {
//!         app.child("Settings");
//!         app.child("Current");
//!     });
//! });
//! forest.add(TreeItemBuilder::new("Sources").expanded(false));
//!
//! let items = forest.build(Identifier::from_display());
//! assert_eq!(items.roots().count(), 2);
//! assert_eq!(items.find(&"Current").unwrap().depth(), 2);
//! ```

use crate::identifier::Identifier;

use super::item::{Icon, NodeId, TreeItem};
use super::items::TreeItems;

/// Accumulates root (or sibling) node builders in order.
pub struct TreeItemsBuilder<T> {
    builders: Vec<TreeItemBuilder<T>>,
}

impl<T> TreeItemsBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
        }
    }

    /// Append a configured node builder.
    pub fn add(&mut self, builder: TreeItemBuilder<T>) -> &mut Self {
        self.builders.push(builder);
        self
    }

    /// Append a node and configure it (and its children) in `block`.
    pub fn item(&mut self, value: T, block: impl FnOnce(&mut TreeItemBuilder<T>)) -> &mut Self {
        let mut builder = TreeItemBuilder::new(value);
        block(&mut builder);
        self.add(builder)
    }

    /// Append a node with default flags and return it for further setup.
    pub fn leaf(&mut self, value: T) -> &mut TreeItemBuilder<T> {
        self.builders.push(TreeItemBuilder::new(value));
        let last = self.builders.len() - 1;
        &mut self.builders[last]
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Materialize the forest, finalizing each node builder in order.
    pub fn build(self, identifier: Identifier<T>) -> TreeItems<T> {
        let mut items = TreeItems::new(identifier);
        for builder in self.builders {
            let root = builder.build_into(&mut items);
            items.add(root);
        }
        log::debug!(
            "Built tree: {} roots, {} nodes",
            items.root_ids().len(),
            items.len()
        );
        items
    }
}

impl<T> Default for TreeItemsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One node under construction.
pub struct TreeItemBuilder<T> {
    value: T,
    expanded: bool,
    selected: bool,
    icon: Option<Icon>,
    expanded_icon: Option<Icon>,
    children: TreeItemsBuilder<T>,
}

impl<T> TreeItemBuilder<T> {
    /// Start a node. Nodes are expanded and unselected unless told otherwise.
    pub fn new(value: T) -> Self {
        Self {
            value,
            expanded: true,
            selected: false,
            icon: None,
            expanded_icon: None,
            children: TreeItemsBuilder::new(),
        }
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn expanded_icon(mut self, icon: Icon) -> Self {
        self.expanded_icon = Some(icon);
        self
    }

    /// Append a configured child builder.
    pub fn with_child(mut self, child: TreeItemBuilder<T>) -> Self {
        self.children.add(child);
        self
    }

    pub fn set_expanded(&mut self, expanded: bool) -> &mut Self {
        self.expanded = expanded;
        self
    }

    pub fn set_selected(&mut self, selected: bool) -> &mut Self {
        self.selected = selected;
        self
    }

    pub fn set_icon(&mut self, icon: Icon) -> &mut Self {
        self.icon = Some(icon);
        self
    }

    pub fn set_expanded_icon(&mut self, icon: Icon) -> &mut Self {
        self.expanded_icon = Some(icon);
        self
    }

    /// Append a leaf child and return it for further setup.
    pub fn child(&mut self, value: T) -> &mut TreeItemBuilder<T> {
        self.children.leaf(value)
    }

    /// Append a child and configure it (and its children) in `block`.
    pub fn item(&mut self, value: T, block: impl FnOnce(&mut TreeItemBuilder<T>)) -> &mut Self {
        self.children.item(value, block);
        self
    }

    /// The builder for this node's children.
    pub fn children(&mut self) -> &mut TreeItemsBuilder<T> {
        &mut self.children
    }

    /// Construct this node, then finalize and attach each child in order.
    fn build_into(self, items: &mut TreeItems<T>) -> NodeId {
        let item = TreeItem::new(self.value)
            .with_expanded(self.expanded)
            .with_selected(self.selected)
            .with_icon(self.icon)
            .with_expanded_icon(self.expanded_icon);
        let id = items.insert(item);
        for child in self.children.builders {
            let child_id = child.build_into(items);
            items.link(id, child_id);
        }
        id
    }
}
