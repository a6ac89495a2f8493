//! Events accepted by the store and the notifications it emits.

use std::sync::Arc;

use crate::tree::{NodeId, TreeItems};

/// An immutable view of the collection held by the store.
pub type Snapshot<T> = Arc<TreeItems<T>>;

/// Cursor movement over the visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous visible row.
    Up,
    /// Next visible row.
    Down,
    /// The current node's parent.
    Parent,
    /// The current node's first child, if it is expanded.
    FirstChild,
}

/// A state transition request.
///
/// Lookups are by key: the node acted upon is the first node in document
/// order whose value maps to that key.
#[derive(Debug, Clone)]
pub enum TreeEvent<T> {
    /// Replace the whole collection.
    Update(TreeItems<T>),
    /// Move the cursor to a node, or clear it.
    SetCurrent(Option<NodeId>),
    /// Move the cursor relative to where it is.
    MoveCurrent(Direction),
    /// Mark a node as selected.
    Select(String),
    /// Clear a node's selection flag.
    Deselect(String),
    /// Clear every selection flag.
    ClearSelection,
    /// Flip a node's expansion flag.
    ToggleExpansion(String),
    /// Expand every node that has children.
    ExpandAll,
    /// Collapse every node that has children.
    CollapseAll,
}

impl<T> TreeEvent<T> {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update(_) => "update",
            Self::SetCurrent(_) => "set_current",
            Self::MoveCurrent(_) => "move_current",
            Self::Select(_) => "select",
            Self::Deselect(_) => "deselect",
            Self::ClearSelection => "clear_selection",
            Self::ToggleExpansion(_) => "toggle_expansion",
            Self::ExpandAll => "expand_all",
            Self::CollapseAll => "collapse_all",
        }
    }
}

/// What an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    /// The collection was replaced.
    Update,
    /// The cursor was set or moved.
    Current {
        previous: Option<NodeId>,
        current: Option<NodeId>,
    },
    /// A selection change was requested. `node` is the matched node, if any.
    Select { key: String, node: Option<NodeId> },
    /// A deselection was requested. `node` is the matched node, if any.
    Deselect { key: String, node: Option<NodeId> },
    /// All selection flags were cleared; `cleared` nodes changed.
    ClearSelection { cleared: usize },
    /// An expansion toggle was requested. `node` is the matched node, if any.
    Toggle { key: String, node: Option<NodeId> },
    /// Expand or collapse all; `expanded` is the new flag and `changed` the
    /// number of nodes that changed.
    ExpandAll { expanded: bool, changed: usize },
}

impl ChangeKind {
    /// Whether a lookup-based event found its node.
    ///
    /// Always true for events that do not look anything up.
    pub fn matched(&self) -> bool {
        match self {
            Self::Select { node, .. } | Self::Deselect { node, .. } | Self::Toggle { node, .. } => {
                node.is_some()
            }
            _ => true,
        }
    }
}

/// Notification delivered to subscribers after each event.
#[derive(Debug)]
pub struct Change<T> {
    /// What happened.
    pub kind: ChangeKind,
    /// The collection after the event.
    pub state: Snapshot<T>,
    /// The cursor after the event.
    pub current: Option<NodeId>,
    /// Whether the collection or the cursor differ from before the event.
    pub changed: bool,
}

impl<T> Clone for Change<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            state: Arc::clone(&self.state),
            current: self.current,
            changed: self.changed,
        }
    }
}
