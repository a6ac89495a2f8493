//! Flattened rows for rendering and cursor navigation.

use super::item::NodeId;

/// A visible node in the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatNode {
    /// Handle of the node.
    pub id: NodeId,
    /// Depth in tree (0 = root).
    pub depth: u16,
    /// Whether this node has children.
    pub has_children: bool,
    /// Whether this node has children and is expanded.
    pub expanded: bool,
    /// Whether this node is selected.
    pub selected: bool,
}
