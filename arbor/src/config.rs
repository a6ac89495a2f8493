//! Store configuration types.

/// How `select` treats nodes that are already selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SelectionMode {
    /// Selecting adds to the selection; other nodes keep their flag.
    #[default]
    Multiple,
    /// Selecting a node clears every other selected node.
    Single,
}

/// What toggling a node without children does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LeafToggle {
    /// Leaves keep their (inert) expansion flag.
    #[default]
    Ignore,
    /// Leaves flip their expansion flag like any other node.
    Flip,
}

/// Behavior of a [`TreeStore`](crate::TreeStore).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StoreConfig {
    /// Selection policy.
    pub selection: SelectionMode,

    /// Expansion toggling policy for leaves.
    pub leaf_toggle: LeafToggle,
}

impl StoreConfig {
    /// Create the default config: additive selection, leaves never toggle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection policy.
    pub fn selection(mut self, mode: SelectionMode) -> Self {
        self.selection = mode;
        self
    }

    /// Make selection exclusive.
    pub fn single_select(mut self) -> Self {
        self.selection = SelectionMode::Single;
        self
    }

    /// Set the leaf toggle policy.
    pub fn leaf_toggle(mut self, policy: LeafToggle) -> Self {
        self.leaf_toggle = policy;
        self
    }
}
