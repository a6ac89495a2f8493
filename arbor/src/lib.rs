//! Hierarchical tree state: nodes with expansion and selection flags,
//! identity-based lookup, and a reactive store that republishes the tree
//! after every interaction.
//!
//! # Example
//!
//! ```
//! use arbor::prelude::*;
//!
//! let mut forest = TreeItemsBuilder::new();
//! forest.item("Folder", |folder| {
//!     folder.child("File1");
//!     folder.child("File2");
//! });
//!
//! let store = TreeStore::new(forest.build(Identifier::from_display()));
//! store.select(&"File1");
//!
//! let state = store.state();
//! assert!(state.find(&"File1").unwrap().selected());
//! assert!(!state.find(&"File2").unwrap().selected());
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod identifier;
pub mod store;
pub mod tree;

pub use config::{LeafToggle, SelectionMode, StoreConfig};
pub use error::{IdError, TreeError};
pub use identifier::Identifier;
pub use store::{Change, ChangeKind, Direction, Snapshot, SubscriptionId, TreeEvent, TreeStore};
pub use tree::{FlatNode, Icon, NodeId, TreeItem, TreeItemBuilder, TreeItems, TreeItemsBuilder, TreeNode};

pub mod prelude {
    pub use crate::config::{LeafToggle, SelectionMode, StoreConfig};
    pub use crate::error::{IdError, TreeError};
    pub use crate::id::{self, IdScope};
    pub use crate::identifier::Identifier;
    pub use crate::store::{Change, ChangeKind, Direction, Snapshot, TreeEvent, TreeStore};
    pub use crate::tree::{
        FlatNode, Icon, NodeId, TreeItem, TreeItemBuilder, TreeItems, TreeItemsBuilder, TreeNode,
    };
}
