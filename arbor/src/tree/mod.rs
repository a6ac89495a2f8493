//! Tree nodes, the forest that owns them, and the builder that assembles it.

mod builder;
mod flat;
mod item;
mod items;
mod node;

pub use builder::{TreeItemBuilder, TreeItemsBuilder};
pub use flat::FlatNode;
pub use item::{Icon, NodeId, TreeItem};
pub use items::TreeItems;
pub use node::TreeNode;
