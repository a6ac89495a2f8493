//! Pure state transitions: `(TreeState, TreeEvent) -> TreeState`.

use std::sync::Arc;

use crate::config::{LeafToggle, SelectionMode, StoreConfig};
use crate::tree::{NodeId, TreeItems};

use super::event::{ChangeKind, Direction, Snapshot, TreeEvent};

/// Everything the store holds: the collection and the cursor.
///
/// The cursor is not part of the tree; it only remembers the node the user
/// last interacted with.
#[derive(Debug)]
pub struct TreeState<T> {
    /// Current collection.
    pub items: Snapshot<T>,
    /// Last node the user interacted with.
    pub current: Option<NodeId>,
}

impl<T> TreeState<T> {
    /// Wrap a collection with no cursor.
    pub fn new(items: TreeItems<T>) -> Self {
        Self {
            items: Arc::new(items),
            current: None,
        }
    }
}

impl<T> Clone for TreeState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            current: self.current,
        }
    }
}

/// Compute the state that follows `event`.
///
/// When nothing changes the returned state holds the very same collection
/// (`Arc::ptr_eq`). Otherwise only the nodes whose flags changed are copied;
/// all others are shared with `state`.
pub fn reduce<T>(
    state: &TreeState<T>,
    event: TreeEvent<T>,
    config: &StoreConfig,
) -> (TreeState<T>, ChangeKind) {
    match event {
        TreeEvent::Update(items) => {
            // Keep the cursor on the same logical node, if it survived.
            let current = state
                .current
                .and_then(|id| state.items.get(id))
                .and_then(|node| items.find_id(&node.key()));
            let next = TreeState {
                items: Arc::new(items),
                current,
            };
            (next, ChangeKind::Update)
        }

        TreeEvent::SetCurrent(current) => {
            let next = TreeState {
                items: Arc::clone(&state.items),
                current,
            };
            let kind = ChangeKind::Current {
                previous: state.current,
                current,
            };
            (next, kind)
        }

        TreeEvent::MoveCurrent(direction) => {
            let current = move_cursor(&state.items, state.current, direction);
            let next = TreeState {
                items: Arc::clone(&state.items),
                current,
            };
            let kind = ChangeKind::Current {
                previous: state.current,
                current,
            };
            (next, kind)
        }

        TreeEvent::Select(key) => {
            let node = state.items.find_id(&key);
            let items = match node {
                Some(id) => modify(&state.items, |items| {
                    let mut changed = false;
                    if config.selection == SelectionMode::Single {
                        let others: Vec<NodeId> = items
                            .iter()
                            .filter(|other| other.selected() && other.id() != id)
                            .map(|other| other.id())
                            .collect();
                        changed |= set_selected(items, &others, false) > 0;
                    }
                    changed |= set_selected(items, &[id], true) > 0;
                    changed
                }),
                None => Arc::clone(&state.items),
            };
            (with_items(state, items), ChangeKind::Select { key, node })
        }

        TreeEvent::Deselect(key) => {
            let node = state.items.find_id(&key);
            let items = match node {
                Some(id) => modify(&state.items, |items| set_selected(items, &[id], false) > 0),
                None => Arc::clone(&state.items),
            };
            (with_items(state, items), ChangeKind::Deselect { key, node })
        }

        TreeEvent::ClearSelection => {
            let selected: Vec<NodeId> = state.items.selected().iter().map(|n| n.id()).collect();
            let mut cleared = 0;
            let items = modify(&state.items, |items| {
                cleared = set_selected(items, &selected, false);
                cleared > 0
            });
            (with_items(state, items), ChangeKind::ClearSelection { cleared })
        }

        TreeEvent::ToggleExpansion(key) => {
            let node = state.items.find_id(&key);
            let items = match node {
                Some(id) => modify(&state.items, |items| {
                    let has_children = items.item(id).is_some_and(|item| item.has_children());
                    if !has_children && config.leaf_toggle == LeafToggle::Ignore {
                        log::debug!("Ignoring expansion toggle on leaf '{}'", key);
                        return false;
                    }
                    items.update(id, |item| item.set_expanded(!item.is_expanded()))
                }),
                None => Arc::clone(&state.items),
            };
            (with_items(state, items), ChangeKind::Toggle { key, node })
        }

        TreeEvent::ExpandAll => expand_all(state, true),
        TreeEvent::CollapseAll => expand_all(state, false),
    }
}

fn expand_all<T>(state: &TreeState<T>, expanded: bool) -> (TreeState<T>, ChangeKind) {
    let targets: Vec<NodeId> = state
        .items
        .iter()
        .filter(|node| node.has_children() && node.expanded() != expanded)
        .map(|node| node.id())
        .collect();
    let items = modify(&state.items, |items| {
        for &id in &targets {
            items.update(id, |item| item.set_expanded(expanded));
        }
        !targets.is_empty()
    });
    let kind = ChangeKind::ExpandAll {
        expanded,
        changed: targets.len(),
    };
    (with_items(state, items), kind)
}

/// Run `f` on a shallow copy; keep the input snapshot if `f` reports no change.
fn modify<T>(items: &Snapshot<T>, f: impl FnOnce(&mut TreeItems<T>) -> bool) -> Snapshot<T> {
    let mut next = TreeItems::clone(items);
    if f(&mut next) {
        Arc::new(next)
    } else {
        Arc::clone(items)
    }
}

fn with_items<T>(state: &TreeState<T>, items: Snapshot<T>) -> TreeState<T> {
    TreeState {
        items,
        current: state.current,
    }
}

/// Set the selection flag on `ids`; returns how many nodes changed.
fn set_selected<T>(items: &mut TreeItems<T>, ids: &[NodeId], selected: bool) -> usize {
    let mut changed = 0;
    for &id in ids {
        if items.item(id).is_some_and(|item| item.is_selected() != selected) {
            items.update(id, |item| item.set_selected(selected));
            changed += 1;
        }
    }
    changed
}

fn move_cursor<T>(
    items: &TreeItems<T>,
    current: Option<NodeId>,
    direction: Direction,
) -> Option<NodeId> {
    let node = current.and_then(|id| items.get(id));
    match direction {
        Direction::Parent => node.and_then(|n| n.parent()).map(|p| p.id()).or(current),
        Direction::FirstChild => node
            .filter(|n| n.has_children() && n.expanded())
            .and_then(|n| n.children().next())
            .map(|child| child.id())
            .or(current),
        Direction::Up | Direction::Down => {
            let rows = items.visible();
            if rows.is_empty() {
                return current;
            }
            // A cursor hidden under a collapsed ancestor resumes from that ancestor.
            let anchor = node.and_then(|n| {
                std::iter::successors(Some(n), |n| n.parent())
                    .find_map(|n| rows.iter().position(|row| row.id == n.id()))
            });
            let index = match (anchor, direction) {
                (None, _) => 0,
                (Some(i), Direction::Up) => i.saturating_sub(1),
                (Some(i), _) => (i + 1).min(rows.len() - 1),
            };
            Some(rows[index].id)
        }
    }
}
