use std::sync::{Arc, Mutex};

use arbor::prelude::*;

fn folder() -> TreeItems<&'static str> {
    let mut forest = TreeItemsBuilder::new();
    forest.item("Folder", |folder| {
        folder.child("File1");
        folder.child("File2");
    });
    forest.build(Identifier::from_display())
}

/// Folder
/// ├── Sub
/// │   └── Deep
/// └── File
/// Other
fn outline() -> TreeItems<&'static str> {
    let mut forest = TreeItemsBuilder::new();
    forest.item("Folder", |folder| {
        folder.item("Sub", |sub| {
            sub.child("Deep");
        });
        folder.child("File");
    });
    forest.leaf("Other");
    forest.build(Identifier::from_display())
}

fn record(store: &TreeStore<&'static str>) -> Arc<Mutex<Vec<Change<&'static str>>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);
    store.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    changes
}

fn flag(store: &TreeStore<&'static str>, value: &'static str) -> (bool, bool) {
    let state = store.state();
    let node = state.find(&value).unwrap();
    (node.expanded(), node.selected())
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_marks_only_matching_node() {
    let store = TreeStore::new(folder());
    store.select(&"File1");

    let state = store.state();
    assert!(state.find(&"File1").unwrap().selected());
    assert!(!state.find(&"File2").unwrap().selected());
    assert!(!state.find(&"Folder").unwrap().selected());
}

#[test]
fn test_select_is_additive_by_default() {
    let store = TreeStore::new(folder());
    store.select(&"File1");
    store.select(&"File2");

    let selected: Vec<_> = store.state().selected().iter().map(|n| *n.value()).collect();
    assert_eq!(selected, ["File1", "File2"]);
}

#[test]
fn test_single_selection_mode_clears_others() {
    let store = TreeStore::with_config(folder(), StoreConfig::new().single_select());
    store.select(&"File1");
    store.select(&"File2");

    let selected: Vec<_> = store.state().selected().iter().map(|n| *n.value()).collect();
    assert_eq!(selected, ["File2"]);
}

#[test]
fn test_reselect_is_idempotent_and_notifies_once() {
    let store = TreeStore::new(folder());
    let changes = record(&store);

    store.select(&"File1");
    let before = store.state();
    store.select(&"File1");
    let after = store.state();

    assert!(Arc::ptr_eq(&before, &after));
    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes[0].changed);
    assert!(!changes[1].changed);
    assert!(changes[1].kind.matched());
}

#[test]
fn test_deselect_and_clear_selection() {
    let store = TreeStore::new(folder());
    store.select(&"Folder");
    store.select(&"File1");
    store.select(&"File2");

    store.deselect(&"File1");
    assert_eq!(flag(&store, "File1"), (true, false));

    let changes = record(&store);
    store.clear_selection();
    assert!(store.state().selected().is_empty());
    assert_eq!(
        changes.lock().unwrap()[0].kind,
        ChangeKind::ClearSelection { cleared: 2 }
    );
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_toggle_is_an_involution() {
    let store = TreeStore::new(folder());
    assert_eq!(flag(&store, "Folder"), (true, false));

    store.toggle_expansion(&"Folder");
    assert_eq!(flag(&store, "Folder"), (false, false));

    store.toggle_expansion(&"Folder");
    assert_eq!(flag(&store, "Folder"), (true, false));
}

#[test]
fn test_toggle_leaf_is_ignored_by_default() {
    let store = TreeStore::new(folder());
    let changes = record(&store);
    let before = store.state();

    store.toggle_expansion(&"File1");

    assert!(Arc::ptr_eq(&before, &store.state()));
    assert_eq!(flag(&store, "File1"), (true, false));
    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 1);
    assert!(!changes[0].changed);
}

#[test]
fn test_toggle_leaf_flips_with_flip_policy() {
    let config = StoreConfig::new().leaf_toggle(LeafToggle::Flip);
    let store = TreeStore::with_config(folder(), config);

    store.toggle_expansion(&"File1");
    assert_eq!(flag(&store, "File1"), (false, false));
}

#[test]
fn test_expand_and_collapse_all() {
    let store = TreeStore::new(outline());
    let changes = record(&store);

    store.collapse_all();
    assert!(store.state().iter().filter(|n| n.has_children()).all(|n| !n.expanded()));
    // Leaves keep their inert flag.
    assert_eq!(flag(&store, "Deep"), (true, false));

    store.expand_all();
    assert!(store.state().iter().all(|n| n.expanded()));

    let changes = changes.lock().unwrap();
    assert_eq!(changes[0].kind, ChangeKind::ExpandAll { expanded: false, changed: 2 });
    assert_eq!(changes[1].kind, ChangeKind::ExpandAll { expanded: true, changed: 2 });
}

// ============================================================================
// Lookup misses
// ============================================================================

#[test]
fn test_miss_is_a_noop_that_still_notifies() {
    let store = TreeStore::new(folder());
    let changes = record(&store);
    let before = store.state();

    store.select(&"Nope");
    store.toggle_expansion(&"Nope");

    assert!(Arc::ptr_eq(&before, &store.state()));
    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|c| !c.kind.matched() && !c.changed));
    assert_eq!(
        changes[0].kind,
        ChangeKind::Select { key: "nope".to_string(), node: None }
    );
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn test_mutation_produces_new_collection_with_shared_nodes() {
    let store = TreeStore::new(folder());
    let before = store.state();

    store.select(&"File1");
    let after = store.state();

    assert!(!Arc::ptr_eq(&before, &after));
    let file1 = after.find(&"File1").unwrap().id();
    let file2 = after.find(&"File2").unwrap().id();
    let root = after.find(&"Folder").unwrap().id();
    assert!(!after.shares_node(&before, file1));
    assert!(after.shares_node(&before, file2));
    assert!(after.shares_node(&before, root));

    // The old snapshot is untouched.
    assert!(!before.find(&"File1").unwrap().selected());
}

#[test]
fn test_update_replaces_collection_and_keeps_cursor() {
    let store = TreeStore::new(folder());
    let file2 = store.state().find(&"File2").unwrap().id();
    store.set_current(file2);

    let mut forest = TreeItemsBuilder::new();
    forest.leaf("File2");
    forest.leaf("File3");
    store.update(forest.build(Identifier::from_display()));

    let state = store.state();
    assert_eq!(state.roots().count(), 2);
    let current = store.current().and_then(|id| state.get(id)).unwrap();
    assert_eq!(*current.value(), "File2");

    let mut forest = TreeItemsBuilder::new();
    forest.leaf("Other");
    store.update(forest.build(Identifier::from_display()));
    assert_eq!(store.current(), None);
}

#[test]
fn test_update_with_extended_copy_of_state() {
    let store = TreeStore::new(folder());
    let before = store.state();
    let mut next = (*before).clone();
    let folder_id = next.find_id("folder").unwrap();
    let late = next.insert(TreeItem::new("Late"));
    next.add_child(folder_id, late).unwrap();

    // A reader of the old snapshot looks up before the update lands.
    assert!(before.find(&"Late").is_none());

    store.update(next);
    store.select(&"Late");

    let state = store.state();
    let selected: Vec<_> = state.selected().iter().map(|n| *n.value()).collect();
    assert_eq!(selected, vec!["Late"]);
    assert!(before.find(&"Late").is_none());
}

#[test]
fn test_update_with_copy_of_mutated_snapshot() {
    let store = TreeStore::new(folder());
    store.select(&"File1");

    // Flag-only snapshots share their lookup index with their source.
    let mut next = (*store.state()).clone();
    let late = next.push(TreeItem::new("Late"));
    assert!(store.state().find(&"Late").is_none());

    store.update(next);
    store.toggle_expansion(&"Folder");

    let state = store.state();
    assert_eq!(state.find(&"Late").unwrap().id(), late);
    assert!(state.find(&"File1").unwrap().selected());
    assert!(!state.find(&"Folder").unwrap().expanded());
}

// ============================================================================
// Cursor
// ============================================================================

#[test]
fn test_set_current_leaves_collection_alone() {
    let store = TreeStore::new(folder());
    let changes = record(&store);
    let before = store.state();
    let file1 = before.find(&"File1").unwrap().id();

    store.set_current(file1);

    assert_eq!(store.current(), Some(file1));
    assert!(Arc::ptr_eq(&before, &store.state()));
    let changes = changes.lock().unwrap();
    assert_eq!(
        changes[0].kind,
        ChangeKind::Current { previous: None, current: Some(file1) }
    );
    assert!(changes[0].changed);
}

#[test]
fn test_move_current_over_visible_rows() {
    let store = TreeStore::new(outline());
    let state = store.state();
    let id = |value: &'static str| state.find(&value).unwrap().id();

    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("Folder")));
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("Sub")));
    store.move_current(Direction::FirstChild);
    assert_eq!(store.current(), Some(id("Deep")));
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("File")));
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("Other")));
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("Other")));
    store.move_current(Direction::Up);
    assert_eq!(store.current(), Some(id("File")));
    store.move_current(Direction::Parent);
    assert_eq!(store.current(), Some(id("Folder")));
    store.move_current(Direction::Parent);
    assert_eq!(store.current(), Some(id("Folder")));
}

#[test]
fn test_move_current_skips_collapsed_subtrees() {
    let store = TreeStore::new(outline());
    let state = store.state();
    let id = |value: &'static str| state.find(&value).unwrap().id();

    store.toggle_expansion(&"Sub");
    store.set_current(id("Sub"));
    store.move_current(Direction::FirstChild);
    assert_eq!(store.current(), Some(id("Sub")));
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("File")));

    // A cursor hidden by a collapse resumes from its visible ancestor.
    store.set_current(id("Deep"));
    store.toggle_expansion(&"Folder");
    store.move_current(Direction::Down);
    assert_eq!(store.current(), Some(id("Other")));
}

// ============================================================================
// Notification
// ============================================================================

#[test]
fn test_events_from_subscribers_are_queued() {
    let store = TreeStore::new(folder());
    let order = Arc::new(Mutex::new(Vec::new()));

    let inner = store.clone();
    let sink = Arc::clone(&order);
    store.subscribe(move |change| {
        sink.lock().unwrap().push(change.kind.clone());
        if let ChangeKind::Select { .. } = change.kind {
            // Runs after this notification completes.
            inner.toggle_expansion(&"Folder");
            assert!(inner.state().find(&"Folder").unwrap().expanded());
        }
    });

    store.select(&"File1");

    let order = order.lock().unwrap();
    assert_eq!(order.len(), 2);
    assert!(matches!(order[0], ChangeKind::Select { .. }));
    assert!(matches!(order[1], ChangeKind::Toggle { .. }));
    assert_eq!(flag(&store, "Folder"), (false, false));
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let store = TreeStore::new(folder());
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);

    store.select(&"File1");
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.select(&"File2");

    assert_eq!(*count.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_roots_stream_follows_every_event() {
    let store = TreeStore::new(folder());
    let mut roots = store.roots();
    assert!(!roots.has_changed().unwrap());

    store.toggle_expansion(&"Folder");
    roots.changed().await.unwrap();
    assert!(!roots.borrow_and_update().find(&"Folder").unwrap().expanded());

    // Misses republish the unchanged collection.
    store.select(&"Nope");
    roots.changed().await.unwrap();
    assert!(Arc::ptr_eq(&roots.borrow_and_update(), &store.state()));
}
