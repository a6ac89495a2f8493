//! Reactive container for a tree.
//!
//! [`TreeStore`] is the only way to change a tree once it is built. Every
//! operation becomes a [`TreeEvent`], runs through [`reduce`] to compute the
//! next state, replaces the held state and then notifies:
//!
//! - subscribers registered with [`TreeStore::subscribe`] receive one
//!   [`Change`] per event, synchronously, after the state was replaced;
//! - the [`TreeStore::roots`] stream is updated with the new collection.
//!
//! Events dispatched while another event is being processed (for example from
//! inside a subscriber) are queued and run afterwards, in order.

mod event;
mod reduce;

pub use event::{Change, ChangeKind, Direction, Snapshot, TreeEvent};
pub use reduce::{TreeState, reduce};

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::identifier::Identifier;
use crate::tree::{NodeId, TreeItems};

/// Handle returned by [`TreeStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

type Subscriber<T> = Arc<dyn Fn(&Change<T>) + Send + Sync>;

struct DispatchQueue<T> {
    pending: VecDeque<TreeEvent<T>>,
    draining: bool,
}

/// Resets the queue if a subscriber panics mid-dispatch, so the store stays usable.
struct DrainGuard<'a, T> {
    queue: &'a Mutex<DispatchQueue<T>>,
}

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut queue = lock(self.queue);
            queue.pending.clear();
            queue.draining = false;
        }
    }
}

/// Single-writer, many-reader store for a [`TreeItems`] collection.
///
/// Cloning the store is cheap and yields another handle to the same state.
///
/// # Example
///
/// ```
/// use arbor::prelude::*;
///
/// let mut forest = TreeItemsBuilder::new();
/// forest.item("Folder", |folder| {
///     folder.child("File");
/// });
/// let store = TreeStore::new(forest.build(Identifier::from_display()));
///
/// let mut roots = store.roots();
/// store.toggle_expansion(&"Folder");
///
/// assert!(roots.has_changed().unwrap());
/// assert!(!roots.borrow_and_update().find(&"Folder").unwrap().expanded());
/// ```
pub struct TreeStore<T> {
    state: Arc<RwLock<TreeState<T>>>,
    config: StoreConfig,
    queue: Arc<Mutex<DispatchQueue<T>>>,
    subscribers: Arc<Mutex<Vec<(SubscriptionId, Subscriber<T>)>>>,
    roots: Arc<watch::Sender<Snapshot<T>>>,
}

impl<T> TreeStore<T> {
    /// Create a store holding `items`, with the default config.
    pub fn new(items: TreeItems<T>) -> Self {
        Self::with_config(items, StoreConfig::default())
    }

    /// Create a store holding an empty collection.
    pub fn empty(identifier: Identifier<T>) -> Self {
        Self::new(TreeItems::new(identifier))
    }

    /// Create a store holding `items`.
    pub fn with_config(items: TreeItems<T>, config: StoreConfig) -> Self {
        let state = TreeState::new(items);
        let (roots, _) = watch::channel(Arc::clone(&state.items));
        Self {
            state: Arc::new(RwLock::new(state)),
            config,
            queue: Arc::new(Mutex::new(DispatchQueue {
                pending: VecDeque::new(),
                draining: false,
            })),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            roots: Arc::new(roots),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Reading
    // -------------------------------------------------------------------------

    /// The current collection.
    pub fn state(&self) -> Snapshot<T> {
        Arc::clone(&self.read().items)
    }

    /// The node the user last interacted with.
    pub fn current(&self) -> Option<NodeId> {
        self.read().current
    }

    /// A continuously updated view of the collection, for renderers.
    ///
    /// The receiver is marked changed after every dispatched event, including
    /// events that matched nothing.
    pub fn roots(&self) -> watch::Receiver<Snapshot<T>> {
        self.roots.subscribe()
    }

    /// Lookup key of a value, as computed by the held collection.
    pub fn key(&self, value: &T) -> String {
        self.read().items.key(value)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, TreeState<T>> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Register a callback run after every event.
    pub fn subscribe(&self, callback: impl Fn(&Change<T>) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        lock(&self.subscribers).push((id, Arc::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Replace the whole collection.
    pub fn update(&self, items: TreeItems<T>) {
        self.dispatch(TreeEvent::Update(items));
    }

    /// Point the cursor at `id`. Never fails and never touches the collection.
    pub fn set_current(&self, id: NodeId) {
        self.dispatch(TreeEvent::SetCurrent(Some(id)));
    }

    /// Clear the cursor.
    pub fn clear_current(&self) {
        self.dispatch(TreeEvent::SetCurrent(None));
    }

    /// Move the cursor over the visible rows or the structure.
    pub fn move_current(&self, direction: Direction) {
        self.dispatch(TreeEvent::MoveCurrent(direction));
    }

    /// Select the node matching `value`'s key. Other selections are kept
    /// unless the store is configured for single selection.
    pub fn select(&self, value: &T) {
        let key = self.key(value);
        self.select_key(key);
    }

    /// Select the node with the given key.
    pub fn select_key(&self, key: impl Into<String>) {
        self.dispatch(TreeEvent::Select(key.into()));
    }

    /// Deselect the node matching `value`'s key.
    pub fn deselect(&self, value: &T) {
        let key = self.key(value);
        self.deselect_key(key);
    }

    /// Deselect the node with the given key.
    pub fn deselect_key(&self, key: impl Into<String>) {
        self.dispatch(TreeEvent::Deselect(key.into()));
    }

    /// Deselect every node.
    pub fn clear_selection(&self) {
        self.dispatch(TreeEvent::ClearSelection);
    }

    /// Flip the expansion flag of the node matching `value`'s key.
    pub fn toggle_expansion(&self, value: &T) {
        let key = self.key(value);
        self.toggle_key(key);
    }

    /// Flip the expansion flag of the node with the given key.
    pub fn toggle_key(&self, key: impl Into<String>) {
        self.dispatch(TreeEvent::ToggleExpansion(key.into()));
    }

    pub fn expand_all(&self) {
        self.dispatch(TreeEvent::ExpandAll);
    }

    pub fn collapse_all(&self) {
        self.dispatch(TreeEvent::CollapseAll);
    }

    /// Queue an event and, unless an event is already being processed, drain
    /// the queue.
    pub fn dispatch(&self, event: TreeEvent<T>) {
        {
            let mut queue = lock(&self.queue);
            queue.pending.push_back(event);
            if queue.draining {
                log::trace!("Queued tree event behind the one in progress");
                return;
            }
            queue.draining = true;
        }

        let _guard = DrainGuard { queue: &self.queue };
        loop {
            let next = {
                let mut queue = lock(&self.queue);
                match queue.pending.pop_front() {
                    Some(event) => event,
                    None => {
                        queue.draining = false;
                        return;
                    }
                }
            };
            let change = self.apply(next);
            self.notify(&change);
        }
    }

    fn apply(&self, event: TreeEvent<T>) -> Change<T> {
        let name = event.name();
        let mut state = self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (next, kind) = reduce(&state, event, &self.config);
        let changed =
            !Arc::ptr_eq(&state.items, &next.items) || state.current != next.current;
        *state = next;
        let change = Change {
            kind,
            state: Arc::clone(&state.items),
            current: state.current,
            changed,
        };
        drop(state);

        if change.kind.matched() {
            log::debug!("Tree event '{}' applied (changed: {})", name, changed);
        } else {
            log::debug!("Tree event '{}' matched no node: {:?}", name, change.kind);
        }
        self.roots.send_replace(Arc::clone(&change.state));
        change
    }

    fn notify(&self, change: &Change<T>) {
        let subscribers: Vec<Subscriber<T>> = lock(&self.subscribers)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        log::trace!("Notifying {} tree subscribers", subscribers.len());
        for callback in subscribers {
            callback(change);
        }
    }
}

fn lock<V>(mutex: &Mutex<V>) -> MutexGuard<'_, V> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T> Clone for TreeStore<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config,
            queue: Arc::clone(&self.queue),
            subscribers: Arc::clone(&self.subscribers),
            roots: Arc::clone(&self.roots),
        }
    }
}

impl<T: fmt::Display + 'static> Default for TreeStore<T> {
    fn default() -> Self {
        Self::new(TreeItems::default())
    }
}

impl<T> fmt::Debug for TreeStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("config", &self.config)
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
