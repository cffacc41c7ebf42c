//! Widget-local reactive state
//!
//! A small signal graph in the spirit of Leptos/SolidJS signals, trimmed to
//! what declarative widgets need:
//! - Signals hold a typed value and a version counter
//! - Writing a signal marks every watching [`DirtyFlag`] so the owning
//!   widget's view is rebuilt on the next frame
//! - Writes inside a batch notify watchers once, when the batch ends
//!
//! # State
//!
//! [`State<T>`] binds a signal to the shared graph and to the dirty flag of
//! the widget that created it. It is the handle widgets keep in their fields.
//!
//! ```
//! use motif_core::reactive::{DirtyFlag, ReactiveGraph, State};
//! use std::sync::atomic::Ordering;
//!
//! let graph = ReactiveGraph::shared();
//! let dirty = DirtyFlag::default();
//! let is_loading = State::create(&graph, &dirty, false);
//!
//! is_loading.set(true);
//! assert!(is_loading.get());
//! assert!(dirty.load(Ordering::SeqCst));
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::any::Any;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

new_key_type! {
    /// Unique identifier for a signal
    pub struct SignalId;
}

/// A reactive signal handle (cheap to copy)
#[derive(Debug)]
pub struct Signal<T> {
    id: SignalId,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<T> {}

impl<T> Signal<T> {
    /// Get the signal's internal ID
    pub fn id(&self) -> SignalId {
        self.id
    }
}

/// Shared dirty flag marking a widget whose view must be rebuilt
pub type DirtyFlag = Arc<AtomicBool>;

/// Shared reactive graph for access from widget handles
pub type SharedReactiveGraph = Arc<Mutex<ReactiveGraph>>;

/// Internal signal node storage
struct SignalNode {
    /// The signal value (type-erased)
    value: Box<dyn Any + Send>,
    /// Version counter for change detection
    version: u64,
    /// Dirty flags to raise when the value changes
    watchers: SmallVec<[DirtyFlag; 2]>,
}

/// The reactive graph that owns every signal of a running app
pub struct ReactiveGraph {
    signals: SlotMap<SignalId, SignalNode>,
    /// Current batch depth (> 0 means notifications are deferred)
    batch_depth: Cell<u32>,
    /// Watchers to notify when the outermost batch ends
    pending: Vec<DirtyFlag>,
    /// Global version counter
    global_version: u64,
}

impl ReactiveGraph {
    /// Create a new reactive graph
    pub fn new() -> Self {
        Self {
            signals: SlotMap::with_key(),
            batch_depth: Cell::new(0),
            pending: Vec::new(),
            global_version: 0,
        }
    }

    /// Create a new graph wrapped for sharing with [`State`] handles
    pub fn shared() -> SharedReactiveGraph {
        Arc::new(Mutex::new(Self::new()))
    }

    // =========================================================================
    // SIGNALS
    // =========================================================================

    /// Create a new signal with an initial value
    pub fn create_signal<T: Send + 'static>(&mut self, initial: T) -> Signal<T> {
        let id = self.signals.insert(SignalNode {
            value: Box::new(initial),
            version: 0,
            watchers: SmallVec::new(),
        });
        Signal {
            id,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the current value of a signal
    pub fn get<T: Clone + 'static>(&self, signal: Signal<T>) -> Option<T> {
        self.signals
            .get(signal.id)
            .and_then(|node| node.value.downcast_ref::<T>().cloned())
    }

    /// Set the value of a signal and notify its watchers
    pub fn set<T: Send + 'static>(&mut self, signal: Signal<T>, value: T) {
        let Some(node) = self.signals.get_mut(signal.id) else {
            tracing::warn!("write to disposed signal {:?} ignored", signal.id);
            return;
        };

        node.value = Box::new(value);
        node.version += 1;
        self.global_version += 1;

        if self.batch_depth.get() > 0 {
            self.pending.extend(node.watchers.iter().cloned());
        } else {
            for watcher in &node.watchers {
                watcher.store(true, Ordering::SeqCst);
            }
        }
    }

    /// Update a signal using a function
    pub fn update<T: Clone + Send + 'static, F: FnOnce(T) -> T>(
        &mut self,
        signal: Signal<T>,
        f: F,
    ) {
        if let Some(current) = self.get(signal) {
            self.set(signal, f(current));
        }
    }

    /// Get the version of a signal (for change detection)
    pub fn signal_version(&self, id: SignalId) -> Option<u64> {
        self.signals.get(id).map(|n| n.version)
    }

    /// Raise `flag` whenever the signal changes
    pub fn watch(&mut self, id: SignalId, flag: &DirtyFlag) {
        if let Some(node) = self.signals.get_mut(id) {
            if !node.watchers.iter().any(|w| Arc::ptr_eq(w, flag)) {
                node.watchers.push(flag.clone());
            }
        }
    }

    /// Remove a signal from the graph
    ///
    /// Returns `false` if the signal was already gone.
    pub fn dispose_signal(&mut self, id: SignalId) -> bool {
        self.signals.remove(id).is_some()
    }

    /// Check whether a signal is still alive
    pub fn contains(&self, id: SignalId) -> bool {
        self.signals.contains_key(id)
    }

    // =========================================================================
    // BATCHING
    // =========================================================================

    /// Start a batch - notifications are deferred until the batch ends
    pub fn batch_start(&self) {
        self.batch_depth.set(self.batch_depth.get() + 1);
    }

    /// End a batch and flush deferred notifications
    pub fn batch_end(&mut self) {
        let depth = self.batch_depth.get();
        if depth > 0 {
            self.batch_depth.set(depth - 1);
            if depth == 1 {
                for watcher in self.pending.drain(..) {
                    watcher.store(true, Ordering::SeqCst);
                }
            }
        }
    }

    /// Run a function in a batch context
    pub fn batch<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.batch_start();
        let mut scope = BatchScope(self);
        f(&mut *scope.0)
    }

    /// Get statistics about the reactive graph
    pub fn stats(&self) -> ReactiveStats {
        ReactiveStats {
            signal_count: self.signals.len(),
            pending_notifications: self.pending.len(),
            global_version: self.global_version,
        }
    }
}

impl Default for ReactiveGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Ends a batch when dropped, including while unwinding
struct BatchScope<'a>(&'a mut ReactiveGraph);

impl Drop for BatchScope<'_> {
    fn drop(&mut self) {
        self.0.batch_end();
    }
}

/// Statistics about the reactive graph
#[derive(Debug, Clone)]
pub struct ReactiveStats {
    pub signal_count: usize,
    pub pending_notifications: usize,
    pub global_version: u64,
}

fn lock(graph: &SharedReactiveGraph) -> MutexGuard<'_, ReactiveGraph> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// STATE - widget-facing handle
// =============================================================================

/// A bound state value with direct get/set methods
///
/// Every write raises the dirty flag of the widget that owns the state, so the
/// runtime knows to rebuild exactly that widget's view.
#[derive(Clone)]
pub struct State<T> {
    signal: Signal<T>,
    reactive: SharedReactiveGraph,
}

impl<T: Clone + Send + 'static> State<T> {
    /// Create a signal in `graph` owned by the widget behind `dirty`
    pub fn create(graph: &SharedReactiveGraph, dirty: &DirtyFlag, initial: T) -> Self {
        let mut guard = lock(graph);
        let signal = guard.create_signal(initial);
        guard.watch(signal.id(), dirty);
        drop(guard);
        Self {
            signal,
            reactive: graph.clone(),
        }
    }

    /// Get the current value
    ///
    /// Falls back to `T::default()` once the signal has been disposed.
    pub fn get(&self) -> T
    where
        T: Default,
    {
        self.try_get().unwrap_or_default()
    }

    /// Get the current value, returning None if the signal was disposed
    pub fn try_get(&self) -> Option<T> {
        lock(&self.reactive).get(self.signal)
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        lock(&self.reactive).set(self.signal, value);
    }

    /// Update the value using a function
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        lock(&self.reactive).update(self.signal, f);
    }

    /// Get the underlying signal
    pub fn signal(&self) -> Signal<T> {
        self.signal
    }

    /// Get the signal ID
    pub fn signal_id(&self) -> SignalId {
        self.signal.id()
    }
}

impl State<bool> {
    /// Flip a boolean state
    pub fn toggle(&self) {
        self.update(|v| !v);
    }
}

/// Run `f` with every write batched into a single notification
pub fn batch<R>(graph: &SharedReactiveGraph, f: impl FnOnce() -> R) -> R {
    lock(graph).batch_start();
    let _scope = SharedBatchScope(graph);
    f()
}

struct SharedBatchScope<'a>(&'a SharedReactiveGraph);

impl Drop for SharedBatchScope<'_> {
    fn drop(&mut self) {
        lock(self.0).batch_end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_create_get_set() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(0i32);
        assert_eq!(graph.get(count), Some(0));

        graph.set(count, 42);
        assert_eq!(graph.get(count), Some(42));
        assert_eq!(graph.signal_version(count.id()), Some(1));
    }

    #[test]
    fn test_signal_update() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(10i32);
        graph.update(count, |x| x + 5);
        assert_eq!(graph.get(count), Some(15));
    }

    #[test]
    fn test_watcher_raised_on_write() {
        let mut graph = ReactiveGraph::new();
        let flag = DirtyFlag::default();

        let on = graph.create_signal(false);
        graph.watch(on.id(), &flag);
        graph.watch(on.id(), &flag);
        assert!(!flag.load(Ordering::SeqCst));

        graph.set(on, true);
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_batching_defers_notifications() {
        let mut graph = ReactiveGraph::new();
        let flag = DirtyFlag::default();

        let a = graph.create_signal(1i32);
        let b = graph.create_signal(2i32);
        graph.watch(a.id(), &flag);
        graph.watch(b.id(), &flag);

        graph.batch(|g| {
            g.set(a, 10);
            g.set(b, 20);
            assert!(!flag.load(Ordering::SeqCst));
            assert_eq!(g.stats().pending_notifications, 2);
        });

        assert!(flag.load(Ordering::SeqCst));
        assert_eq!(graph.stats().pending_notifications, 0);
    }

    #[test]
    fn test_dispose_signal() {
        let mut graph = ReactiveGraph::new();

        let count = graph.create_signal(0i32);
        assert!(graph.dispose_signal(count.id()));
        assert!(!graph.contains(count.id()));
        assert_eq!(graph.get(count), None);

        // Writes to a disposed signal are ignored
        graph.set(count, 3);
        assert_eq!(graph.stats().signal_count, 0);
        assert!(!graph.dispose_signal(count.id()));
    }

    #[test]
    fn test_state_toggle_marks_owner_dirty() {
        let graph = ReactiveGraph::shared();
        let dirty = DirtyFlag::default();
        let other = DirtyFlag::default();

        let mine = State::create(&graph, &dirty, false);
        let _theirs = State::create(&graph, &other, false);

        mine.toggle();
        assert!(mine.get());
        assert!(dirty.load(Ordering::SeqCst));
        assert!(!other.load(Ordering::SeqCst));
    }

    #[test]
    fn test_state_batch_helper() {
        let graph = ReactiveGraph::shared();
        let dirty = DirtyFlag::default();
        let a = State::create(&graph, &dirty, false);
        let b = State::create(&graph, &dirty, false);

        batch(&graph, || {
            a.toggle();
            b.toggle();
        });

        assert!(a.get() && b.get());
        assert!(dirty.load(Ordering::SeqCst));
    }

    #[test]
    fn test_panicking_batch_still_ends() {
        let graph = ReactiveGraph::shared();
        let dirty = DirtyFlag::default();
        let flag = State::create(&graph, &dirty, false);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            batch(&graph, || {
                flag.toggle();
                panic!("handler failed");
            })
        }));
        assert!(result.is_err());
        // The deferred write was flushed when the batch unwound
        assert!(dirty.swap(false, Ordering::SeqCst));

        flag.toggle();
        assert!(dirty.load(Ordering::SeqCst));
        assert_eq!(lock(&graph).stats().pending_notifications, 0);
    }

    #[test]
    fn test_graph_batch_ends_on_panic() {
        let mut graph = ReactiveGraph::new();
        let flag = DirtyFlag::default();
        let on = graph.create_signal(false);
        graph.watch(on.id(), &flag);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            graph.batch(|g| {
                g.set(on, true);
                panic!("handler failed");
            })
        }));
        assert!(result.is_err());
        assert!(flag.swap(false, Ordering::SeqCst));

        graph.set(on, false);
        assert!(flag.load(Ordering::SeqCst));
    }
}
