//! The widget contract
//!
//! A widget owns a handful of [`State`] values, maps them to an [`Element`]
//! tree in [`Widget::view`], and mutates them from its trigger handlers.
//! Everything a widget allocates at runtime (signals and timers) goes through
//! its [`WidgetContext`], which releases all of it when the widget unmounts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use indexmap::IndexMap;
use motif_animation::{SchedulerHandle, TimerFire, TimerId};
use motif_core::{DirtyFlag, SharedReactiveGraph, SignalId, State};
use motif_layout::Element;
use serde::Serialize;
use smallvec::SmallVec;

/// A state value as reported in frame summaries
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<f32> for StateValue {
    fn from(v: f32) -> Self {
        StateValue::Number(f64::from(v))
    }
}

impl From<u32> for StateValue {
    fn from(v: u32) -> Self {
        StateValue::Number(f64::from(v))
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Text(v)
    }
}

/// Named state values of one widget, in declaration order
pub type WidgetSummary = IndexMap<&'static str, StateValue>;

/// An animated, state-driven view
pub trait Widget {
    /// Stable identifier, also the key of the widget's root element
    fn name(&self) -> &'static str;

    /// Describe the current appearance
    fn view(&self) -> Element;

    /// Current state values
    fn summary(&self) -> WidgetSummary;

    /// The widget became visible; may fire more than once per mount
    fn on_appear(&mut self, _cx: &mut WidgetContext) {}

    fn on_tap(&mut self, _cx: &mut WidgetContext) {}

    /// A timer scheduled through `cx` fired
    fn on_timer(&mut self, _cx: &mut WidgetContext, _fire: TimerFire) {}

    /// Called right before the widget unmounts
    fn on_disappear(&mut self, _cx: &mut WidgetContext) {}
}

/// Per-widget runtime services
pub struct WidgetContext {
    name: &'static str,
    graph: SharedReactiveGraph,
    scheduler: SchedulerHandle,
    dirty: DirtyFlag,
    signals: Vec<SignalId>,
    timers: SmallVec<[TimerId; 2]>,
}

impl WidgetContext {
    pub fn new(name: &'static str, graph: SharedReactiveGraph, scheduler: SchedulerHandle) -> Self {
        Self {
            name,
            graph,
            scheduler,
            // Dirty from the start so the first view gets built
            dirty: Arc::new(AtomicBool::new(true)),
            signals: Vec::new(),
            timers: SmallVec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Create a state value owned by this widget
    pub fn use_state<T: Clone + Send + 'static>(&mut self, initial: T) -> State<T> {
        let state = State::create(&self.graph, &self.dirty, initial);
        self.signals.push(state.signal_id());
        state
    }

    /// Run `f` with all state writes coalesced into one notification
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        motif_core::batch(&self.graph, f)
    }

    /// Check and clear the rebuild flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Schedule a timer firing every `interval`, owned by this widget
    pub fn schedule_repeating(&mut self, interval: Duration) -> Option<TimerId> {
        let id = self.scheduler.schedule_repeating(interval)?;
        tracing::debug!(widget = self.name, ?id, ?interval, "timer scheduled");
        self.timers.push(id);
        Some(id)
    }

    /// Schedule a timer firing once, `delay` from now, owned by this widget
    pub fn schedule_once(&mut self, delay: Duration) -> Option<TimerId> {
        let id = self.scheduler.schedule_once(delay)?;
        tracing::debug!(widget = self.name, ?id, ?delay, "one-shot timer scheduled");
        self.timers.push(id);
        Some(id)
    }

    /// Cancel one of this widget's timers; returns true if it was still live
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.timers.retain(|t| *t != id);
        self.scheduler.invalidate(id)
    }

    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.scheduler.is_timer_active(id)
    }

    /// Was `id` scheduled by this widget and not yet cancelled?
    pub fn owns_timer(&self, id: TimerId) -> bool {
        self.timers.contains(&id)
    }

    /// Number of live timers owned by this widget
    pub fn timer_count(&self) -> usize {
        self.timers
            .iter()
            .filter(|id| self.scheduler.is_timer_active(**id))
            .count()
    }

    /// Forget a one-shot timer after its fire was delivered
    pub(crate) fn release_spent(&mut self, id: TimerId) {
        if !self.scheduler.is_timer_active(id) {
            self.timers.retain(|t| *t != id);
        }
    }

    /// Cancel every timer and dispose every signal this widget owns
    ///
    /// Returns `(timers cancelled, signals disposed)`.
    pub(crate) fn teardown(&mut self) -> (usize, usize) {
        let timers = self
            .timers
            .drain(..)
            .filter(|id| self.scheduler.invalidate(*id))
            .count();

        let mut graph = self.graph.lock().unwrap_or_else(PoisonError::into_inner);
        let signals = self
            .signals
            .drain(..)
            .filter(|id| graph.dispose_signal(*id))
            .count();
        (timers, signals)
    }
}
