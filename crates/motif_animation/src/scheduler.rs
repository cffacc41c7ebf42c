//! Animation scheduler
//!
//! Owns the virtual clock every frame is measured against, and the timers
//! widgets schedule through a [`SchedulerHandle`].
//!
//! The clock only moves when the host advances it, which keeps headless runs
//! deterministic. Due timers are delivered one at a time through
//! [`AnimationScheduler::pop_due`], so a handler that invalidates its own
//! timer is guaranteed never to see another fire from it, even when a long
//! frame spans several intervals.

use crate::timer::{Timer, TimerFire, TimerId};
use slotmap::SlotMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Internal state of the animation scheduler
struct SchedulerInner {
    timers: SlotMap<TimerId, Timer>,
    now: Duration,
    frame_count: u64,
    next_seq: u64,
}

impl SchedulerInner {
    fn insert(&mut self, interval: Duration, repeats: bool) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers
            .insert(Timer::new(self.now, interval, repeats, seq))
    }
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that drives the clock and timers
///
/// Typically held by the app runtime and shared with widgets via
/// [`SchedulerHandle`].
///
/// ```
/// use motif_animation::AnimationScheduler;
/// use std::time::Duration;
///
/// let scheduler = AnimationScheduler::new();
/// let handle = scheduler.handle();
/// let timer = handle.schedule_repeating(Duration::from_millis(500)).unwrap();
///
/// let fires = scheduler.advance(Duration::from_secs(1));
/// assert_eq!(fires.len(), 2);
/// assert!(fires.iter().all(|f| f.id == timer));
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                timers: SlotMap::with_key(),
                now: Duration::ZERO,
                frame_count: 0,
                next_seq: 0,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to widgets
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        lock(&self.inner).now
    }

    /// Number of completed frames
    pub fn frame_count(&self) -> u64 {
        lock(&self.inner).frame_count
    }

    /// Deadline of a frame lasting `dt` from now
    pub fn deadline(&self, dt: Duration) -> Duration {
        lock(&self.inner).now + dt
    }

    /// Pop the earliest timer due at or before `deadline`
    ///
    /// Moves the clock to the fire time and reschedules repeating timers.
    /// The lock is released before returning, so the caller may dispatch
    /// the fire to code that schedules or invalidates timers.
    pub fn pop_due(&self, deadline: Duration) -> Option<TimerFire> {
        let mut inner = lock(&self.inner);

        let (id, _) = inner
            .timers
            .iter()
            .filter(|(_, t)| t.next_fire() <= deadline)
            .min_by_key(|(_, t)| t.order_key())?;

        let timer = inner.timers.get_mut(id)?;
        let at = timer.next_fire();
        let keep = timer.fire();
        let count = timer.fire_count();
        if !keep {
            inner.timers.remove(id);
        }
        inner.now = inner.now.max(at);

        tracing::trace!(?id, ?at, count, "timer fired");
        Some(TimerFire { id, at, count })
    }

    /// Close the frame at `deadline`
    pub fn finish_frame(&self, deadline: Duration) {
        let mut inner = lock(&self.inner);
        inner.now = inner.now.max(deadline);
        inner.frame_count += 1;
    }

    /// Advance the clock by `dt`, collecting every fire due in between
    ///
    /// Fires are collected before anyone reacts to them; hosts that dispatch
    /// fires to handlers should use [`pop_due`](Self::pop_due) instead.
    pub fn advance(&self, dt: Duration) -> Vec<TimerFire> {
        let deadline = self.deadline(dt);
        let mut fires = Vec::new();
        while let Some(fire) = self.pop_due(deadline) {
            fires.push(fire);
        }
        self.finish_frame(deadline);
        fires
    }

    /// Number of live timers
    pub fn timer_count(&self) -> usize {
        lock(&self.inner).timers.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to widgets that need timers. It won't keep the scheduler alive;
/// every operation no-ops once the scheduler is dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Schedule a timer firing every `interval`, first fire one interval from now
    pub fn schedule_repeating(&self, interval: Duration) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).insert(interval, true))
    }

    /// Schedule a timer firing once, `delay` from now
    pub fn schedule_once(&self, delay: Duration) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).insert(delay, false))
    }

    /// Cancel a timer; returns true if it was still scheduled
    pub fn invalidate(&self, id: TimerId) -> bool {
        let removed = self
            .inner
            .upgrade()
            .is_some_and(|inner| lock(&inner).timers.remove(id).is_some());
        if removed {
            tracing::debug!(?id, "timer invalidated");
        }
        removed
    }

    /// Check whether a timer is still scheduled
    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| lock(&inner).timers.contains_key(id))
    }

    /// Current virtual time
    pub fn now(&self) -> Option<Duration> {
        self.inner.upgrade().map(|inner| lock(&inner).now)
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF: Duration = Duration::from_millis(500);

    #[test]
    fn test_repeating_timer_fires_on_interval() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.schedule_repeating(HALF).unwrap();

        assert!(scheduler.advance(Duration::from_millis(499)).is_empty());
        let fires = scheduler.advance(Duration::from_millis(1));
        assert_eq!(
            fires,
            vec![TimerFire {
                id,
                at: HALF,
                count: 1
            }]
        );
        assert_eq!(scheduler.timer_count(), 1);
    }

    #[test]
    fn test_long_frame_fires_in_order() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let fast = handle.schedule_repeating(Duration::from_millis(300)).unwrap();
        let slow = handle.schedule_repeating(HALF).unwrap();

        let fires = scheduler.advance(Duration::from_secs(1));
        let order: Vec<_> = fires.iter().map(|f| (f.id, f.at.as_millis())).collect();
        assert_eq!(
            order,
            vec![(fast, 300), (slow, 500), (fast, 600), (fast, 900), (slow, 1000)]
        );
        assert_eq!(scheduler.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalidate_between_pops_stops_delivery() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let id = handle.schedule_repeating(HALF).unwrap();

        let deadline = scheduler.deadline(Duration::from_secs(3));
        let first = scheduler.pop_due(deadline).unwrap();
        assert_eq!(first.count, 1);

        assert!(handle.invalidate(id));
        assert!(!handle.is_timer_active(id));
        assert_eq!(scheduler.pop_due(deadline), None);
        scheduler.finish_frame(deadline);

        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
        assert!(!handle.invalidate(id));
    }

    #[test]
    fn test_one_shot_timer_is_removed() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        handle.schedule_once(HALF).unwrap();

        assert_eq!(scheduler.advance(Duration::from_secs(2)).len(), 1);
        assert_eq!(scheduler.timer_count(), 0);
    }

    #[test]
    fn test_timers_start_from_current_time() {
        let scheduler = AnimationScheduler::new();
        scheduler.advance(Duration::from_millis(700));

        let id = scheduler.handle().schedule_repeating(HALF).unwrap();
        let fires = scheduler.advance(Duration::from_millis(500));
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].id, id);
        assert_eq!(fires[0].at, Duration::from_millis(1200));
        assert_eq!(scheduler.frame_count(), 2);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle.schedule_repeating(HALF).is_none());
        assert_eq!(handle.now(), None);
    }
}
