//! Periodic and one-shot timers on the scheduler's virtual clock

use slotmap::new_key_type;
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

/// A scheduled timer
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    interval: Duration,
    next_fire: Duration,
    repeats: bool,
    fire_count: u64,
    /// Registration order, breaks ties between timers due at the same instant
    seq: u64,
}

impl Timer {
    pub(crate) fn new(now: Duration, interval: Duration, repeats: bool, seq: u64) -> Self {
        Self {
            interval,
            next_fire: now + interval,
            repeats,
            fire_count: 0,
            seq,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_fire(&self) -> Duration {
        self.next_fire
    }

    pub fn repeats(&self) -> bool {
        self.repeats
    }

    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }

    pub(crate) fn order_key(&self) -> (Duration, u64) {
        (self.next_fire, self.seq)
    }

    /// Record a fire; returns false when a one-shot timer is spent
    pub(crate) fn fire(&mut self) -> bool {
        self.fire_count += 1;
        if self.repeats {
            // A zero interval would fire forever within one frame
            self.next_fire += self.interval.max(Duration::from_millis(1));
        }
        self.repeats
    }
}

/// One delivery of a timer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFire {
    pub id: TimerId,
    /// Virtual time at which the timer fired
    pub at: Duration,
    /// 1-based count of fires so far
    pub count: u64,
}
