//! Animation descriptors
//!
//! An [`Animation`] describes *how* a property moves from its old value to
//! its new one: the curve, an initial delay, a repeat policy and a speed
//! multiplier. Descriptors are plain values attached to element nodes; the
//! repeat policy belongs to the descriptor, so a looping animation is
//! declared once and keeps running no matter how often the triggering state
//! is written.
//!
//! ```
//! use motif_animation::{Animation, Repeat};
//!
//! let spin = Animation::linear(1.0).repeat_forever(false);
//! assert_eq!(spin.repeat, Repeat::Forever { autoreverses: false });
//!
//! let dot = Animation::linear(0.6).repeat_forever(true).delay(0.4);
//! assert_eq!(dot.delay_secs, 0.4);
//! ```

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// Default duration of the named easing curves, in seconds
pub const DEFAULT_DURATION: f32 = 0.35;

/// How progress evolves over one iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Fixed duration with an easing function
    Timed { easing: Easing, duration_secs: f32 },
    /// Physically simulated; an iteration ends when the spring settles
    Spring(SpringConfig),
}

/// Repeat policy of an animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Play a single iteration
    #[default]
    Once,
    /// Play `count` iterations in total
    Count { count: u32, autoreverses: bool },
    /// Loop until the property is retargeted or the node goes away
    Forever { autoreverses: bool },
}

impl Repeat {
    /// Whether odd iterations run backwards
    pub fn autoreverses(&self) -> bool {
        match *self {
            Repeat::Once => false,
            Repeat::Count { autoreverses, .. } | Repeat::Forever { autoreverses } => autoreverses,
        }
    }

    /// Total iterations, `None` for infinite
    pub fn iterations(&self) -> Option<u32> {
        match *self {
            Repeat::Once => Some(1),
            Repeat::Count { count, .. } => Some(count.max(1)),
            Repeat::Forever { .. } => None,
        }
    }
}

/// A declared curve, delay, repeat policy and speed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    pub curve: Curve,
    /// Delay before the first iteration; not repeated per iteration
    pub delay_secs: f32,
    pub repeat: Repeat,
    /// Playback rate multiplier (2.0 = twice as fast)
    pub speed: f32,
}

impl Animation {
    fn with_curve(curve: Curve) -> Self {
        Self {
            curve,
            delay_secs: 0.0,
            repeat: Repeat::Once,
            speed: 1.0,
        }
    }

    /// Timed animation with an explicit easing
    pub fn timed(easing: Easing, duration_secs: f32) -> Self {
        Self::with_curve(Curve::Timed {
            easing,
            duration_secs: duration_secs.max(0.0),
        })
    }

    pub fn linear(duration_secs: f32) -> Self {
        Self::timed(Easing::Linear, duration_secs)
    }

    /// Ease-in over the default duration
    pub fn ease_in() -> Self {
        Self::timed(Easing::EaseIn, DEFAULT_DURATION)
    }

    /// Ease-out over the default duration
    pub fn ease_out() -> Self {
        Self::timed(Easing::EaseOut, DEFAULT_DURATION)
    }

    /// Ease-in-out over the default duration
    pub fn ease_in_out() -> Self {
        Self::timed(Easing::EaseInOut, DEFAULT_DURATION)
    }

    /// Spring from a response time and damping fraction
    pub fn spring(response: f32, damping_fraction: f32) -> Self {
        Self::with_curve(Curve::Spring(SpringConfig::from_response(
            response,
            damping_fraction,
        )))
    }

    /// The platform default spring
    pub fn spring_default() -> Self {
        Self::with_curve(Curve::Spring(SpringConfig::standard()))
    }

    /// Delay the start by `secs`
    pub fn delay(mut self, secs: f32) -> Self {
        self.delay_secs = secs.max(0.0);
        self
    }

    /// Repeat indefinitely
    pub fn repeat_forever(mut self, autoreverses: bool) -> Self {
        self.repeat = Repeat::Forever { autoreverses };
        self
    }

    /// Repeat for `count` iterations in total
    pub fn repeat_count(mut self, count: u32, autoreverses: bool) -> Self {
        self.repeat = Repeat::Count {
            count,
            autoreverses,
        };
        self
    }

    /// Scale playback speed
    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(f32::EPSILON);
        self
    }

    /// Whether the animation never finishes on its own
    pub fn is_infinite(&self) -> bool {
        matches!(self.repeat, Repeat::Forever { .. })
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::ease_in_out()
    }
}
