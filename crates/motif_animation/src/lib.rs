//! Motif Animation System
//!
//! Declarative animation descriptors and the machinery that plays them.
//!
//! # Features
//!
//! - **Descriptors**: [`Animation`] = curve + delay + repeat policy + speed
//! - **Spring Physics**: RK4-integrated springs configured by response and
//!   damping fraction
//! - **Easing**: cubic-bezier timing curves
//! - **Transitions**: per-property playback between an old and a new value,
//!   including delayed, autoreversing and infinitely repeating animations
//! - **Timers**: periodic and one-shot timers on a deterministic virtual clock

pub mod animation;
pub mod easing;
pub mod scheduler;
pub mod spring;
pub mod timer;
pub mod transition;
pub mod values;

pub use animation::{Animation, Curve, Repeat, DEFAULT_DURATION};
pub use easing::Easing;
pub use scheduler::{AnimationScheduler, SchedulerHandle};
pub use spring::{Spring, SpringConfig};
pub use timer::{Timer, TimerFire, TimerId};
pub use transition::Transition;
pub use values::Interpolate;
