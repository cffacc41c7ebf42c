//! Transition playback
//!
//! A [`Transition`] plays one [`Animation`] descriptor between two values of
//! an animated property. Internally it tracks *progress*: 0.0 presents the
//! old value, 1.0 the new one. Springs may push progress past either end.
//!
//! Phases:
//! 1. Delay - progress stays at 0.0
//! 2. Iterations - timed curves map elapsed time through the easing, springs
//!    integrate towards the leg's end and finish a leg once settled
//! 3. Finished - progress rests at 1.0 (the model value)
//!
//! Autoreversing repeats run every odd iteration backwards; non-reversing
//! repeats jump back to 0.0 at the start of each iteration.

use crate::animation::{Animation, Curve};
use crate::spring::Spring;
use crate::values::Interpolate;

/// An in-flight animation of a single property
#[derive(Clone, Debug)]
pub struct Transition<T: Interpolate> {
    from: T,
    to: T,
    animation: Animation,
    /// Seconds since start, already scaled by speed
    elapsed: f32,
    iteration: u32,
    progress: f32,
    spring: Option<Spring>,
    finished: bool,
}

impl<T: Interpolate> Transition<T> {
    /// Start animating from `from` to `to`
    pub fn new(from: T, to: T, animation: Animation) -> Self {
        let spring = match animation.curve {
            Curve::Spring(config) => {
                let mut spring = Spring::new(config, 0.0);
                spring.set_target(1.0);
                Some(spring)
            }
            Curve::Timed { .. } => None,
        };
        Self {
            from,
            to,
            animation,
            elapsed: 0.0,
            iteration: 0,
            progress: 0.0,
            spring,
            finished: false,
        }
    }

    pub fn from(&self) -> &T {
        &self.from
    }

    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Unit progress between `from` (0.0) and `to` (1.0)
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Zero-based index of the running iteration
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Still waiting out the initial delay
    pub fn is_delayed(&self) -> bool {
        self.elapsed < self.animation.delay_secs
    }

    /// The presented value
    pub fn value(&self) -> T {
        self.from.lerp(&self.to, self.progress)
    }

    /// Advance by `dt` seconds of wall time
    pub fn tick(&mut self, dt: f32) {
        if self.finished || dt <= 0.0 {
            return;
        }

        let before = self.elapsed;
        self.elapsed += dt * self.animation.speed;

        let delay = self.animation.delay_secs;
        if self.elapsed < delay {
            return;
        }
        let active = self.elapsed - before.max(delay);

        match self.animation.curve {
            Curve::Timed {
                easing,
                duration_secs,
            } => self.tick_timed(easing, duration_secs),
            Curve::Spring(_) => self.tick_spring(active),
        }
    }

    fn tick_timed(&mut self, easing: crate::Easing, duration: f32) {
        if duration <= 0.0 {
            self.finish();
            return;
        }

        let local = (self.elapsed - self.animation.delay_secs) / duration;
        let iteration = local.floor() as u32;
        if let Some(total) = self.animation.repeat.iterations() {
            if iteration >= total {
                self.iteration = total - 1;
                self.finish();
                return;
            }
        }

        self.iteration = iteration;
        let eased = easing.apply(local - iteration as f32);
        self.progress = if self.is_reversed_leg() {
            1.0 - eased
        } else {
            eased
        };
    }

    fn tick_spring(&mut self, active: f32) {
        let Some(mut spring) = self.spring else {
            return;
        };

        spring.advance(active);
        self.progress = spring.value();

        if spring.is_settled() {
            let next = self.iteration + 1;
            let done = self
                .animation
                .repeat
                .iterations()
                .is_some_and(|total| next >= total);
            if done {
                self.finish();
                return;
            }

            self.iteration = next;
            if self.is_reversed_leg() {
                spring.set_target(0.0);
            } else {
                if !self.animation.repeat.autoreverses() {
                    spring.reset(0.0);
                }
                spring.set_target(1.0);
            }
            self.progress = spring.value();
        }

        self.spring = Some(spring);
    }

    fn is_reversed_leg(&self) -> bool {
        self.animation.repeat.autoreverses() && self.iteration % 2 == 1
    }

    fn finish(&mut self) {
        self.finished = true;
        self.progress = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Animation;

    const FRAME: f32 = 1.0 / 60.0;

    fn run<T: Interpolate>(t: &mut Transition<T>, secs: f32) {
        let frames = (secs / FRAME).round() as u32;
        for _ in 0..frames {
            t.tick(FRAME);
        }
    }

    #[test]
    fn test_linear_once_finishes_at_target() {
        let mut t = Transition::new(0.0f32, 100.0, Animation::linear(1.0));
        t.tick(0.25);
        assert!((t.value() - 25.0).abs() < 1e-3);
        assert!(!t.is_finished());

        t.tick(0.8);
        assert!(t.is_finished());
        assert_eq!(t.value(), 100.0);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut t = Transition::new(1.0f32, 0.0, Animation::linear(0.6).delay(0.4));
        t.tick(0.3);
        assert!(t.is_delayed());
        assert_eq!(t.value(), 1.0);

        // 0.1 of delay left, then 0.3 into the first iteration
        t.tick(0.4);
        assert!(!t.is_delayed());
        assert!((t.value() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_repeat_forever_without_reverse_wraps() {
        let mut t = Transition::new(0.0f32, 360.0, Animation::linear(1.0).repeat_forever(false));
        t.tick(0.5);
        assert!((t.value() - 180.0).abs() < 1e-2);

        t.tick(1.0);
        assert_eq!(t.iteration(), 1);
        assert!((t.value() - 180.0).abs() < 1e-2);

        t.tick(100.0);
        assert!(!t.is_finished());
    }

    #[test]
    fn test_repeat_forever_autoreverse_runs_back() {
        let mut t = Transition::new(1.0f32, 0.0, Animation::linear(0.6).repeat_forever(true));
        t.tick(0.6 + 0.15);
        assert_eq!(t.iteration(), 1);
        // Second leg runs from 0.0 back towards 1.0
        assert!((t.value() - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_repeat_count_stops() {
        let mut t = Transition::new(0.0f32, 1.0, Animation::linear(0.5).repeat_count(3, true));
        t.tick(1.2);
        assert!(!t.is_finished());
        assert_eq!(t.iteration(), 2);
        t.tick(0.5);
        assert!(t.is_finished());
        assert_eq!(t.value(), 1.0);
    }

    #[test]
    fn test_speed_scales_time() {
        let mut t = Transition::new(0.0f32, 1.0, Animation::linear(1.0).speed(2.0));
        t.tick(0.25);
        assert!((t.value() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_spring_settles_and_finishes() {
        let mut t = Transition::new(5.0f32, 30.0, Animation::spring_default());
        run(&mut t, 2.0);
        assert!(t.is_finished());
        assert_eq!(t.value(), 30.0);
    }

    #[test]
    fn test_spring_forever_keeps_pulsing() {
        let mut t = Transition::new(
            1.0f32,
            0.7,
            Animation::spring_default().repeat_forever(true).delay(0.5),
        );
        run(&mut t, 0.4);
        assert_eq!(t.value(), 1.0);

        run(&mut t, 6.0);
        assert!(!t.is_finished());
        assert!(t.iteration() >= 2, "iteration {}", t.iteration());
        let v = t.value();
        assert!(v > 0.6 && v < 1.1, "value {v}");
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut t = Transition::new(0.0f32, 1.0, Animation::linear(0.0).repeat_forever(true));
        t.tick(FRAME);
        assert!(t.is_finished());
        assert_eq!(t.value(), 1.0);
    }
}
