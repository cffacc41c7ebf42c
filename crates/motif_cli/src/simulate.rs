//! Scripted showcase simulation
//!
//! Mounts the showcase, fires appearance once, then steps the app at a fixed
//! frame rate, delivering scripted taps when virtual time reaches them.
//!
//! Frame `n` always ends at exactly `n / fps` seconds, so timer boundaries
//! and tap times line up with frames regardless of the rate.

use std::fmt;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use motif_app::{ShowcaseApp, ShowcaseConfig, WidgetKind};
use tracing::{info, warn};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A tap on `widget` at `at` of virtual time, written `morphing@1.5`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapSpec {
    pub widget: WidgetKind,
    pub at: Duration,
}

impl FromStr for TapSpec {
    type Err = String;

    /// `widget@seconds`; a bare widget name taps at time zero
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, at) = s.split_once('@').unwrap_or((s, "0"));
        let widget = name.parse::<WidgetKind>().map_err(|e| e.to_string())?;
        let secs = at
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid tap time '{at}': {e}"))?;
        let at = Duration::try_from_secs_f64(secs)
            .map_err(|_| format!("tap time must be a non-negative number, got '{at}'"))?;
        Ok(Self { widget, at })
    }
}

impl fmt::Display for TapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.widget, self.at.as_secs_f64())
    }
}

pub struct Simulation {
    app: ShowcaseApp,
    fps: u32,
    /// Frames stepped so far
    frame: u64,
    /// Pending taps, sorted by time
    taps: Vec<TapSpec>,
    next_tap: usize,
    realtime: bool,
    /// Wall-clock instant of frame zero, set on the first paced step
    wall_start: Option<Instant>,
}

impl Simulation {
    pub fn new(config: ShowcaseConfig, fps: u32, mut taps: Vec<TapSpec>) -> Result<Self> {
        if fps == 0 {
            anyhow::bail!("fps must be at least 1");
        }
        taps.sort_by_key(|tap| tap.at);

        let mut app = ShowcaseApp::with_config(config);
        app.mount();
        app.appear_all();

        Ok(Self {
            app,
            fps,
            frame: 0,
            taps,
            next_tap: 0,
            realtime: false,
            wall_start: None,
        })
    }

    /// Pace frames against the wall clock instead of running flat out
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn app(&self) -> &ShowcaseApp {
        &self.app
    }

    /// Number of frames covering `secs` of virtual time
    pub fn frames_for(&self, secs: f32) -> u64 {
        (f64::from(secs.max(0.0)) * f64::from(self.fps)).round() as u64
    }

    /// Virtual time at which frame `n` ends
    pub fn frame_time(&self, n: u64) -> Duration {
        let nanos = u128::from(n) * NANOS_PER_SEC / u128::from(self.fps);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Deliver due taps, then advance one frame
    pub fn step(&mut self) -> Result<()> {
        let wall_start = self
            .realtime
            .then(|| *self.wall_start.get_or_insert_with(Instant::now));
        self.deliver_taps()?;

        let target = self.frame_time(self.frame + 1);
        self.app.advance(target.saturating_sub(self.app.now()));
        self.frame += 1;

        if let Some(start) = wall_start {
            if let Some(wait) = (start + target).checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }
        Ok(())
    }

    /// Step until `secs` of virtual time, calling `on_frame` after each frame
    /// with the frame number
    pub fn run_for(
        &mut self,
        secs: f32,
        mut on_frame: impl FnMut(&ShowcaseApp, u64) -> Result<()>,
    ) -> Result<()> {
        let frames = self.frames_for(secs);
        info!(frames, fps = self.fps, taps = self.taps.len(), "simulating");

        for frame in 1..=frames {
            self.step()?;
            on_frame(&self.app, frame)?;
        }
        self.deliver_taps()?;

        for tap in &self.taps[self.next_tap..] {
            warn!(%tap, "tap after the end of the run, ignored");
        }
        Ok(())
    }

    fn deliver_taps(&mut self) -> Result<()> {
        let now = self.app.now();
        while let Some(tap) = self.taps.get(self.next_tap).copied() {
            if tap.at > now {
                break;
            }
            self.app.tap(tap.widget)?;
            info!(%tap, ?now, "tap delivered");
            self.next_tap += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_app::StateValue;

    #[test]
    fn test_parse_tap() {
        let tap: TapSpec = "morphing@1.5".parse().unwrap();
        assert_eq!(tap.widget, WidgetKind::Morphing);
        assert_eq!(tap.at, Duration::from_millis(1500));

        let tap: TapSpec = "dot@0.1".parse().unwrap();
        assert_eq!(tap.at, Duration::from_millis(100));

        let tap: TapSpec = "scale".parse().unwrap();
        assert_eq!(tap.widget, WidgetKind::ScaleEffect);
        assert_eq!(tap.at, Duration::ZERO);
        assert_eq!(tap.to_string(), "scale_effect@0");

        assert!("morphing@soon".parse::<TapSpec>().is_err());
        assert!("morphing@-1".parse::<TapSpec>().is_err());
        assert!("morphing@inf".parse::<TapSpec>().is_err());
        assert!("slider@1".parse::<TapSpec>().unwrap_err().contains("unknown widget"));
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(Simulation::new(ShowcaseConfig::default(), 0, Vec::new()).is_err());
    }

    #[test]
    fn test_frame_times_are_exact() {
        for fps in [24, 30, 60, 120, 144] {
            let sim = Simulation::new(ShowcaseConfig::default(), fps, Vec::new()).unwrap();
            let frames = sim.frames_for(5.0);
            assert_eq!(frames, 5 * u64::from(fps));
            assert_eq!(sim.frame_time(frames), Duration::from_secs(5), "fps {fps}");
        }
    }

    #[test]
    fn test_taps_land_in_time_order() {
        for fps in [20, 30] {
            let taps = vec![
                "morphing@1".parse().unwrap(),
                "morphing@0.5".parse().unwrap(),
                "scale@0.25".parse().unwrap(),
            ];
            let mut sim = Simulation::new(ShowcaseConfig::default(), fps, taps).unwrap();

            let mut stop_flags = Vec::new();
            sim.run_for(1.5, |app, _| {
                let summary = app.summary(WidgetKind::Morphing)?;
                stop_flags.push(summary["is_stop"] == StateValue::Bool(true));
                Ok(())
            })
            .unwrap();

            // Taps are delivered before the frame that starts at their time
            let half = fps as usize / 2;
            let full = fps as usize;
            assert_eq!(stop_flags.len(), full * 3 / 2, "fps {fps}");
            assert!(!stop_flags[half - 1], "fps {fps}");
            assert!(stop_flags[half], "fps {fps}");
            assert!(stop_flags[full - 1], "fps {fps}");
            assert!(!stop_flags[full], "fps {fps}");

            let scale = sim.app().summary(WidgetKind::ScaleEffect).unwrap();
            assert_eq!(scale["car_size_changed"], StateValue::Bool(true));
        }
    }

    #[test]
    fn test_progress_after_five_seconds() {
        for fps in [10, 24, 30, 60, 120, 144] {
            let mut sim = Simulation::new(ShowcaseConfig::default(), fps, Vec::new()).unwrap();
            sim.run_for(5.0, |_, _| Ok(())).unwrap();

            assert_eq!(sim.app().now(), Duration::from_secs(5), "fps {fps}");
            let summary = sim.app().summary(WidgetKind::ProgressLoader).unwrap();
            assert_eq!(summary["percent"], StateValue::Number(50.0), "fps {fps}");
        }
    }

    #[test]
    fn test_clock_stays_exact_over_long_runs() {
        let mut sim = Simulation::new(ShowcaseConfig::default(), 144, Vec::new()).unwrap();
        sim.run_for(60.0, |_, _| Ok(())).unwrap();
        assert_eq!(sim.app().now(), Duration::from_secs(60));
    }
}
