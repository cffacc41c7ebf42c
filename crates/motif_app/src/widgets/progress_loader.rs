//! Progress ring filled by a periodic timer
//!
//! Progress is kept as a whole number of ticks and derived on read, so the
//! ring reaches exactly 1.0 on the last tick and the label never shows more
//! than 100%.

use std::time::Duration;

use motif_animation::{TimerFire, TimerId};
use motif_core::{Color, State};
use motif_layout::prelude::*;

use crate::widget::{StateValue, Widget, WidgetContext, WidgetSummary};

pub const NAME: &str = "progress_loader";

/// Time between progress steps
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Ticks needed to fill the ring, 0.05 each
pub const TICKS_TO_COMPLETE: u32 = 20;

const RING_SIZE: f32 = 150.0;
const LINE_WIDTH: f32 = 10.0;

pub struct ProgressLoaderWidget {
    ticks: State<u32>,
    /// Declared alongside progress but never driven
    is_loading_progress: State<bool>,
    timer: Option<TimerId>,
}

impl ProgressLoaderWidget {
    pub fn new(cx: &mut WidgetContext) -> Self {
        Self {
            ticks: cx.use_state(0),
            is_loading_progress: cx.use_state(false),
            timer: None,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    /// Fraction of the ring filled, in `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        self.ticks().min(TICKS_TO_COMPLETE) as f32 / TICKS_TO_COMPLETE as f32
    }

    /// Whole percent shown in the label
    pub fn percent(&self) -> u32 {
        self.ticks().min(TICKS_TO_COMPLETE) * 100 / TICKS_TO_COMPLETE
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn is_complete(&self) -> bool {
        self.ticks() >= TICKS_TO_COMPLETE
    }

    pub fn is_loading_progress(&self) -> bool {
        self.is_loading_progress.get()
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}

impl Widget for ProgressLoaderWidget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn view(&self) -> Element {
        zstack()
            .key(NAME)
            .padding_default()
            .child(text(self.label()).key("label"))
            .child(
                circle()
                    .key("track")
                    .stroke(Color::SYSTEM_GRAY5, LINE_WIDTH)
                    .frame(RING_SIZE, RING_SIZE),
            )
            .child(
                circle()
                    .key("arc")
                    .trim(0.0, self.progress())
                    .stroke(Color::PURPLE, LINE_WIDTH)
                    .frame(RING_SIZE, RING_SIZE)
                    .rotation(-90.0),
            )
    }

    fn summary(&self) -> WidgetSummary {
        WidgetSummary::from_iter([
            ("progress", StateValue::from(self.progress())),
            ("percent", StateValue::from(self.percent())),
            ("is_loading_progress", StateValue::Bool(self.is_loading_progress())),
            ("timer_active", StateValue::Bool(self.timer.is_some())),
        ])
    }

    fn on_appear(&mut self, cx: &mut WidgetContext) {
        if self.timer.is_some() || self.is_complete() {
            tracing::debug!(widget = NAME, "already ticking or done, appearance ignored");
            return;
        }
        self.timer = cx.schedule_repeating(TICK_INTERVAL);
    }

    fn on_timer(&mut self, cx: &mut WidgetContext, fire: TimerFire) {
        if self.timer != Some(fire.id) {
            tracing::warn!(widget = NAME, id = ?fire.id, "fire from a foreign timer ignored");
            return;
        }

        self.ticks.update(|t| t + 1);
        tracing::debug!(widget = NAME, percent = self.percent(), "progress tick");

        if self.is_complete() {
            cx.cancel_timer(fire.id);
            self.timer = None;
            tracing::info!(widget = NAME, ticks = self.ticks(), "progress complete, timer cancelled");
        }
    }

    fn on_disappear(&mut self, cx: &mut WidgetContext) {
        if let Some(id) = self.timer.take() {
            cx.cancel_timer(id);
        }
    }
}
