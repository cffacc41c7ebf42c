//! Five pulsing dots with staggered delays

use motif_animation::Animation;
use motif_core::{Color, State};
use motif_layout::prelude::*;

use crate::widget::{StateValue, Widget, WidgetContext, WidgetSummary};

pub const NAME: &str = "dot_loader";

pub const DOT_COUNT: usize = 5;

/// Delay added per dot, in seconds
pub const STAGGER: f32 = 0.2;

const DOT_SIZE: f32 = 10.0;
const PULSE_DURATION: f32 = 0.6;
const VERTICAL_PADDING: f32 = 8.0;

/// Pulse of dot `index`: shrink and grow forever, offset by its position
pub fn dot_animation(index: usize) -> Animation {
    Animation::linear(PULSE_DURATION)
        .repeat_forever(true)
        .delay(STAGGER * index as f32)
}

pub fn dot_key(index: usize) -> String {
    format!("dot{index}")
}

pub struct DotLoaderWidget {
    is_dot_loading: State<bool>,
}

impl DotLoaderWidget {
    pub fn new(cx: &mut WidgetContext) -> Self {
        Self {
            is_dot_loading: cx.use_state(false),
        }
    }

    pub fn is_dot_loading(&self) -> bool {
        self.is_dot_loading.get()
    }
}

impl Widget for DotLoaderWidget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn view(&self) -> Element {
        let scale = if self.is_dot_loading() { 0.0 } else { 1.0 };
        let dots = (0..DOT_COUNT).map(|i| {
            circle()
                .key(dot_key(i))
                .frame(DOT_SIZE, DOT_SIZE)
                .fill(Color::GREEN.gradient())
                .scale(scale)
                .animation(dot_animation(i))
        });

        hstack()
            .key(NAME)
            .padding_vertical(VERTICAL_PADDING)
            .children(dots)
    }

    fn summary(&self) -> WidgetSummary {
        WidgetSummary::from_iter([("is_dot_loading", StateValue::Bool(self.is_dot_loading()))])
    }

    fn on_appear(&mut self, _cx: &mut WidgetContext) {
        if self.is_dot_loading() {
            return;
        }
        self.is_dot_loading.set(true);
        tracing::debug!(widget = NAME, "dots started");
    }
}
