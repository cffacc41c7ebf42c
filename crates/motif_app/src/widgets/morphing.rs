//! Record button that morphs between a wide bar and a round stop button
//!
//! `is_stop` drives the geometry and settles with a single spring.
//! `is_play` drives the icon scale and caption opacity; those properties
//! carry a spring that repeats forever after a short delay, so they keep
//! pulsing after every tap.

use motif_animation::Animation;
use motif_core::{Color, State};
use motif_layout::prelude::*;

use crate::widget::{StateValue, Widget, WidgetContext, WidgetSummary};

pub const NAME: &str = "morphing";

pub const CAPTION: &str = "Recording...";

const ICON: &str = "mic.fill";
const TITLE_SIZE: f32 = 28.0;
const TITLE2_SIZE: f32 = 22.0;
const BUTTON_HEIGHT: f32 = 60.0;
const RING_HEIGHT: f32 = 70.0;
const RING_WIDTH: f32 = 5.0;
/// A trim this short draws nothing but still animates from zero
const HIDDEN_TRIM: f32 = 0.0001;

/// Animation of the `is_stop`-driven geometry
pub fn stop_animation() -> Animation {
    Animation::spring_default()
}

/// Animation of the `is_play`-driven icon scale and caption opacity
pub fn play_animation() -> Animation {
    Animation::spring_default().repeat_forever(true).delay(0.5)
}

pub struct MorphingWidget {
    is_stop: State<bool>,
    is_play: State<bool>,
}

impl MorphingWidget {
    pub fn new(cx: &mut WidgetContext) -> Self {
        Self {
            is_stop: cx.use_state(false),
            is_play: cx.use_state(false),
        }
    }

    pub fn is_stop(&self) -> bool {
        self.is_stop.get()
    }

    pub fn is_play(&self) -> bool {
        self.is_play.get()
    }

    pub fn caption(&self) -> &'static str {
        if self.is_stop() {
            CAPTION
        } else {
            ""
        }
    }
}

impl Widget for MorphingWidget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn view(&self) -> Element {
        let stop = self.is_stop();
        let play = self.is_play();

        let button = rounded_rect(if stop { 30.0 } else { 5.0 })
            .key("button")
            .frame(if stop { 60.0 } else { 250.0 }, BUTTON_HEIGHT)
            .fill(if stop {
                Color::BLUE.gradient()
            } else {
                Color::PURPLE.gradient()
            })
            .animation(stop_animation());

        let mic = icon(ICON)
            .key("mic")
            .font_size(TITLE_SIZE)
            .foreground(Color::WHITE)
            .scale(if play { 0.7 } else { 1.0 })
            .animation(play_animation());

        let ring = rounded_rect(if stop { 35.0 } else { 10.0 })
            .key("ring")
            .trim(0.0, if stop { HIDDEN_TRIM } else { 1.0 })
            .stroke(Color::PURPLE, RING_WIDTH)
            .frame(if stop { 70.0 } else { 260.0 }, RING_HEIGHT)
            .animation(stop_animation());

        let caption = text(self.caption())
            .key("caption")
            .font_size(TITLE2_SIZE)
            .foreground(Color::GRAY)
            .opacity(if play { 0.0 } else { 1.0 })
            .animation(play_animation());

        vstack()
            .key(NAME)
            .child(
                zstack()
                    .key("control")
                    .padding_default()
                    .child(zstack().key("pill").child(button).child(mic))
                    .child(ring),
            )
            .child(caption)
    }

    fn summary(&self) -> WidgetSummary {
        WidgetSummary::from_iter([
            ("is_stop", StateValue::Bool(self.is_stop())),
            ("is_play", StateValue::Bool(self.is_play())),
            ("caption", StateValue::Text(self.caption().to_owned())),
        ])
    }

    fn on_tap(&mut self, cx: &mut WidgetContext) {
        cx.batch(|| {
            self.is_stop.toggle();
            self.is_play.toggle();
        });
        tracing::debug!(
            widget = NAME,
            is_stop = self.is_stop(),
            is_play = self.is_play(),
            "morphing toggled"
        );
    }
}
