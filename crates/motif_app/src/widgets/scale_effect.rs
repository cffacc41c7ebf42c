//! Tap-to-toggle circle with a scaling, recoloring icon

use motif_animation::Animation;
use motif_core::{Brush, Color, LinearGradient, Point, State};
use motif_layout::prelude::*;

use crate::widget::{StateValue, Widget, WidgetContext, WidgetSummary};

pub const NAME: &str = "scale_effect";

const CIRCLE_SIZE: f32 = 200.0;
const ICON: &str = "bolt.car.fill";
const ICON_SIZE: f32 = 100.0;

/// Red to yellow, from the center towards the bottom-trailing corner
pub fn first_gradient() -> Brush {
    LinearGradient::from_colors(&[Color::RED, Color::YELLOW], Point::CENTER, Point::BOTTOM_TRAILING)
        .into()
}

/// Purple to indigo, from the top edge to the center
pub fn second_gradient() -> Brush {
    LinearGradient::from_colors(&[Color::PURPLE, Color::INDIGO], Point::TOP, Point::CENTER).into()
}

/// Three booleans flipped together by every tap
pub struct ScaleEffectWidget {
    circle_color_changed: State<bool>,
    car_color_changed: State<bool>,
    car_size_changed: State<bool>,
}

impl ScaleEffectWidget {
    pub fn new(cx: &mut WidgetContext) -> Self {
        Self {
            circle_color_changed: cx.use_state(false),
            car_color_changed: cx.use_state(false),
            car_size_changed: cx.use_state(false),
        }
    }

    pub fn circle_color_changed(&self) -> bool {
        self.circle_color_changed.get()
    }

    pub fn car_color_changed(&self) -> bool {
        self.car_color_changed.get()
    }

    pub fn car_size_changed(&self) -> bool {
        self.car_size_changed.get()
    }
}

impl Widget for ScaleEffectWidget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn view(&self) -> Element {
        let circle_fill = if self.circle_color_changed() {
            first_gradient()
        } else {
            second_gradient()
        };

        zstack()
            .key(NAME)
            .child(
                circle()
                    .key("circle")
                    .fill(circle_fill)
                    .frame(CIRCLE_SIZE, CIRCLE_SIZE)
                    .animation(Animation::ease_in()),
            )
            .child(
                icon(ICON)
                    .key("car")
                    .foreground(if self.car_color_changed() {
                        Color::YELLOW
                    } else {
                        Color::WHITE
                    })
                    .font_size(ICON_SIZE)
                    .scale(if self.car_size_changed() { 1.0 } else { 0.5 })
                    .animation(Animation::spring(0.3, 0.3)),
            )
    }

    fn summary(&self) -> WidgetSummary {
        WidgetSummary::from_iter([
            ("circle_color_changed", StateValue::Bool(self.circle_color_changed())),
            ("car_color_changed", StateValue::Bool(self.car_color_changed())),
            ("car_size_changed", StateValue::Bool(self.car_size_changed())),
        ])
    }

    fn on_tap(&mut self, cx: &mut WidgetContext) {
        cx.batch(|| {
            self.circle_color_changed.toggle();
            self.car_color_changed.toggle();
            self.car_size_changed.toggle();
        });
        tracing::debug!(
            widget = NAME,
            toggled = self.circle_color_changed(),
            "scale effect toggled"
        );
    }
}
