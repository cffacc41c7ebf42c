//! Spinning arc over a gray track

use motif_animation::Animation;
use motif_core::{Color, State};
use motif_layout::prelude::*;

use crate::widget::{StateValue, Widget, WidgetContext, WidgetSummary};

pub const NAME: &str = "spin_loader";

const RING_SIZE: f32 = 100.0;
const TRACK_WIDTH: f32 = 14.0;
const ARC_WIDTH: f32 = 7.0;
const ARC_LENGTH: f32 = 0.2;

/// One full turn per second, restarting from zero
pub fn spin_animation() -> Animation {
    Animation::linear(1.0).repeat_forever(false)
}

pub struct SpinLoaderWidget {
    is_loading: State<bool>,
}

impl SpinLoaderWidget {
    pub fn new(cx: &mut WidgetContext) -> Self {
        Self {
            is_loading: cx.use_state(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }
}

impl Widget for SpinLoaderWidget {
    fn name(&self) -> &'static str {
        NAME
    }

    fn view(&self) -> Element {
        zstack()
            .key(NAME)
            .padding_default()
            .child(
                circle()
                    .key("track")
                    .stroke(Color::SYSTEM_GRAY5, TRACK_WIDTH)
                    .frame(RING_SIZE, RING_SIZE),
            )
            .child(
                circle()
                    .key("arc")
                    .trim(0.0, ARC_LENGTH)
                    .stroke(Color::PURPLE, ARC_WIDTH)
                    .frame(RING_SIZE, RING_SIZE)
                    .rotation(if self.is_loading() { 360.0 } else { 0.0 })
                    .animation(spin_animation()),
            )
    }

    fn summary(&self) -> WidgetSummary {
        WidgetSummary::from_iter([("is_loading", StateValue::Bool(self.is_loading()))])
    }

    fn on_appear(&mut self, _cx: &mut WidgetContext) {
        // The repeat lives on the arc's animation; flipping again would restart it
        if self.is_loading() {
            return;
        }
        self.is_loading.set(true);
        tracing::debug!(widget = NAME, "spinner started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_context;

    #[test]
    fn test_loading_starts_once() {
        let (_scheduler, mut cx) = test_context(NAME);
        let mut widget = SpinLoaderWidget::new(&mut cx);
        assert!(!widget.is_loading());
        cx.take_dirty();

        widget.on_appear(&mut cx);
        assert!(widget.is_loading());
        assert!(cx.take_dirty());

        // A second appearance must not touch state
        widget.on_appear(&mut cx);
        assert!(widget.is_loading());
        assert!(!cx.take_dirty());
    }

    #[test]
    fn test_arc_geometry() {
        let (_scheduler, mut cx) = test_context(NAME);
        let mut widget = SpinLoaderWidget::new(&mut cx);
        assert_eq!(widget.view().find("arc").unwrap().style.rotation, 0.0);

        widget.on_appear(&mut cx);
        let view = widget.view();
        let arc = view.find("arc").unwrap();
        assert_eq!(arc.style.rotation, 360.0);
        assert_eq!((arc.style.trim_start, arc.style.trim_end), (0.0, 0.2));
        assert_eq!(arc.animation, Some(spin_animation()));
        assert!(arc.animation.is_some_and(|a| a.is_infinite() && !a.repeat.autoreverses()));

        let track = view.find("track").unwrap();
        assert_eq!(track.style.stroke.map(|s| s.width), Some(TRACK_WIDTH));
        assert!(track.animation.is_none());
    }
}
