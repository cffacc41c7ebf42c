//! The showcase container and its widget roster

use std::fmt;
use std::str::FromStr;

use motif_layout::prelude::*;
use serde::Serialize;

use crate::error::ShowcaseError;
use crate::widget::{Widget, WidgetContext};
use crate::widgets::{
    dot_loader, morphing, progress_loader, scale_effect, spin_loader, DotLoaderWidget,
    MorphingWidget, ProgressLoaderWidget, ScaleEffectWidget, SpinLoaderWidget,
};

/// The widgets of the showcase, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    ScaleEffect,
    SpinLoader,
    ProgressLoader,
    DotLoader,
    Morphing,
}

impl WidgetKind {
    /// Display order inside the container
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::ScaleEffect,
        WidgetKind::SpinLoader,
        WidgetKind::ProgressLoader,
        WidgetKind::DotLoader,
        WidgetKind::Morphing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::ScaleEffect => scale_effect::NAME,
            WidgetKind::SpinLoader => spin_loader::NAME,
            WidgetKind::ProgressLoader => progress_loader::NAME,
            WidgetKind::DotLoader => dot_loader::NAME,
            WidgetKind::Morphing => morphing::NAME,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.name()).collect()
    }

    /// Position in the container
    pub fn index(self) -> usize {
        self as usize
    }

    /// What triggers the widget and what it animates
    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::ScaleEffect => "tap: circle gradient eases in, car icon springs between half and full size",
            WidgetKind::SpinLoader => "appear: purple arc spins forever, one turn per second",
            WidgetKind::ProgressLoader => "appear: ring fills 5% every 0.5 s until 100%, then its timer stops",
            WidgetKind::DotLoader => "appear: five green dots pulse forever, staggered by 0.2 s",
            WidgetKind::Morphing => "tap: record bar springs into a stop button, mic and caption keep pulsing",
        }
    }

    /// Construct a fresh widget with its state registered in `cx`
    pub fn build(self, cx: &mut WidgetContext) -> Box<dyn Widget> {
        match self {
            WidgetKind::ScaleEffect => Box::new(ScaleEffectWidget::new(cx)),
            WidgetKind::SpinLoader => Box::new(SpinLoaderWidget::new(cx)),
            WidgetKind::ProgressLoader => Box::new(ProgressLoaderWidget::new(cx)),
            WidgetKind::DotLoader => Box::new(DotLoaderWidget::new(cx)),
            WidgetKind::Morphing => Box::new(MorphingWidget::new(cx)),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WidgetKind {
    type Err = ShowcaseError;

    /// Accepts the full name or its first word (`spin`, `progress`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        WidgetKind::ALL
            .into_iter()
            .find(|kind| {
                let name = kind.name();
                name == wanted || name.split('_').next() == Some(wanted.as_str())
            })
            .ok_or_else(|| ShowcaseError::UnknownWidget(s.to_owned()))
    }
}

/// The scrolling container that stacks every widget vertically
pub struct ContentView;

impl ContentView {
    pub const KEY: &'static str = "content";

    /// Wrap widget views, given in display order
    pub fn compose(children: impl IntoIterator<Item = Element>) -> Element {
        scroll_view().key(Self::KEY).children(children)
    }
}
