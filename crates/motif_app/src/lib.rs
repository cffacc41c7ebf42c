//! Motif Showcase
//!
//! Five self-contained animated widgets stacked in a scroll view, driven
//! headlessly on a virtual clock.
//!
//! Each widget keeps local [`State`](motif_core::State), maps it to an
//! element tree, and mutates it from tap, appearance or timer triggers. The
//! runtime diff-animates between successive trees using the animation each
//! element declares.
//!
//! # Example
//!
//! ```rust
//! use motif_app::prelude::*;
//! use std::time::Duration;
//!
//! fn main() -> Result<()> {
//!     let mut app = ShowcaseApp::new();
//!     app.mount();
//!     app.appear_all();
//!     app.tap(WidgetKind::Morphing)?;
//!
//!     for _ in 0..30 {
//!         app.advance(Duration::from_millis(16));
//!     }
//!     let frame = app.frame()?;
//!     assert!(frame.animating);
//!     assert!(frame.to_svg()?.starts_with("<svg"));
//!     Ok(())
//! }
//! ```

mod app;
mod error;
pub mod showcase;
pub mod widget;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use app::{Frame, ShowcaseApp, ShowcaseConfig, WidgetSnapshot};
pub use error::{Result, ShowcaseError};
pub use showcase::{ContentView, WidgetKind};
pub use widget::{StateValue, Widget, WidgetContext, WidgetSummary};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::{Frame, ShowcaseApp, ShowcaseConfig};
    pub use crate::error::{Result, ShowcaseError};
    pub use crate::showcase::WidgetKind;
    pub use crate::widget::{StateValue, Widget, WidgetContext};

    pub use motif_layout::prelude::*;
}
