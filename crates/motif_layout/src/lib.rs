//! Motif Layout
//!
//! From view descriptors to drawable frames:
//!
//! - [`element`]: the descriptor tree widgets build every time their state
//!   changes
//! - [`diff`]: property-level comparison of two descriptors
//! - [`render_state`]: presented values per node, animated between
//!   descriptors with each node's [`Animation`](motif_animation::Animation)
//! - [`layout`]: bounds via Taffy (stacks as flexbox, overlays as a grid)
//! - [`svg`]: SVG export of a laid-out frame
//!
//! # Example
//!
//! ```rust
//! use motif_animation::Animation;
//! use motif_core::Color;
//! use motif_layout::prelude::*;
//!
//! let view = |on: bool| {
//!     zstack().key("toggle").child(
//!         circle()
//!             .key("dot")
//!             .fill(if on { Color::GREEN } else { Color::GRAY })
//!             .frame(40.0, 40.0)
//!             .animation(Animation::ease_in()),
//!     )
//! };
//!
//! let mut state = RenderState::new();
//! state.update(&view(false));
//! state.update(&view(true));
//! state.tick(0.1);
//!
//! let mut frame = state.resolve(&view(true));
//! compute_layout(&mut frame, 320.0).unwrap();
//! assert!(frame.find("dot").is_some_and(|n| n.animating));
//! ```

pub mod diff;
pub mod element;
pub mod layout;
pub mod render_state;
pub mod svg;

pub use diff::{diff_styles, same_kind, Property, PropertyChanges};
pub use element::{EdgeInsets, Element, ElementKind, ElementStyle};
pub use layout::{compute_layout, LayoutError, MeasureContext};
pub use render_state::{RenderNode, RenderState, RenderStats};
pub use svg::{icon_glyph, render_svg};

/// Builders and types needed to describe and render views
pub mod prelude {
    pub use crate::element::{
        circle, hstack, icon, rounded_rect, scroll_view, text, vstack, zstack, EdgeInsets,
        Element,
    };
    pub use crate::layout::compute_layout;
    pub use crate::render_state::{RenderNode, RenderState};
    pub use crate::svg::render_svg;
}
