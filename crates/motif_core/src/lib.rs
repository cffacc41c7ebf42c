//! Motif Core Runtime
//!
//! Foundational primitives shared by every Motif crate:
//!
//! - **Reactive State**: typed signals owned by a widget, raising that
//!   widget's dirty flag on write
//! - **Paint Model**: colors, unit-space gradients, brushes and strokes
//!
//! # Example
//!
//! ```rust
//! use motif_core::reactive::ReactiveGraph;
//!
//! let mut graph = ReactiveGraph::new();
//! let progress = graph.create_signal(0u32);
//!
//! graph.update(progress, |ticks| ticks + 1);
//! assert_eq!(graph.get(progress), Some(1));
//! ```

pub mod layer;
pub mod reactive;

pub use layer::{Brush, Color, GradientStop, LinearGradient, Point, Rect, Size, Stroke};
pub use reactive::{
    batch, DirtyFlag, ReactiveGraph, ReactiveStats, SharedReactiveGraph, Signal, SignalId, State,
};
