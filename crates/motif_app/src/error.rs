//! Error types for motif_app

use motif_layout::LayoutError;
use thiserror::Error;

use crate::showcase::WidgetKind;

/// Errors that can occur in the showcase runtime
///
/// Widget triggers themselves never fail; these cover addressing widgets
/// from outside and producing frames.
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// No widget goes by that name
    #[error("unknown widget '{0}' (expected one of: {names})", names = WidgetKind::names().join(", "))]
    UnknownWidget(String),

    /// The widget exists but is not mounted
    #[error("widget '{0}' is not mounted")]
    NotMounted(WidgetKind),

    /// Layout or SVG export failed
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// Frame serialization failed
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for motif_app operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;
