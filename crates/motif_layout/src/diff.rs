//! Property-level diff between two descriptors of the same node
//!
//! The render state only starts transitions for properties that actually
//! changed, so a long-running animation on one property (a spinning arc)
//! survives rebuilds that touch a different one.
//!
//! ```rust
//! use motif_layout::diff::{diff_styles, Property};
//! use motif_layout::element::circle;
//!
//! let old = circle().scale(1.0).opacity(1.0);
//! let new = circle().scale(0.5).opacity(1.0);
//! assert_eq!(diff_styles(&old.style, &new.style).as_slice(), &[Property::Scale]);
//! ```

use smallvec::SmallVec;

use crate::element::{ElementKind, ElementStyle};

// =============================================================================
// Property - What Changed
// =============================================================================

/// Every animatable property of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Frame,
    Fill,
    StrokeColor,
    StrokeWidth,
    TrimStart,
    TrimEnd,
    CornerRadius,
    Rotation,
    Scale,
    Opacity,
    Foreground,
}

/// Changed properties of one node, usually zero to three
pub type PropertyChanges = SmallVec<[Property; 4]>;

// =============================================================================
// Diffing
// =============================================================================

/// Properties whose values differ between `old` and `new`
pub fn diff_styles(old: &ElementStyle, new: &ElementStyle) -> PropertyChanges {
    let mut changes = PropertyChanges::new();
    let stroke_color = |s: &ElementStyle| s.stroke.map(|s| s.color);
    let stroke_width = |s: &ElementStyle| s.stroke.map(|s| s.width);

    if old.frame != new.frame {
        changes.push(Property::Frame);
    }
    if old.fill != new.fill {
        changes.push(Property::Fill);
    }
    if stroke_color(old) != stroke_color(new) {
        changes.push(Property::StrokeColor);
    }
    if stroke_width(old) != stroke_width(new) {
        changes.push(Property::StrokeWidth);
    }
    if old.trim_start != new.trim_start {
        changes.push(Property::TrimStart);
    }
    if old.trim_end != new.trim_end {
        changes.push(Property::TrimEnd);
    }
    if old.corner_radius != new.corner_radius {
        changes.push(Property::CornerRadius);
    }
    if old.rotation != new.rotation {
        changes.push(Property::Rotation);
    }
    if old.scale != new.scale {
        changes.push(Property::Scale);
    }
    if old.opacity != new.opacity {
        changes.push(Property::Opacity);
    }
    if old.foreground != new.foreground {
        changes.push(Property::Foreground);
    }
    changes
}

/// Can a node of kind `new` keep the presentation state of one of kind `old`?
///
/// A node that changes kind (a circle becoming text) starts over; content
/// changes of text and icons do not.
pub fn same_kind(old: &ElementKind, new: &ElementKind) -> bool {
    std::mem::discriminant(old) == std::mem::discriminant(new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{circle, rounded_rect, text};
    use motif_core::Color;

    #[test]
    fn test_no_changes() {
        let a = circle().fill(Color::RED).frame(10.0, 10.0);
        assert!(diff_styles(&a.style, &a.clone().style).is_empty());
    }

    #[test]
    fn test_multiple_changes_in_declaration_order() {
        let old = rounded_rect(30.0).frame(60.0, 60.0).fill(Color::BLUE.gradient());
        let new = rounded_rect(5.0).frame(250.0, 60.0).fill(Color::PURPLE.gradient());
        assert_eq!(
            diff_styles(&old.style, &new.style).as_slice(),
            &[Property::Frame, Property::Fill, Property::CornerRadius]
        );
    }

    #[test]
    fn test_stroke_split_into_color_and_width() {
        let old = circle().stroke(Color::PURPLE, 7.0);
        let new = circle().stroke(Color::PURPLE, 5.0);
        assert_eq!(diff_styles(&old.style, &new.style).as_slice(), &[Property::StrokeWidth]);
    }

    #[test]
    fn test_kind_ignores_text_content() {
        assert!(same_kind(&text("5%").kind, &text("10%").kind));
        assert!(!same_kind(&text("5%").kind, &circle().kind));
    }
}
