//! Element descriptors
//!
//! Widgets describe their current appearance as a tree of [`Element`]s built
//! with chained modifiers:
//!
//! ```rust
//! use motif_core::Color;
//! use motif_layout::element::{circle, zstack};
//!
//! let ring = zstack()
//!     .child(circle().stroke(Color::SYSTEM_GRAY5, 14.0).frame(100.0, 100.0))
//!     .child(
//!         circle()
//!             .trim(0.0, 0.2)
//!             .stroke(Color::PURPLE, 7.0)
//!             .frame(100.0, 100.0)
//!             .rotation(360.0),
//!     );
//! assert_eq!(ring.children.len(), 2);
//! ```
//!
//! A descriptor is a plain value: building one has no effect until the
//! render state diffs it against the previous descriptor of the same node.

use motif_animation::Animation;
use motif_core::{Brush, Color, Size, Stroke};
use serde::Serialize;

/// Default spacing between stack children
pub const DEFAULT_SPACING: f32 = 8.0;

/// Default padding applied by [`Element::padding_default`]
pub const DEFAULT_PADDING: f32 = 16.0;

/// Body text size
pub const BODY_FONT_SIZE: f32 = 17.0;

/// What an element draws or how it arranges its children
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ElementKind {
    Circle,
    RoundedRect,
    Text(String),
    /// Symbol looked up by name
    Icon(String),
    /// Children overlaid and centered
    ZStack,
    HStack,
    VStack,
    /// Vertical scroll container
    ScrollView,
}

impl ElementKind {
    /// Short tag for logs and node paths
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Circle => "circle",
            ElementKind::RoundedRect => "rounded_rect",
            ElementKind::Text(_) => "text",
            ElementKind::Icon(_) => "icon",
            ElementKind::ZStack => "zstack",
            ElementKind::HStack => "hstack",
            ElementKind::VStack => "vstack",
            ElementKind::ScrollView => "scroll_view",
        }
    }
}

/// Insets around an element's content
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            leading: value,
            bottom: value,
            trailing: value,
        }
    }

    pub const fn vertical(value: f32) -> Self {
        Self {
            top: value,
            leading: 0.0,
            bottom: value,
            trailing: 0.0,
        }
    }
}

/// Visual and layout properties of an element
#[derive(Clone, Debug, PartialEq)]
pub struct ElementStyle {
    /// Fixed size; `None` sizes to content
    pub frame: Option<Size>,
    pub fill: Option<Brush>,
    pub stroke: Option<Stroke>,
    /// Visible fraction of a shape's outline
    pub trim_start: f32,
    pub trim_end: f32,
    pub corner_radius: f32,
    /// Clockwise rotation in degrees around the center
    pub rotation: f32,
    /// Uniform scale around the center
    pub scale: f32,
    pub opacity: f32,
    /// Text and icon color
    pub foreground: Option<Color>,
    pub font_size: f32,
    pub padding: EdgeInsets,
    pub spacing: f32,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            frame: None,
            fill: None,
            stroke: None,
            trim_start: 0.0,
            trim_end: 1.0,
            corner_radius: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            foreground: None,
            font_size: BODY_FONT_SIZE,
            padding: EdgeInsets::default(),
            spacing: DEFAULT_SPACING,
        }
    }
}

/// A node of a view descriptor tree
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub style: ElementStyle,
    /// Animation applied when any property of this node changes
    pub animation: Option<Animation>,
    /// Stable identity; replaces the child index in the node path
    pub key: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            style: ElementStyle::default(),
            animation: None,
            key: None,
            children: Vec::new(),
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Animate changes of this node's properties with `animation`
    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    pub fn frame(mut self, width: f32, height: f32) -> Self {
        self.style.frame = Some(Size::new(width, height));
        self
    }

    pub fn padding(mut self, insets: EdgeInsets) -> Self {
        self.style.padding = insets;
        self
    }

    pub fn padding_default(self) -> Self {
        self.padding(EdgeInsets::all(DEFAULT_PADDING))
    }

    pub fn padding_vertical(self, value: f32) -> Self {
        self.padding(EdgeInsets::vertical(value))
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.style.spacing = spacing;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.style.corner_radius = radius;
        self
    }

    // =========================================================================
    // Paint
    // =========================================================================

    pub fn fill(mut self, brush: impl Into<Brush>) -> Self {
        self.style.fill = Some(brush.into());
        self
    }

    /// Outline the shape instead of filling it
    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.style.stroke = Some(Stroke::new(color, width));
        self
    }

    /// Draw only the `from..to` fraction of the outline
    pub fn trim(mut self, from: f32, to: f32) -> Self {
        self.style.trim_start = from.clamp(0.0, 1.0);
        self.style.trim_end = to.clamp(0.0, 1.0);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.style.foreground = Some(color);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self
    }

    // =========================================================================
    // Effects
    // =========================================================================

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.style.rotation = degrees;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.style.scale = scale;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.style.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Depth-first count of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Element::node_count).sum::<usize>()
    }

    /// Find the first descendant (or self) with the given key
    pub fn find(&self, key: &str) -> Option<&Element> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }
}

pub fn circle() -> Element {
    Element::new(ElementKind::Circle)
}

pub fn rounded_rect(radius: f32) -> Element {
    Element::new(ElementKind::RoundedRect).corner_radius(radius)
}

pub fn text(content: impl Into<String>) -> Element {
    Element::new(ElementKind::Text(content.into()))
}

pub fn icon(name: impl Into<String>) -> Element {
    Element::new(ElementKind::Icon(name.into()))
}

pub fn zstack() -> Element {
    Element::new(ElementKind::ZStack)
}

pub fn hstack() -> Element {
    Element::new(ElementKind::HStack)
}

pub fn vstack() -> Element {
    Element::new(ElementKind::VStack)
}

pub fn scroll_view() -> Element {
    Element::new(ElementKind::ScrollView)
}
