//! Paint primitives
//!
//! Colors, geometry and brushes shared by element descriptors, the animation
//! system and the exporters. Gradient points live in unit space
//! (`0.0..=1.0` relative to the painted shape's bounds).

use serde::Serialize;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with components in `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    // Light-appearance system palette
    pub const RED: Color = Color::rgb(1.0, 0.231, 0.188);
    pub const YELLOW: Color = Color::rgb(1.0, 0.8, 0.0);
    pub const GREEN: Color = Color::rgb(0.204, 0.78, 0.349);
    pub const BLUE: Color = Color::rgb(0.0, 0.478, 1.0);
    pub const INDIGO: Color = Color::rgb(0.345, 0.337, 0.839);
    pub const PURPLE: Color = Color::rgb(0.686, 0.322, 0.871);
    pub const GRAY: Color = Color::rgb(0.557, 0.557, 0.576);
    pub const SYSTEM_GRAY5: Color = Color::rgb(0.898, 0.898, 0.918);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Mix towards white by `amount` (0.0 keeps the color)
    pub fn lighten(&self, amount: f32) -> Self {
        Color::lerp(self, &Color::WHITE.with_alpha(self.a), amount)
    }

    /// `#rrggbb` form, alpha dropped
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }

    /// The soft top-to-bottom gradient derived from a single color
    pub fn gradient(&self) -> Brush {
        Brush::Linear(LinearGradient::new(
            Point::TOP,
            Point::BOTTOM,
            vec![
                GradientStop::new(0.0, self.lighten(0.15)),
                GradientStop::new(1.0, *self),
            ],
        ))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const TOP_LEADING: Point = Point::new(0.0, 0.0);
    pub const TOP: Point = Point::new(0.5, 0.0);
    pub const CENTER: Point = Point::new(0.5, 0.5);
    pub const BOTTOM: Point = Point::new(0.5, 1.0);
    pub const BOTTOM_TRAILING: Point = Point::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

/// An axis-aligned rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }
}

// =============================================================================
// Brushes
// =============================================================================

/// A color stop in a gradient
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Linear gradient between two unit-space points
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    /// Color stops (sorted by offset)
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point, mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { start, end, stops }
    }

    /// Evenly spaced stops from a list of colors
    pub fn from_colors(colors: &[Color], start: Point, end: Point) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| GradientStop::new(i as f32 / last, *c))
            .collect();
        Self::new(start, end, stops)
    }
}

/// Fill paint for a shape
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Brush {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<LinearGradient> for Brush {
    fn from(gradient: LinearGradient) -> Self {
        Brush::Linear(gradient)
    }
}

/// Outline paint for a shape
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp_clamps() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);

        let over = Color::lerp(&Color::BLACK, &Color::WHITE, 1.5);
        assert_eq!(over, Color::WHITE);
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex(0x7f3a10);
        assert_eq!(c.to_hex(), "#7f3a10");
    }

    #[test]
    fn test_from_colors_spacing() {
        let g = LinearGradient::from_colors(&[Color::RED, Color::YELLOW], Point::CENTER, Point::BOTTOM_TRAILING);
        assert_eq!(g.stops.len(), 2);
        assert_eq!(g.stops[0].offset, 0.0);
        assert_eq!(g.stops[1].offset, 1.0);
        assert_eq!(g.stops[1].color, Color::YELLOW);
    }

    #[test]
    fn test_color_gradient_ends_on_base() {
        let Brush::Linear(g) = Color::GREEN.gradient() else {
            panic!("expected a linear gradient");
        };
        assert_eq!(g.start, Point::TOP);
        assert_eq!(g.stops.last().map(|s| s.color), Some(Color::GREEN));
    }
}
