//! Animatable value types
//!
//! Provides the [`Interpolate`] trait and implementations for every value a
//! transition can drive: scalars, colors, points, sizes and brushes.

use motif_core::{Brush, Color, GradientStop, LinearGradient, Point, Size};

/// Trait for values that can be linearly interpolated
///
/// `t` is normally in `0.0..=1.0` but springs overshoot, so scalar
/// implementations extrapolate while colors clamp.
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for change detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

impl Interpolate for Point {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Point::new(self.x.lerp(&other.x, t), self.y.lerp(&other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.approx_eq(&other.x, epsilon) && self.y.approx_eq(&other.y, epsilon)
    }
}

impl Interpolate for Size {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Size::new(
            self.width.lerp(&other.width, t),
            self.height.lerp(&other.height, t),
        )
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.width.approx_eq(&other.width, epsilon) && self.height.approx_eq(&other.height, epsilon)
    }
}

impl Interpolate for LinearGradient {
    /// Gradients with matching stop counts blend stop by stop; otherwise the
    /// result snaps to whichever end `t` is closer to.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        if self.stops.len() != other.stops.len() {
            return if t < 0.5 { self.clone() } else { other.clone() };
        }
        let stops = self
            .stops
            .iter()
            .zip(&other.stops)
            .map(|(a, b)| {
                GradientStop::new(
                    a.offset.lerp(&b.offset, t.clamp(0.0, 1.0)),
                    a.color.lerp(&b.color, t),
                )
            })
            .collect();
        LinearGradient {
            start: self.start.lerp(&other.start, t),
            end: self.end.lerp(&other.end, t),
            stops,
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.stops.len() == other.stops.len()
            && self.start.approx_eq(&other.start, epsilon)
            && self.end.approx_eq(&other.end, epsilon)
            && self.stops.iter().zip(&other.stops).all(|(a, b)| {
                a.offset.approx_eq(&b.offset, epsilon) && a.color.approx_eq(&b.color, epsilon)
            })
    }
}

/// A gradient with the geometry of `shape` painted entirely in `color`
fn flat_gradient(color: Color, shape: &LinearGradient) -> LinearGradient {
    LinearGradient {
        start: shape.start,
        end: shape.end,
        stops: shape
            .stops
            .iter()
            .map(|s| GradientStop::new(s.offset, color))
            .collect(),
    }
}

impl Interpolate for Brush {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Brush::Solid(a), Brush::Solid(b)) => Brush::Solid(a.lerp(b, t)),
            (Brush::Linear(a), Brush::Linear(b)) => Brush::Linear(a.lerp(b, t)),
            (Brush::Solid(a), Brush::Linear(b)) => Brush::Linear(flat_gradient(*a, b).lerp(b, t)),
            (Brush::Linear(a), Brush::Solid(b)) => Brush::Linear(a.lerp(&flat_gradient(*b, a), t)),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (Brush::Solid(a), Brush::Solid(b)) => a.approx_eq(b, epsilon),
            (Brush::Linear(a), Brush::Linear(b)) => a.approx_eq(b, epsilon),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_extrapolates() {
        assert_eq!(0.0f32.lerp(&10.0, 0.5), 5.0);
        // Spring overshoot must pass through
        assert!((0.0f32.lerp(&1.0, 1.3) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_blend_moves_points_and_colors() {
        let a = LinearGradient::from_colors(&[Color::RED, Color::YELLOW], Point::CENTER, Point::BOTTOM_TRAILING);
        let b = LinearGradient::from_colors(&[Color::PURPLE, Color::INDIGO], Point::TOP, Point::CENTER);

        let mid = a.lerp(&b, 0.5);
        assert!(mid.start.approx_eq(&Point::new(0.5, 0.25), 1e-6));
        assert!(mid.stops[0]
            .color
            .approx_eq(&Color::lerp(&Color::RED, &Color::PURPLE, 0.5), 1e-6));

        assert!(a.lerp(&b, 1.0).approx_eq(&b, 1e-6));
    }

    #[test]
    fn test_solid_to_gradient_brush() {
        let target = Color::BLUE.gradient();
        let start = Brush::Solid(Color::PURPLE);

        let end = start.lerp(&target, 1.0);
        assert!(end.approx_eq(&target, 1e-6));

        let Brush::Linear(first) = start.lerp(&target, 0.0) else {
            panic!("expected a gradient");
        };
        assert!(first.stops.iter().all(|s| s.color == Color::PURPLE));
    }

    #[test]
    fn test_mismatched_stops_snap() {
        let two = LinearGradient::from_colors(&[Color::RED, Color::BLUE], Point::TOP, Point::BOTTOM);
        let three = LinearGradient::from_colors(
            &[Color::RED, Color::GREEN, Color::BLUE],
            Point::TOP,
            Point::BOTTOM,
        );
        assert_eq!(two.lerp(&three, 0.2), two);
        assert_eq!(two.lerp(&three, 0.8), three);
    }
}
