//! Timing curves for duration-based animations

/// Animation easing function
///
/// The named curves use the standard cubic-bezier control points, so
/// `EaseIn` is `cubic-bezier(0.42, 0, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start, fast middle, slow end
    #[default]
    EaseInOut,
    /// Custom cubic bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply easing function to normalized time (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier_sample(t, 0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => cubic_bezier_sample(t, 0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => cubic_bezier_sample(t, 0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_sample(t, x1, y1, x2, y2),
        }
    }
}

/// Sample cubic bezier curve at time t
fn cubic_bezier_sample(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Newton-Raphson iteration to find parameter for x
    let mut guess = t;
    for _ in 0..8 {
        let x = cubic_bezier_value(guess, x1, x2) - t;
        if x.abs() < 0.0001 {
            break;
        }
        let dx = cubic_bezier_derivative(guess, x1, x2);
        if dx.abs() < 0.0001 {
            break;
        }
        guess -= x / dx;
    }
    cubic_bezier_value(guess.clamp(0.0, 1.0), y1, y2)
}

fn cubic_bezier_value(t: f32, p1: f32, p2: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    3.0 * mt2 * t * p1 + 3.0 * mt * t2 * p2 + t3
}

fn cubic_bezier_derivative(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
