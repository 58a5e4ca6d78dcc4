//! Easing curves mapping linear time fraction to animation progress.

/// Maximum bisection steps when solving the bezier for `x`.
const MAX_SOLVE_ITERATIONS: usize = 32;
const SOLVE_EPSILON: f32 = 1e-4;

/// Cubic bezier curve through `(0, 0)`, `(a, b)`, `(c, d)` and `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezierEasing {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
}

impl CubicBezierEasing {
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    fn evaluate(p1: f32, p2: f32, t: f32) -> f32 {
        let inv = 1.0 - t;
        3.0 * p1 * inv * inv * t + 3.0 * p2 * inv * t * t + t * t * t
    }

    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        // x(t) is monotonic for control points inside the unit square.
        let mut start = 0.0f32;
        let mut end = 1.0f32;
        let mut mid = fraction;
        for _ in 0..MAX_SOLVE_ITERATIONS {
            mid = (start + end) / 2.0;
            let x = Self::evaluate(self.a, self.c, mid);
            if (fraction - x).abs() < SOLVE_EPSILON {
                break;
            }
            if x < fraction {
                start = mid;
            } else {
                end = mid;
            }
        }
        Self::evaluate(self.b, self.d, mid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    CubicBezier(CubicBezierEasing),
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Standard ease-in/ease-out curve, the default for height transitions.
    pub const FAST_OUT_SLOW_IN: Easing =
        Easing::CubicBezier(CubicBezierEasing::new(0.4, 0.0, 0.2, 1.0));
    pub const LINEAR_OUT_SLOW_IN: Easing =
        Easing::CubicBezier(CubicBezierEasing::new(0.0, 0.0, 0.2, 1.0));
    pub const FAST_OUT_LINEAR_IN: Easing =
        Easing::CubicBezier(CubicBezierEasing::new(0.4, 0.0, 1.0, 1.0));
    pub const EASE_IN_OUT: Easing =
        Easing::CubicBezier(CubicBezierEasing::new(0.42, 0.0, 0.58, 1.0));

    pub fn transform(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => fraction,
            Easing::CubicBezier(curve) => curve.transform(fraction),
            Easing::Custom(curve) => curve(fraction),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::FAST_OUT_SLOW_IN
    }
}
