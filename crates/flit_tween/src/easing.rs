//! Easing functions for tweens
//!
//! An easing strategy maps elapsed time within a tween's duration to eased
//! progress. Progress is usually in `[0, 1]`, but the back, elastic and
//! custom curves may leave that range on purpose.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Signature of a caller-supplied easing curve: `(elapsed, duration) -> progress`
pub type EaseFn = fn(f32, f32) -> f32;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInBack,
    EaseOutBack,
    EaseOutBounce,
    EaseOutElastic,
    CubicBezier(f32, f32, f32, f32),
    /// Caller-supplied curve, handed raw elapsed time and duration
    #[serde(skip)]
    Custom(EaseFn),
}

impl Easing {
    /// Eased progress for `elapsed` seconds into a tween lasting `duration`.
    ///
    /// A non-positive duration is treated as already finished and yields the
    /// curve's end value.
    pub fn ease(&self, elapsed: f32, duration: f32) -> f32 {
        if let Easing::Custom(f) = self {
            return f(elapsed, duration);
        }
        if duration <= 0.0 {
            return self.apply(1.0);
        }
        self.apply(elapsed / duration)
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Easing::EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
            }
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseOutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            // Without a duration the best a custom curve can do is unit time
            Easing::Custom(f) => f(t, 1.0),
        }
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x; // initial guess
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break; // slope too flat, switch to binary search
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 18] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseOutBounce,
        Easing::EaseOutElastic,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_ease_normalizes_by_duration() {
        let easing = Easing::EaseInQuad;
        assert!((easing.ease(1.0, 2.0) - 0.25).abs() < 1e-6);
        assert!((Easing::Linear.ease(0.5, 2.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_ease_zero_duration_is_finished() {
        assert!((Easing::Linear.ease(0.0, 0.0) - 1.0).abs() < 1e-6);
        assert!((Easing::EaseOutBack.ease(0.0, -1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_back_curves_overshoot() {
        assert!(Easing::EaseOutBack.apply(0.7) > 1.0);
        assert!(Easing::EaseInBack.apply(0.2) < 0.0);
    }

    #[test]
    fn test_custom_receives_raw_time() {
        fn half_time(elapsed: f32, duration: f32) -> f32 {
            elapsed / (2.0 * duration)
        }
        let easing = Easing::Custom(half_time);
        assert!((easing.ease(3.0, 3.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_bezier_linear_control_points() {
        let easing = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((easing.apply(t) - t).abs() < 1e-3);
        }
    }
}
