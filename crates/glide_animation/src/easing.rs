//! Easing functions for animations
//!
//! Every curve is defined in normalized form `f(t)` with `f(0) = 0` and
//! `f(1) = 1`; [`ease`] maps it onto a `start..end` range. `t` is never
//! clamped here. Back, Elastic and Bounce overshoot as part of the curve, and
//! ping-pong math may sample outside `[0, 1]`.

use serde::{Deserialize, Serialize};
use std::f32::consts::{LN_2, PI};

const BACK_OVERSHOOT: f32 = 1.70158;
const BACK_IN_OUT_SCALE: f32 = 1.525;
const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_SHIFT: f32 = ELASTIC_PERIOD / 4.0;
const ELASTIC_OMEGA: f32 = 2.0 * PI / ELASTIC_PERIOD;
const BOUNCE_SCALE: f32 = 7.5625;
const BOUNCE_SPAN: f32 = 2.75;
const NUMERIC_STEP: f32 = 1e-3;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Damped oscillation settling on the target
    Spring,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Every curve that has no parameters
    pub const NAMED: [Easing; 32] = [
        Easing::Linear,
        Easing::Spring,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::EaseInSine,
        Easing::EaseOutSine,
        Easing::EaseInOutSine,
        Easing::EaseInExpo,
        Easing::EaseOutExpo,
        Easing::EaseInOutExpo,
        Easing::EaseInCirc,
        Easing::EaseOutCirc,
        Easing::EaseInOutCirc,
        Easing::EaseInBounce,
        Easing::EaseOutBounce,
        Easing::EaseInOutBounce,
        Easing::EaseInBack,
        Easing::EaseOutBack,
        Easing::EaseInOutBack,
        Easing::EaseInElastic,
        Easing::EaseOutElastic,
        Easing::EaseInOutElastic,
    ];

    /// Apply the easing function to a progress value (nominally 0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::Spring => spring(t),
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => -t * (t - 2.0),
            Easing::EaseInOutQuad => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * u * u
                } else {
                    let u = u - 1.0;
                    -0.5 * (u * (u - 2.0) - 1.0)
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => (t - 1.0).powi(3) + 1.0,
            Easing::EaseInOutCubic => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * u * u * u
                } else {
                    0.5 * ((u - 2.0).powi(3) + 2.0)
                }
            }
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (t - 1.0).powi(4),
            Easing::EaseInOutQuart => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * u.powi(4)
                } else {
                    -0.5 * ((u - 2.0).powi(4) - 2.0)
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => (t - 1.0).powi(5) + 1.0,
            Easing::EaseInOutQuint => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * u.powi(5)
                } else {
                    0.5 * ((u - 2.0).powi(5) + 2.0)
                }
            }
            Easing::EaseInSine => 1.0 - (t * PI * 0.5).cos(),
            Easing::EaseOutSine => (t * PI * 0.5).sin(),
            Easing::EaseInOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Easing::EaseInExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Easing::EaseOutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * 2f32.powf(10.0 * (u - 1.0))
                } else {
                    0.5 * (2.0 - 2f32.powf(-10.0 * (u - 1.0)))
                }
            }
            Easing::EaseInCirc => 1.0 - root(1.0 - t * t),
            Easing::EaseOutCirc => {
                let u = t - 1.0;
                root(1.0 - u * u)
            }
            Easing::EaseInOutCirc => {
                let u = t * 2.0;
                if u < 1.0 {
                    -0.5 * (root(1.0 - u * u) - 1.0)
                } else {
                    let u = u - 2.0;
                    0.5 * (root(1.0 - u * u) + 1.0)
                }
            }
            Easing::EaseInBounce => 1.0 - bounce_out(1.0 - t),
            Easing::EaseOutBounce => bounce_out(t),
            Easing::EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - t * 2.0)) * 0.5
                } else {
                    bounce_out(t * 2.0 - 1.0) * 0.5 + 0.5
                }
            }
            Easing::EaseInBack => {
                let s = BACK_OVERSHOOT;
                t * t * ((s + 1.0) * t - s)
            }
            Easing::EaseOutBack => {
                let s = BACK_OVERSHOOT;
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
            Easing::EaseInOutBack => {
                let s = BACK_OVERSHOOT * BACK_IN_OUT_SCALE;
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * (u * u * ((s + 1.0) * u - s))
                } else {
                    let u = u - 2.0;
                    0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
                }
            }
            Easing::EaseInElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t - 1.0;
                -(2f32.powf(10.0 * u) * elastic_wave(u).sin())
            }
            Easing::EaseOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                2f32.powf(-10.0 * t) * elastic_wave(t).sin() + 1.0
            }
            Easing::EaseInOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let u = t * 2.0 - 1.0;
                if t < 0.5 {
                    -0.5 * (2f32.powf(10.0 * u) * elastic_wave(u).sin())
                } else {
                    2f32.powf(-10.0 * u) * elastic_wave(u).sin() * 0.5 + 1.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, x1, y1, x2, y2),
        }
    }

    /// Derivative of [`Easing::apply`] with respect to `t`
    pub fn slope(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => 1.0,
            Easing::EaseInQuad => 2.0 * t,
            Easing::EaseOutQuad => 2.0 - 2.0 * t,
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    4.0 * t
                } else {
                    4.0 * (1.0 - t)
                }
            }
            Easing::EaseInCubic => 3.0 * t * t,
            Easing::EaseOutCubic => 3.0 * (t - 1.0).powi(2),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    12.0 * t * t
                } else {
                    12.0 * (t - 1.0).powi(2)
                }
            }
            Easing::EaseInQuart => 4.0 * t.powi(3),
            Easing::EaseOutQuart => -4.0 * (t - 1.0).powi(3),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    32.0 * t.powi(3)
                } else {
                    -32.0 * (t - 1.0).powi(3)
                }
            }
            Easing::EaseInQuint => 5.0 * t.powi(4),
            Easing::EaseOutQuint => 5.0 * (t - 1.0).powi(4),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    80.0 * t.powi(4)
                } else {
                    80.0 * (t - 1.0).powi(4)
                }
            }
            Easing::EaseInSine => PI * 0.5 * (t * PI * 0.5).sin(),
            Easing::EaseOutSine => PI * 0.5 * (t * PI * 0.5).cos(),
            Easing::EaseInOutSine => PI * 0.5 * (PI * t).sin(),
            Easing::EaseInExpo => 10.0 * LN_2 * 2f32.powf(10.0 * (t - 1.0)),
            Easing::EaseOutExpo => 10.0 * LN_2 * 2f32.powf(-10.0 * t),
            Easing::EaseInOutExpo => {
                if t < 0.5 {
                    10.0 * LN_2 * 2f32.powf(20.0 * t - 10.0)
                } else {
                    10.0 * LN_2 * 2f32.powf(10.0 - 20.0 * t)
                }
            }
            Easing::EaseInCirc => t * inv_root(1.0 - t * t),
            Easing::EaseOutCirc => {
                let u = t - 1.0;
                -u * inv_root(1.0 - u * u)
            }
            Easing::EaseInOutCirc => {
                if t < 0.5 {
                    2.0 * t * inv_root(1.0 - 4.0 * t * t)
                } else {
                    let u = 2.0 * t - 2.0;
                    -u * inv_root(1.0 - u * u)
                }
            }
            Easing::EaseInBounce => bounce_out_slope(1.0 - t),
            Easing::EaseOutBounce => bounce_out_slope(t),
            Easing::EaseInOutBounce => {
                if t < 0.5 {
                    bounce_out_slope(1.0 - t * 2.0)
                } else {
                    bounce_out_slope(t * 2.0 - 1.0)
                }
            }
            Easing::EaseInBack => {
                let s = BACK_OVERSHOOT;
                3.0 * (s + 1.0) * t * t - 2.0 * s * t
            }
            Easing::EaseOutBack => {
                let s = BACK_OVERSHOOT;
                let u = t - 1.0;
                3.0 * (s + 1.0) * u * u + 2.0 * s * u
            }
            Easing::EaseInOutBack => {
                let s = BACK_OVERSHOOT * BACK_IN_OUT_SCALE;
                if t < 0.5 {
                    let u = t * 2.0;
                    3.0 * (s + 1.0) * u * u - 2.0 * s * u
                } else {
                    let u = t * 2.0 - 2.0;
                    3.0 * (s + 1.0) * u * u + 2.0 * s * u
                }
            }
            Easing::EaseInElastic => {
                let u = t - 1.0;
                let phase = elastic_wave(u);
                -2f32.powf(10.0 * u) * (10.0 * LN_2 * phase.sin() + ELASTIC_OMEGA * phase.cos())
            }
            Easing::EaseOutElastic => {
                let phase = elastic_wave(t);
                2f32.powf(-10.0 * t) * (ELASTIC_OMEGA * phase.cos() - 10.0 * LN_2 * phase.sin())
            }
            Easing::EaseInOutElastic => {
                let u = t * 2.0 - 1.0;
                let phase = elastic_wave(u);
                if t < 0.5 {
                    -2f32.powf(10.0 * u)
                        * (10.0 * LN_2 * phase.sin() + ELASTIC_OMEGA * phase.cos())
                } else {
                    2f32.powf(-10.0 * u)
                        * (ELASTIC_OMEGA * phase.cos() - 10.0 * LN_2 * phase.sin())
                }
            }
            // No tidy closed form
            Easing::Spring | Easing::CubicBezier(..) => {
                (self.apply(t + NUMERIC_STEP) - self.apply(t - NUMERIC_STEP))
                    / (2.0 * NUMERIC_STEP)
            }
        }
    }

    /// Map progress onto `start..end`
    pub fn interpolate(&self, start: f32, end: f32, t: f32) -> f32 {
        start + (end - start) * self.apply(t)
    }

    /// Rate of change of [`Easing::interpolate`] per unit of progress
    pub fn derivative(&self, start: f32, end: f32, t: f32) -> f32 {
        (end - start) * self.slope(t)
    }

    /// Whether the curve leaves `[0, 1]` for progress inside `[0, 1]`
    pub fn overshoots(&self) -> bool {
        match *self {
            Easing::Spring
            | Easing::EaseInBack
            | Easing::EaseOutBack
            | Easing::EaseInOutBack
            | Easing::EaseInElastic
            | Easing::EaseOutElastic
            | Easing::EaseInOutElastic => true,
            Easing::CubicBezier(_, y1, _, y2) => !(0.0..=1.0).contains(&y1) || !(0.0..=1.0).contains(&y2),
            _ => false,
        }
    }
}

/// Evaluate `curve` between `start` and `end`
pub fn ease(curve: Easing, start: f32, end: f32, t: f32) -> f32 {
    curve.interpolate(start, end, t)
}

/// Velocity counterpart of [`ease`]
pub fn ease_derivative(curve: Easing, start: f32, end: f32, t: f32) -> f32 {
    curve.derivative(start, end, t)
}

fn spring(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * (1.0 - t).powf(2.2) + t) * (1.0 + 1.2 * (1.0 - t))
}

fn bounce_out(t: f32) -> f32 {
    let (offset, lift) = bounce_segment(t);
    let u = t - offset;
    BOUNCE_SCALE * u * u + lift
}

fn bounce_out_slope(t: f32) -> f32 {
    let (offset, _) = bounce_segment(t);
    2.0 * BOUNCE_SCALE * (t - offset)
}

/// Parabola vertex and height for the bounce arc containing `t`
fn bounce_segment(t: f32) -> (f32, f32) {
    if t < 1.0 / BOUNCE_SPAN {
        (0.0, 0.0)
    } else if t < 2.0 / BOUNCE_SPAN {
        (1.5 / BOUNCE_SPAN, 0.75)
    } else if t < 2.5 / BOUNCE_SPAN {
        (2.25 / BOUNCE_SPAN, 0.9375)
    } else {
        (2.625 / BOUNCE_SPAN, 0.984375)
    }
}

#[inline]
fn elastic_wave(u: f32) -> f32 {
    (u - ELASTIC_SHIFT) * ELASTIC_OMEGA
}

#[inline]
fn root(x: f32) -> f32 {
    x.max(0.0).sqrt()
}

#[inline]
fn inv_root(x: f32) -> f32 {
    1.0 / x.max(f32::EPSILON).sqrt()
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at high frame rates.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

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
