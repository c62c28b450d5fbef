//! Animatable value types
//!
//! Vector and color overloads of the easing library: the scalar curve is
//! applied per component. Linear short-circuits to a plain lerp.

use glide_core::{Color, Vec2, Vec3, Vec4};

use crate::easing::Easing;
use crate::tween::TweenKind;

/// Values a tween can interpolate
pub trait Tweenable: Copy + 'static {
    /// Pool kind used for value tweens of this type
    const KIND: TweenKind;

    /// Linearly interpolate between `from` and `to` by factor `t`
    fn lerp(from: Self, to: Self, t: f32) -> Self;

    /// Combine two values component by component
    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self;

    /// Eased value at progress `t`
    fn ease(curve: Easing, from: Self, to: Self, t: f32) -> Self {
        match curve {
            Easing::Linear => Self::lerp(from, to, t),
            _ => Self::zip_with(from, to, |a, b| curve.interpolate(a, b, t)),
        }
    }

    /// Per-component rate of change at progress `t` (per unit of progress)
    fn ease_derivative(curve: Easing, from: Self, to: Self, t: f32) -> Self {
        Self::zip_with(from, to, |a, b| curve.derivative(a, b, t))
    }
}

impl Tweenable for f32 {
    const KIND: TweenKind = TweenKind::Float;

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }

    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        f(a, b)
    }
}

impl Tweenable for Vec2 {
    const KIND: TweenKind = TweenKind::Vec2;

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }

    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Vec2::new(f(a.x, b.x), f(a.y, b.y))
    }
}

impl Tweenable for Vec3 {
    const KIND: TweenKind = TweenKind::Vec3;

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }

    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Vec3::new(f(a.x, b.x), f(a.y, b.y), f(a.z, b.z))
    }
}

impl Tweenable for Vec4 {
    const KIND: TweenKind = TweenKind::Vec4;

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }

    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Vec4::new(f(a.x, b.x), f(a.y, b.y), f(a.z, b.z), f(a.w, b.w))
    }
}

impl Tweenable for Color {
    const KIND: TweenKind = TweenKind::Color;

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }

    fn zip_with(a: Self, b: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Color::rgba(f(a.r, b.r), f(a.g, b.g), f(a.b, b.b), f(a.a, b.a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_applies_curve_per_component() {
        let from = Vec3::new(0.0, 10.0, 100.0);
        let to = Vec3::new(1.0, 20.0, 0.0);
        let value = Vec3::ease(Easing::EaseInQuad, from, to, 0.5);

        assert_eq!(value.x, Easing::EaseInQuad.interpolate(0.0, 1.0, 0.5));
        assert_eq!(value.y, Easing::EaseInQuad.interpolate(10.0, 20.0, 0.5));
        assert_eq!(value.z, Easing::EaseInQuad.interpolate(100.0, 0.0, 0.5));
    }

    #[test]
    fn test_linear_is_lerp() {
        let from = Vec2::new(-4.0, 4.0);
        let to = Vec2::new(4.0, -4.0);
        assert_eq!(Vec2::ease(Easing::Linear, from, to, 0.25), Vec2::new(-2.0, 2.0));
        assert_eq!(f32::ease(Easing::Linear, 3.0, 5.0, 0.5), 4.0);
    }

    #[test]
    fn test_color_endpoints() {
        for curve in [Easing::EaseOutBounce, Easing::EaseInOutSine, Easing::Spring] {
            let end = Color::ease(curve, Color::BLACK, Color::WHITE, 1.0);
            for channel in end.to_array() {
                assert!((channel - 1.0).abs() < 1e-4, "{curve:?}");
            }
        }
    }

    #[test]
    fn test_vector_derivative() {
        let velocity = Vec4::ease_derivative(Easing::Linear, Vec4::ZERO, Vec4::new(1.0, 2.0, 3.0, 4.0), 0.7);
        assert_eq!(velocity, Vec4::new(1.0, 2.0, 3.0, 4.0));
    }
}
