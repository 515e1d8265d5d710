//! Easing curves for time-driven interpolation.

use bevy::prelude::*;
use serde::Deserialize;

/// Maps normalized progress in [0, 1] to an interpolation factor.
///
/// Input is clamped before evaluation, so callers can pass raw
/// `elapsed / duration` ratios.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub enum EaseCurve {
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow finish.
    EaseOut,
    /// Cubic Hermite with flat tangents at both ends (`3u² - 2u³`).
    #[default]
    EaseInOut,
    /// Piecewise-linear `(time, value)` pairs, sorted by time.
    /// Holds the first/last value outside the keyed range.
    Keyframes(Vec<(f32, f32)>),
}

impl EaseCurve {
    pub fn evaluate(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            EaseCurve::Linear => u,
            EaseCurve::EaseIn => u * u,
            EaseCurve::EaseOut => u * (2.0 - u),
            EaseCurve::EaseInOut => u * u * (3.0 - 2.0 * u),
            EaseCurve::Keyframes(keys) => evaluate_keys(keys, u),
        }
    }
}

fn evaluate_keys(keys: &[(f32, f32)], u: f32) -> f32 {
    let (Some(&(first_t, first_v)), Some(&(last_t, last_v))) = (keys.first(), keys.last()) else {
        return u;
    };

    if u <= first_t {
        return first_v;
    }
    if u >= last_t {
        return last_v;
    }

    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if u <= t1 {
            let span = t1 - t0;
            if span <= f32::EPSILON {
                return v1;
            }
            return v0 + (v1 - v0) * ((u - t0) / span);
        }
    }

    last_v
}

/// Interpolate between two points using an easing curve.
pub fn ease_between(from: Vec3, to: Vec3, curve: &EaseCurve, u: f32) -> Vec3 {
    from.lerp(to, curve.evaluate(u))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_curves_hit_both_ends() {
        for curve in [
            EaseCurve::Linear,
            EaseCurve::EaseIn,
            EaseCurve::EaseOut,
            EaseCurve::EaseInOut,
        ] {
            assert_eq!(curve.evaluate(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.evaluate(1.0), 1.0, "{curve:?}");
        }
    }

    #[test]
    fn input_is_clamped() {
        let curve = EaseCurve::EaseInOut;
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(7.5), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let curve = EaseCurve::EaseInOut;
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
        let a = curve.evaluate(0.2);
        let b = curve.evaluate(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn keyframes_interpolate_and_hold() {
        let curve = EaseCurve::Keyframes(vec![(0.0, 0.0), (0.5, 1.2), (1.0, 1.0)]);
        assert!((curve.evaluate(0.25) - 0.6).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 1.1).abs() < 1e-6);
        assert_eq!(curve.evaluate(1.0), 1.0);

        let late_start = EaseCurve::Keyframes(vec![(0.2, 0.1), (0.6, 0.9)]);
        assert_eq!(late_start.evaluate(0.0), 0.1);
        assert_eq!(late_start.evaluate(0.9), 0.9);
    }

    #[test]
    fn empty_keyframes_fall_back_to_linear() {
        let curve = EaseCurve::Keyframes(Vec::new());
        assert_eq!(curve.evaluate(0.3), 0.3);
    }

    #[test]
    fn ease_between_endpoints() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        let to = Vec3::new(1.0, 2.0, -2.0);
        assert_eq!(ease_between(from, to, &EaseCurve::EaseIn, 0.0), from);
        assert_eq!(ease_between(from, to, &EaseCurve::EaseIn, 1.0), to);
    }
}
