//! Easing module - maps normalized time to eased progress
//!
//! Every curve is a pure function `f(t)` on `t ∈ [0, 1]` with `f(0) = 0` and
//! `f(1) = 1`. Curves are looked up from a table indexed by [`Interpolation`],
//! so each one can be exercised in isolation.

use std::f32::consts::FRAC_PI_2;

/// Easing curve used by animated piece moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    Linear,
    EaseOut,
    EaseIn,
    SmoothStep,
    #[default]
    SmootherStep,
}

type Curve = fn(f32) -> f32;

const CURVES: [Curve; 5] = [linear, ease_out, ease_in, smooth_step, smoother_step];

impl Interpolation {
    pub const ALL: [Interpolation; 5] = [
        Interpolation::Linear,
        Interpolation::EaseOut,
        Interpolation::EaseIn,
        Interpolation::SmoothStep,
        Interpolation::SmootherStep,
    ];

    /// Eased progress for normalized time `t` (clamped to `[0, 1]`)
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        CURVES[self as usize](t)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(Interpolation::Linear),
            "easeout" | "ease-out" => Some(Interpolation::EaseOut),
            "easein" | "ease-in" => Some(Interpolation::EaseIn),
            "smoothstep" => Some(Interpolation::SmoothStep),
            "smootherstep" => Some(Interpolation::SmootherStep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interpolation::Linear => "linear",
            Interpolation::EaseOut => "easeOut",
            Interpolation::EaseIn => "easeIn",
            Interpolation::SmoothStep => "smoothStep",
            Interpolation::SmootherStep => "smootherStep",
        }
    }
}

pub fn linear(t: f32) -> f32 {
    t
}

pub fn ease_out(t: f32) -> f32 {
    (t * FRAC_PI_2).sin()
}

pub fn ease_in(t: f32) -> f32 {
    1.0 - (t * FRAC_PI_2).cos()
}

pub fn smooth_step(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

pub fn smoother_step(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn endpoints_are_fixed() {
        for curve in Interpolation::ALL {
            assert!(curve.apply(0.0).abs() < EPS, "{:?} at 0", curve);
            assert!((curve.apply(1.0) - 1.0).abs() < EPS, "{:?} at 1", curve);
        }
    }

    #[test]
    fn input_is_clamped() {
        for curve in Interpolation::ALL {
            assert_eq!(curve.apply(-3.0), curve.apply(0.0));
            assert_eq!(curve.apply(7.5), curve.apply(1.0));
            assert_eq!(curve.apply(f32::NAN), curve.apply(0.0));
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in Interpolation::ALL {
            let mut prev = curve.apply(0.0);
            for i in 1..=100 {
                let v = curve.apply(i as f32 / 100.0);
                assert!(v + EPS >= prev, "{:?} decreased at step {}", curve, i);
                prev = v;
            }
        }
    }

    #[test]
    fn midpoints() {
        assert!((linear(0.5) - 0.5).abs() < EPS);
        assert!((smooth_step(0.5) - 0.5).abs() < EPS);
        assert!((smoother_step(0.5) - 0.5).abs() < EPS);
        // Ease-out front-loads progress, ease-in back-loads it.
        assert!(ease_out(0.5) > 0.5);
        assert!(ease_in(0.5) < 0.5);
    }

    #[test]
    fn table_order_matches_enum() {
        assert_eq!(Interpolation::Linear.apply(0.25), linear(0.25));
        assert_eq!(Interpolation::EaseOut.apply(0.25), ease_out(0.25));
        assert_eq!(Interpolation::EaseIn.apply(0.25), ease_in(0.25));
        assert_eq!(Interpolation::SmoothStep.apply(0.25), smooth_step(0.25));
        assert_eq!(Interpolation::SmootherStep.apply(0.25), smoother_step(0.25));
    }

    #[test]
    fn parse_round_trip() {
        for curve in Interpolation::ALL {
            assert_eq!(Interpolation::from_str(curve.as_str()), Some(curve));
        }
        assert_eq!(Interpolation::from_str("bounce"), None);
        assert_eq!(Interpolation::default(), Interpolation::SmootherStep);
    }
}
