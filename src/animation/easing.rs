//! Easing curves for tweened properties.
//!
//! Names follow the conventions of common web tweening libraries so the
//! tuning values in the options file read naturally (`expo_in_out`,
//! `power4_out`).

use serde::{Deserialize, Serialize};

/// Easing function variants for tween curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Exponential ease-in-out. Very slow at both ends, fast through the
    /// middle. Used for focus and palette transitions.
    #[default]
    ExpoInOut,
    /// Quintic ease-out (`1 - (1 - t)^5`). Used for camera parallax.
    Power4Out,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Self::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    0.5 * 2f32.powf(20.0 * t - 10.0)
                } else {
                    1.0 - 0.5 * 2f32.powf(-20.0 * t + 10.0)
                }
            }
            Self::Power4Out => 1.0 - (1.0 - t).powi(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const ALL: [EasingFunction; 5] = [
        EasingFunction::Linear,
        EasingFunction::QuadraticIn,
        EasingFunction::QuadraticOut,
        EasingFunction::ExpoInOut,
        EasingFunction::Power4Out,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert_eq!(easing.evaluate(0.0), 0.0, "{easing:?} at 0");
            assert_relative_eq!(easing.evaluate(1.0), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.evaluate(-0.5), 0.0);
            assert_relative_eq!(easing.evaluate(1.5), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn expo_in_out_is_symmetric_around_midpoint() {
        let e = EasingFunction::ExpoInOut;
        assert_relative_eq!(e.evaluate(0.5), 0.5, epsilon = 1e-6);
        assert_relative_eq!(
            e.evaluate(0.25) + e.evaluate(0.75),
            1.0,
            epsilon = 1e-6
        );
        assert!(e.evaluate(0.1) < 0.01);
    }

    #[test]
    fn power4_out_front_loads_progress() {
        let e = EasingFunction::Power4Out;
        assert!(e.evaluate(0.25) > 0.7);
        assert_relative_eq!(e.evaluate(0.5), 1.0 - 0.5f32.powi(5));
    }

    #[test]
    fn quadratic_curves() {
        assert_eq!(EasingFunction::QuadraticIn.evaluate(0.5), 0.25);
        assert_eq!(EasingFunction::QuadraticOut.evaluate(0.5), 0.75);
    }

    #[test]
    fn deserializes_snake_case_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            easing: EasingFunction,
        }
        let parsed: Wrapper = toml::from_str("easing = \"power4_out\"").unwrap();
        assert_eq!(parsed.easing, EasingFunction::Power4Out);
    }
}
