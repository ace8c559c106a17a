//! Transition describes how a property moves from its current value to a
//! new target.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;

/// Duration and easing curve for one tweened change.
///
/// Consumers construct transitions via [`Transition::new`] or the preset
/// [`Transition::instant`]; durations are stored in seconds so the options
/// file stays readable:
///
/// ```toml
/// [interaction.focus]
/// seconds = 1.5
/// easing = "expo_in_out"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    /// Length of the tween in seconds.
    pub seconds: f32,
    /// Easing curve applied to normalized progress.
    pub easing: EasingFunction,
}

impl Transition {
    /// Transition with an explicit duration and easing.
    #[must_use]
    pub fn new(seconds: f32, easing: EasingFunction) -> Self {
        Self { seconds, easing }
    }

    /// Zero-length transition; the target applies on the next update.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            seconds: 0.0,
            easing: EasingFunction::Linear,
        }
    }

    /// Duration as a [`Duration`]. Negative or non-finite values are zero.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.seconds.max(0.0))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(1.5, EasingFunction::ExpoInOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_focus_tween() {
        let t = Transition::default();
        assert_eq!(t.seconds, 1.5);
        assert_eq!(t.easing, EasingFunction::ExpoInOut);
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let t = Transition::new(-2.0, EasingFunction::Linear);
        assert_eq!(t.duration(), Duration::ZERO);
        assert_eq!(Transition::instant().duration(), Duration::ZERO);
    }

    #[test]
    fn infinite_duration_is_instant() {
        let t = Transition::new(f32::INFINITY, EasingFunction::ExpoInOut);
        assert_eq!(t.duration(), Duration::ZERO);
        let t = Transition::new(f32::NAN, EasingFunction::Linear);
        assert_eq!(t.duration(), Duration::ZERO);
    }
}
