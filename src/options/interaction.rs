use serde::{Deserialize, Serialize};

use crate::animation::{EasingFunction, Transition};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scroll, focus and palette-transition tuning.
pub struct InteractionOptions {
    /// World units of scroll per normalized wheel notch.
    pub scroll_speed: f32,
    /// Divisor applied to the remaining scroll distance each frame.
    pub scroll_smoothing: f32,
    /// Scrolling stops once a frame's step is at or below this size.
    pub scroll_settle: f32,
    /// Grid depth past which the closing palette fades in.
    pub color_threshold: f32,
    /// Focus / unfocus tween.
    pub focus: Transition,
    /// Palette fade tween.
    pub palette: Transition,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            scroll_speed: 30.0,
            scroll_smoothing: 12.0,
            scroll_settle: 0.1,
            color_threshold: 1300.0,
            focus: Transition::new(1.5, EasingFunction::ExpoInOut),
            palette: Transition::new(3.0, EasingFunction::ExpoInOut),
        }
    }
}
