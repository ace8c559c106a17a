//! Tweening primitives for the timeline's animated properties.

/// Easing curves.
pub mod easing;
/// Duration + easing pairs.
pub mod transition;
/// Single-property tweens and the [`Animated`](tween::Animated) wrapper.
pub mod tween;

pub use easing::EasingFunction;
pub use transition::Transition;
pub use tween::{Animated, Lerp, Tween};
