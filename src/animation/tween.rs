//! Time-bounded interpolation of a single property.
//!
//! Every animated property owns at most one active [`Tween`]. Starting a
//! new tween replaces the previous one and begins from whatever value the
//! property currently shows, so two tweens can never both write the same
//! property in one frame.

use std::time::Duration;

use glam::{Vec2, Vec3};
use web_time::Instant;

use super::transition::Transition;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `other` by `t` (0 = self, 1 = other).
    #[must_use]
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// One in-flight interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
    transition: Transition,
}

impl<T: Lerp> Tween<T> {
    /// Start a tween at `start`.
    #[must_use]
    pub fn new(from: T, to: T, transition: Transition, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration: transition.duration(),
            transition,
        }
    }

    /// Raw progress in [0, 1] at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased value at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> T {
        let eased = self.transition.easing.evaluate(self.progress(now));
        self.from.lerp_to(self.to, eased)
    }

    /// End value.
    #[must_use]
    pub fn target(&self) -> T {
        self.to
    }

    /// Whether the tween has run its full duration at `now`.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// A property value with an optional active tween.
#[derive(Debug, Clone, Copy)]
pub struct Animated<T: Lerp> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Lerp> Animated<T> {
    /// Resting property at `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    /// Value as of the last [`update`](Self::update) or direct write.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Where the property is heading: the active tween's end value, or the
    /// current value when idle.
    #[must_use]
    pub fn target(&self) -> T {
        self.tween.as_ref().map_or(self.value, Tween::target)
    }

    /// Whether a tween is still attached.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Write a value directly, dropping any active tween.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.tween = None;
    }

    /// Tween from the current value to `target`, replacing any active
    /// tween.
    pub fn animate_to(
        &mut self,
        target: T,
        transition: Transition,
        now: Instant,
    ) {
        self.tween = Some(Tween::new(self.value, target, transition, now));
    }

    /// Advance to `now`. Returns `true` while a tween is still running.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(tween) = self.tween else {
            return false;
        };
        self.value = tween.sample(now);
        if tween.is_finished(now) {
            self.value = tween.target();
            self.tween = None;
            return false;
        }
        true
    }
}

impl<T: Lerp + Default> Default for Animated<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::animation::easing::EasingFunction;

    fn linear(seconds: f32) -> Transition {
        Transition::new(seconds, EasingFunction::Linear)
    }

    #[test]
    fn tween_reaches_target_and_detaches() {
        let t0 = Instant::now();
        let mut a = Animated::new(0.0_f32);
        a.animate_to(10.0, linear(1.0), t0);
        assert!(a.update(t0 + Duration::from_millis(500)));
        assert_relative_eq!(a.value(), 5.0, epsilon = 1e-3);
        assert!(!a.update(t0 + Duration::from_secs(2)));
        assert_eq!(a.value(), 10.0);
        assert!(!a.is_animating());
    }

    #[test]
    fn new_tween_replaces_old_from_current_value() {
        let t0 = Instant::now();
        let mut a = Animated::new(0.0_f32);
        a.animate_to(100.0, linear(1.0), t0);
        let mid = t0 + Duration::from_millis(250);
        let _ = a.update(mid);
        assert_relative_eq!(a.value(), 25.0, epsilon = 1e-3);

        a.animate_to(0.0, linear(1.0), mid);
        assert_eq!(a.target(), 0.0);
        let _ = a.update(mid + Duration::from_millis(500));
        assert_relative_eq!(a.value(), 12.5, epsilon = 1e-3);
        let _ = a.update(mid + Duration::from_secs(5));
        assert_eq!(a.value(), 0.0);
    }

    #[test]
    fn direct_set_cancels_tween() {
        let t0 = Instant::now();
        let mut a = Animated::new(Vec2::ZERO);
        a.animate_to(Vec2::ONE, linear(1.0), t0);
        a.set(Vec2::new(3.0, 4.0));
        assert!(!a.is_animating());
        assert!(!a.update(t0 + Duration::from_secs(1)));
        assert_eq!(a.value(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn instant_transition_applies_on_next_update() {
        let t0 = Instant::now();
        let mut a = Animated::new(Vec3::ZERO);
        a.animate_to(Vec3::X, Transition::instant(), t0);
        assert_eq!(a.value(), Vec3::ZERO);
        assert!(!a.update(t0));
        assert_eq!(a.value(), Vec3::X);
    }

    #[test]
    fn target_reports_value_when_idle() {
        let a = Animated::new(7.0_f32);
        assert_eq!(a.target(), 7.0);
    }
}
