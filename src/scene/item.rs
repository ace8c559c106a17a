use glam::{Vec2, Vec3};
use web_time::Instant;

use crate::animation::{Animated, Transition};

// ---------------------------------------------------------------------------
// ItemParams
// ---------------------------------------------------------------------------

/// Per-item shader parameters.
///
/// Fog colour and range are shared by the whole scene and are supplied by
/// [`Fog`] when the parameters are packed for the GPU.
#[derive(Debug, Clone, Copy)]
pub struct ItemParams {
    /// Seconds since the scene was built.
    pub time: f32,
    /// Overall alpha; fades to 0 while another item is focused.
    pub opacity: Animated<f32>,
    /// Focus progress: 0 shows the gradient tint, 1 the plain texture.
    pub progress: Animated<f32>,
    /// Linear RGB tint blended over the texture.
    pub gradient: Animated<Vec3>,
}

impl ItemParams {
    /// Fully opaque, unfocused parameters tinted with `gradient`.
    #[must_use]
    pub fn new(gradient: Vec3) -> Self {
        Self {
            time: 0.0,
            opacity: Animated::new(1.0),
            progress: Animated::new(0.0),
            gradient: Animated::new(gradient),
        }
    }

    /// Advance every tween. Returns `true` while any is still running.
    pub fn update(&mut self, now: Instant) -> bool {
        let opacity = self.opacity.update(now);
        let progress = self.progress.update(now);
        let gradient = self.gradient.update(now);
        opacity || progress || gradient
    }
}

/// Linear depth fog shared by items and labels.
#[derive(Debug, Clone, Copy)]
pub struct Fog {
    /// Linear RGB colour geometry fades into.
    pub color: Animated<Vec3>,
    /// View distance where fog starts.
    pub near: f32,
    /// View distance where fog is total.
    pub far: f32,
}

// ---------------------------------------------------------------------------
// GridItem
// ---------------------------------------------------------------------------

/// One textured, focusable plane in the grid.
#[derive(Debug, Clone)]
pub struct GridItem {
    /// Asset id of the texture shown on the plane.
    pub id: String,
    /// Index of the texture in registry order.
    pub texture: usize,
    /// Shader parameters.
    pub params: ItemParams,
    /// Quad width and height in world units.
    pub size: Vec2,
    /// Current x/y position relative to the grid.
    pub position: Animated<Vec2>,
    /// Layout slot position the item returns to when unfocused.
    pub origin: Vec2,
    /// Z offset relative to the grid.
    pub depth: f32,
    active: bool,
}

impl GridItem {
    /// Item resting at its layout slot.
    #[must_use]
    pub fn new(
        id: String,
        texture: usize,
        size: Vec2,
        origin: Vec2,
        depth: f32,
        gradient: Vec3,
    ) -> Self {
        Self {
            id,
            texture,
            params: ItemParams::new(gradient),
            size,
            position: Animated::new(origin),
            origin,
            depth,
            active: false,
        }
    }

    /// Advance every tween. Returns `true` while any is still running.
    pub fn update(&mut self, now: Instant) -> bool {
        let moving = self.position.update(now);
        self.params.update(now) || moving
    }

    /// Position relative to the grid origin, including depth.
    #[must_use]
    pub fn local_position(&self) -> Vec3 {
        self.position.value().extend(self.depth)
    }
}

// ---------------------------------------------------------------------------
// Focusable
// ---------------------------------------------------------------------------

/// Something that toggles between a resting and a focused presentation.
pub trait Focusable {
    /// Whether the item is currently focused.
    fn is_active(&self) -> bool;

    /// Toggle focus, starting the presentation tweens. Returns the new
    /// active state.
    fn try_focus(&mut self, transition: Transition, now: Instant) -> bool;

    /// Fade in or out while another item holds focus.
    fn set_dimmed(&mut self, dimmed: bool, transition: Transition, now: Instant);
}

impl Focusable for GridItem {
    fn is_active(&self) -> bool {
        self.active
    }

    fn try_focus(&mut self, transition: Transition, now: Instant) -> bool {
        self.active = !self.active;
        let (position, progress) = if self.active {
            (Vec2::ZERO, 1.0)
        } else {
            (self.origin, 0.0)
        };
        self.position.animate_to(position, transition, now);
        self.params.progress.animate_to(progress, transition, now);
        self.active
    }

    fn set_dimmed(&mut self, dimmed: bool, transition: Transition, now: Instant) {
        let opacity = if dimmed { 0.0 } else { 1.0 };
        self.params.opacity.animate_to(opacity, transition, now);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn item() -> GridItem {
        GridItem::new(
            "january/nala.jpg".into(),
            0,
            Vec2::new(320.0, 240.0),
            Vec2::new(350.0, -350.0),
            -600.0,
            Vec3::ONE,
        )
    }

    #[test]
    fn focus_moves_to_centre_and_back() {
        let t0 = Instant::now();
        let transition = Transition::default();
        let mut item = item();

        assert!(item.try_focus(transition, t0));
        assert!(item.is_active());
        assert_eq!(item.position.target(), Vec2::ZERO);
        assert_eq!(item.params.progress.target(), 1.0);

        let done = t0 + Duration::from_secs(2);
        assert!(!item.update(done));
        assert_eq!(item.local_position(), Vec3::new(0.0, 0.0, -600.0));

        assert!(!item.try_focus(transition, done));
        assert_eq!(item.position.target(), Vec2::new(350.0, -350.0));
        assert_eq!(item.params.progress.target(), 0.0);
    }

    #[test]
    fn dimming_only_touches_opacity() {
        let t0 = Instant::now();
        let mut item = item();
        item.set_dimmed(true, Transition::default(), t0);
        assert_eq!(item.params.opacity.target(), 0.0);
        assert!(!item.is_active());
        assert!(!item.position.is_animating());
        item.set_dimmed(false, Transition::default(), t0);
        assert_eq!(item.params.opacity.target(), 1.0);
    }
}
