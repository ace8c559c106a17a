//! Authoritative scene: grid items, labels, palette state and focus.
//!
//! The whole grid moves along Z as one group (`grid_z`); items and labels
//! are positioned relative to it. At most one [`GridItem`] is focused at a
//! time. While it is, every other item is faded out and hit-testing only
//! considers the focused item.

mod builder;
mod item;
mod label;
pub mod layout;
pub mod picking;

pub use builder::build_scene;
pub use item::{Focusable, Fog, GridItem, ItemParams};
pub use label::Label;
pub use picking::PickTarget;

use glam::Vec3;
use web_time::Instant;

use crate::animation::{Animated, Transition};
use crate::camera::Ray;
use crate::options::{srgb_hex_to_linear, Palette};

/// The authoritative scene.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Grid items in registry order.
    pub items: Vec<GridItem>,
    /// Text labels.
    pub labels: Vec<Label>,
    /// Linear RGB fill shared by all labels.
    pub label_color: Animated<Vec3>,
    /// Linear RGB clear colour.
    pub background: Animated<Vec3>,
    /// Depth fog.
    pub fog: Fog,
    /// Z offset of the whole grid.
    pub grid_z: Animated<f32>,
    /// Grid z to restore when the focused item is released.
    return_z: f32,
}

impl Scene {
    /// Empty scene coloured with `palette`.
    #[must_use]
    pub fn new(palette: &Palette, fog_near: f32, fog_far: f32) -> Self {
        Self {
            items: Vec::new(),
            labels: Vec::new(),
            label_color: Animated::new(srgb_hex_to_linear(palette.label)),
            background: Animated::new(srgb_hex_to_linear(palette.background)),
            fog: Fog {
                color: Animated::new(srgb_hex_to_linear(palette.fog)),
                near: fog_near,
                far: fog_far,
            },
            grid_z: Animated::new(0.0),
            return_z: 0.0,
        }
    }

    /// Index of the focused item, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<usize> {
        self.items.iter().position(Focusable::is_active)
    }

    /// Toggle focus on item `index`.
    ///
    /// Focusing remembers the current grid z, slides the item to the centre
    /// and moves the grid so the item sits `focus_depth` in front of the
    /// grid origin; every other item fades out. Releasing reverses all of
    /// it. Returns the grid z the focus tween is heading to, or `None`
    /// when the index is unknown or a different item already holds focus.
    pub fn toggle_focus(
        &mut self,
        index: usize,
        focus_depth: f32,
        transition: Transition,
        now: Instant,
    ) -> Option<f32> {
        if index >= self.items.len() {
            log::warn!("focus request for unknown item {index}");
            return None;
        }
        if let Some(active) = self.active_item().filter(|&a| a != index) {
            log::debug!(
                "ignoring focus on {}: {} is focused",
                self.items[index].id,
                self.items[active].id
            );
            return None;
        }

        let item = &mut self.items[index];
        let focusing = !item.is_active();
        if focusing {
            self.return_z = self.grid_z.value();
        }
        let _ = item.try_focus(transition, now);
        let grid_target = if focusing {
            layout::focus_grid_z(item.depth, focus_depth)
        } else {
            self.return_z
        };
        log::debug!(
            "{} {}",
            if focusing { "focusing" } else { "releasing" },
            item.id
        );

        self.grid_z.animate_to(grid_target, transition, now);
        for (i, other) in self.items.iter_mut().enumerate() {
            if i != index {
                other.set_dimmed(focusing, transition, now);
            }
        }
        if !focusing {
            self.items[index].set_dimmed(false, transition, now);
        }
        Some(grid_target)
    }

    /// Tween every palette-driven colour toward `palette`.
    pub fn apply_palette(
        &mut self,
        palette: &Palette,
        transition: Transition,
        now: Instant,
    ) {
        self.background.animate_to(
            srgb_hex_to_linear(palette.background),
            transition,
            now,
        );
        self.fog
            .color
            .animate_to(srgb_hex_to_linear(palette.fog), transition, now);
        self.label_color.animate_to(
            srgb_hex_to_linear(palette.label),
            transition,
            now,
        );
        let gradient = srgb_hex_to_linear(palette.gradient);
        for item in &mut self.items {
            item.params.gradient.animate_to(gradient, transition, now);
        }
    }

    /// Advance every tween to `now` and stamp item time with `elapsed`
    /// seconds. Returns `true` while anything is still animating.
    pub fn update(&mut self, now: Instant, elapsed: f32) -> bool {
        let mut animating = self.grid_z.update(now);
        animating |= self.background.update(now);
        animating |= self.fog.color.update(now);
        animating |= self.label_color.update(now);
        for item in &mut self.items {
            item.params.time = elapsed;
            animating |= item.update(now);
        }
        animating
    }

    /// World position of an item's centre.
    #[must_use]
    pub fn item_world_position(&self, index: usize) -> Option<Vec3> {
        let item = self.items.get(index)?;
        Some(item.local_position() + Vec3::Z * self.grid_z.value())
    }

    /// Nearest item or label along `ray`.
    ///
    /// While an item is focused only that item can be hit.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> PickTarget {
        let grid_offset = Vec3::Z * self.grid_z.value();
        let active = self.active_item();
        let mut nearest = (f32::INFINITY, PickTarget::None);

        for (i, item) in self.items.iter().enumerate() {
            if active.is_some_and(|a| a != i) {
                continue;
            }
            let centre = item.local_position() + grid_offset;
            if let Some(t) = picking::ray_rect(ray, centre, item.size) {
                if t < nearest.0 {
                    nearest = (t, PickTarget::Item(i));
                }
            }
        }

        if active.is_none() {
            for (i, label) in self.labels.iter().enumerate() {
                let hit = label
                    .world_triangles(grid_offset)
                    .filter_map(|tri| picking::ray_triangle(ray, tri))
                    .min_by(f32::total_cmp);
                if let Some(t) = hit.filter(|&t| t < nearest.0) {
                    nearest = (t, PickTarget::Label(i));
                }
            }
        }

        nearest.1
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;

    use super::*;
    use crate::text::TextMesh;

    fn scene(count: usize) -> Scene {
        let pattern = crate::options::SceneOptions::default().layout;
        let mut scene = Scene::new(&Palette::opening(), 1400.0, 2000.0);
        for i in 0..count {
            scene.items.push(GridItem::new(
                format!("item{i}"),
                i,
                Vec2::new(320.0, 240.0),
                layout::grid_position(&pattern, i),
                layout::grid_depth(300.0, i),
                Vec3::ONE,
            ));
        }
        scene
    }

    fn ray_at(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 900.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn focus_dims_others_and_release_restores_all() {
        let t0 = Instant::now();
        let transition = Transition::default();
        let mut scene = scene(6);
        scene.grid_z.set(250.0);

        let target = scene.toggle_focus(2, 200.0, transition, t0);
        assert_eq!(target, Some(800.0));
        assert_eq!(scene.active_item(), Some(2));
        for (i, item) in scene.items.iter().enumerate() {
            let expected = if i == 2 { 1.0 } else { 0.0 };
            assert_eq!(item.params.opacity.target(), expected);
        }
        assert_eq!(scene.items[2].params.progress.target(), 1.0);

        let t1 = t0 + Duration::from_secs(2);
        let _ = scene.update(t1, 2.0);
        assert_eq!(scene.grid_z.value(), 800.0);

        let target = scene.toggle_focus(2, 200.0, transition, t1);
        assert_eq!(target, Some(250.0));
        assert_eq!(scene.active_item(), None);
        assert!(scene
            .items
            .iter()
            .all(|item| item.params.opacity.target() == 1.0));
        assert_eq!(scene.items[2].params.progress.target(), 0.0);
    }

    #[test]
    fn second_focus_is_ignored_while_one_is_active() {
        let t0 = Instant::now();
        let mut scene = scene(4);
        let _ = scene.toggle_focus(0, 200.0, Transition::default(), t0);
        assert_eq!(scene.toggle_focus(1, 200.0, Transition::default(), t0), None);
        assert_eq!(scene.active_item(), Some(0));
        assert_eq!(scene.items.iter().filter(|i| i.is_active()).count(), 1);
        assert_eq!(scene.toggle_focus(9, 200.0, Transition::default(), t0), None);
    }

    #[test]
    fn pick_finds_nearest_item_under_the_ray() {
        let scene = scene(8);
        // Items 0 and 4 share the bottom-left slot; 0 is closer.
        assert_eq!(scene.pick(&ray_at(-350.0, 350.0)), PickTarget::Item(0));
        assert_eq!(scene.pick(&ray_at(350.0, -350.0)), PickTarget::Item(2));
        assert_eq!(scene.pick(&ray_at(0.0, 0.0)), PickTarget::None);
    }

    #[test]
    fn focused_item_is_the_only_pick_candidate() {
        let t0 = Instant::now();
        let mut scene = scene(8);
        let _ = scene.toggle_focus(4, 200.0, Transition::default(), t0);
        // Item 0 is nearer but ignored while 4 holds focus.
        assert_eq!(scene.pick(&ray_at(-350.0, 350.0)), PickTarget::Item(4));
        assert_eq!(scene.pick(&ray_at(350.0, 350.0)), PickTarget::None);
    }

    #[test]
    fn labels_are_pickable() {
        let mut scene = scene(0);
        scene.labels.push(Label {
            text: "X".into(),
            position: Vec3::new(0.0, 0.0, -550.0),
            mesh: TextMesh {
                positions: vec![
                    Vec3::new(-50.0, -50.0, 0.0),
                    Vec3::new(50.0, -50.0, 0.0),
                    Vec3::new(0.0, 50.0, 0.0),
                ],
                indices: vec![0, 1, 2],
            },
        });
        assert_eq!(scene.pick(&ray_at(0.0, 0.0)), PickTarget::Label(0));
        assert_eq!(scene.pick(&ray_at(200.0, 0.0)), PickTarget::None);
    }

    #[test]
    fn palette_reaches_every_colour() {
        let t0 = Instant::now();
        let mut scene = scene(3);
        let closing = Palette::closing();
        scene.apply_palette(&closing, Transition::default(), t0);
        let _ = scene.update(t0 + Duration::from_secs(5), 5.0);
        assert_eq!(scene.background.value(), srgb_hex_to_linear(closing.background));
        assert_eq!(scene.fog.color.value(), srgb_hex_to_linear(closing.fog));
        assert_eq!(scene.label_color.value(), srgb_hex_to_linear(closing.label));
        for item in &scene.items {
            assert_eq!(item.params.gradient.value(), srgb_hex_to_linear(closing.gradient));
            assert_eq!(item.params.time, 5.0);
        }
    }
}
