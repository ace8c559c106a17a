//! Procedural grid layout: a repeating x/y pattern receding in depth.

use glam::Vec2;

/// Slot position for item `index`, cycling through `pattern`.
///
/// An empty pattern places every item at the origin.
#[must_use]
pub fn grid_position(pattern: &[[f32; 2]], index: usize) -> Vec2 {
    if pattern.is_empty() {
        return Vec2::ZERO;
    }
    Vec2::from_array(pattern[index % pattern.len()])
}

/// Depth of item `index` relative to the grid: each item sits `spacing`
/// further from the camera than the previous one.
#[must_use]
pub fn grid_depth(spacing: f32, index: usize) -> f32 {
    -spacing * index as f32
}

/// Grid z that brings an item at `depth` to `focus_depth` in front of the
/// grid origin.
#[must_use]
pub fn focus_grid_z(depth: f32, focus_depth: f32) -> f32 {
    -depth + focus_depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;

    #[test]
    fn pattern_repeats_every_four_items() {
        let layout = SceneOptions::default().layout;
        let expected = [
            Vec2::new(-350.0, 350.0),
            Vec2::new(350.0, 350.0),
            Vec2::new(350.0, -350.0),
            Vec2::new(-350.0, -350.0),
        ];
        for i in 0..12 {
            assert_eq!(grid_position(&layout, i), expected[i % 4]);
            assert_eq!(grid_position(&layout, i), grid_position(&layout, i + 4));
        }
    }

    #[test]
    fn depth_recedes_linearly() {
        assert_eq!(grid_depth(300.0, 0), 0.0);
        assert_eq!(grid_depth(300.0, 1), -300.0);
        assert_eq!(grid_depth(300.0, 7), -2100.0);
    }

    #[test]
    fn focus_places_item_in_front_of_origin() {
        let depth = grid_depth(300.0, 3);
        assert_eq!(focus_grid_z(depth, 200.0), 1100.0);
        assert_eq!(focus_grid_z(depth, 200.0) + depth, 200.0);
    }

    #[test]
    fn empty_pattern_stacks_at_origin() {
        assert_eq!(grid_position(&[], 5), Vec2::ZERO);
    }
}
