//! CPU ray casting against item quads and label triangles.

use glam::{Vec2, Vec3};

use crate::camera::Ray;

/// Rays closer to parallel than this miss.
const PARALLEL_EPSILON: f32 = 1e-6;

/// What a pick ray hit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickTarget {
    /// Nothing under the pointer.
    #[default]
    None,
    /// Grid item by index.
    Item(usize),
    /// Text label by index.
    Label(usize),
}

impl PickTarget {
    /// Item index, if an item was hit.
    #[must_use]
    pub fn as_item(self) -> Option<usize> {
        match self {
            Self::Item(index) => Some(index),
            _ => None,
        }
    }
}

/// Distance along `ray` to an axis-aligned rectangle facing +Z, centred
/// at `centre` with the given full `size`.
#[must_use]
pub fn ray_rect(ray: &Ray, centre: Vec3, size: Vec2) -> Option<f32> {
    if ray.direction.z.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (centre.z - ray.origin.z) / ray.direction.z;
    if t <= 0.0 {
        return None;
    }
    let hit = ray.at(t);
    let half = size * 0.5;
    ((hit.x - centre.x).abs() <= half.x && (hit.y - centre.y).abs() <= half.y)
        .then_some(t)
}

/// Möller–Trumbore ray/triangle intersection, both faces.
#[must_use]
pub fn ray_triangle(ray: &Ray, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = edge2.dot(q) * inv_det;
    (t > 0.0).then_some(t)
}
