use serde::{Deserialize, Serialize};

use crate::animation::{EasingFunction, Transition};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera placement, projection and parallax parameters.
pub struct CameraOptions {
    /// Distance from the origin along +Z. Also drives the field of view so
    /// one world unit maps to one pixel at the origin plane.
    pub distance: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Radians of tilt per unit of pointer offset from the viewport centre.
    pub parallax_strength: f32,
    /// How the camera eases toward a new look direction.
    pub look: Transition,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 900.0,
            znear: 1.0,
            zfar: 2000.0,
            parallax_strength: 0.5,
            look: Transition::new(3.0, EasingFunction::Power4Out),
        }
    }
}
