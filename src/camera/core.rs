use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::options::CameraOptions;

/// Perspective camera at a fixed position, tilted by an Euler rotation.
///
/// The field of view is derived from the viewport height and the camera
/// distance so that one world unit maps to one pixel on the `z = 0` plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Euler rotation in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

/// A world-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Normalized direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Vertical field of view (degrees) that shows `height` pixels at
/// `distance` from the camera.
#[must_use]
pub fn fov_for_height(height: f32, distance: f32) -> f32 {
    (2.0 * (height / 2.0 / distance).atan()).to_degrees()
}

impl Camera {
    /// Camera on the +Z axis looking at the origin, sized for a viewport.
    #[must_use]
    pub fn new(options: &CameraOptions, width: f32, height: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, options.distance),
            rotation: Vec3::ZERO,
            aspect: 1.0,
            fovy: 45.0,
            znear: options.znear,
            zfar: options.zfar,
        };
        camera.resize(width, height);
        camera
    }

    /// Recompute aspect ratio and field of view for a new viewport.
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.aspect = width / height;
        self.fovy = fov_for_height(height, self.position.z);
    }

    /// Set the x/y tilt, leaving z rotation untouched.
    pub fn set_tilt(&mut self, tilt: Vec2) {
        self.rotation.x = tilt.x;
        self.rotation.y = tilt.y;
    }

    /// Orientation as a quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
            .inverse()
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray through a point in normalized device coordinates.
    #[must_use]
    pub fn ray(&self, ndc: Vec2) -> Ray {
        let inv_view_proj = self.build_matrix().inverse();
        let near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let origin = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray {
            origin,
            direction: (far - origin).normalize(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view matrices and camera position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// World-to-view matrix, used for fog depth.
    pub view: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.view = camera.view().to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}
