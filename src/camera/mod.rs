//! Fixed-position perspective camera with parallax tilt and ray casting.

/// Core camera struct, rays and GPU uniform types.
pub mod core;

pub use self::core::{fov_for_height, Camera, CameraUniform, Ray};
