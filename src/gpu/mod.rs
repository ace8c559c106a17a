//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the depth buffer, media
//! textures with anisotropic sampling, and pipeline boilerplate.

/// Shared wgpu boilerplate helpers for mesh pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth and media texture wrappers.
pub mod texture;
