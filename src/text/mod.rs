//! Flat 3D text: typeface outlines turned into centred triangle meshes.

pub mod mesh;
pub mod outline;

pub use mesh::{build_text_mesh, triangulate, TextMesh};
