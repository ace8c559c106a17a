use glam::Vec3;

use crate::text::TextMesh;

/// A flat text mesh placed in the grid.
///
/// Geometry is fixed once built; the fill colour is shared by all labels
/// and lives on the [`Scene`](super::Scene).
#[derive(Debug, Clone)]
pub struct Label {
    /// Text the mesh spells.
    pub text: String,
    /// Centre of the mesh relative to the grid origin.
    pub position: Vec3,
    /// Centred triangle mesh in local coordinates.
    pub mesh: TextMesh,
}

impl Label {
    /// Triangles offset by the label position plus `grid_offset`.
    pub fn world_triangles(
        &self,
        grid_offset: Vec3,
    ) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let offset = self.position + grid_offset;
        self.mesh
            .triangles()
            .map(move |tri| tri.map(|p| p + offset))
    }
}
