//! Triangulated text geometry.

use glam::{Vec2, Vec3};
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};

use super::outline::{contains, flatten};
use crate::assets::Typeface;

/// Flat triangle mesh in the label's local XY plane (z = 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    /// Vertex positions, centred on the text's bounding box.
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl TextMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        }))
    }

    fn append(&mut self, positions: &[Vec2], indices: &[u32]) {
        let base = self.positions.len() as u32;
        self.positions
            .extend(positions.iter().map(|p| p.extend(0.0)));
        self.indices.extend(indices.iter().map(|i| base + i));
    }
}

/// Lay out `text` left to right and triangulate every glyph.
///
/// Glyph outlines are flattened with `curve_segments` pieces per curve and
/// scaled by `size / resolution`. The finished mesh is centred on its
/// bounding box.
#[must_use]
pub fn build_text_mesh(
    font: &Typeface,
    text: &str,
    size: f32,
    curve_segments: u32,
) -> TextMesh {
    let scale = size / font.resolution;
    let mut mesh = TextMesh::default();
    let mut pen = 0.0;

    for ch in text.chars() {
        let Some(glyph) = font.glyph(ch) else {
            log::debug!("{}: no glyph for {ch:?}", font.family_name);
            continue;
        };
        let contours: Vec<Vec<Vec2>> = flatten(&glyph.outline, curve_segments)
            .into_iter()
            .map(|contour| {
                contour
                    .into_iter()
                    .map(|p| Vec2::new(pen + p.x * scale, p.y * scale))
                    .collect()
            })
            .collect();
        let (positions, indices) = triangulate(&contours);
        mesh.append(&positions, &indices);
        pen += glyph.advance * scale;
    }

    if let Some((lo, hi)) = mesh.bounds() {
        let centre = (lo + hi) * 0.5;
        for p in &mut mesh.positions {
            *p -= centre;
        }
    }
    mesh
}

/// Constrained Delaunay triangulation of a set of closed contours, keeping
/// only the faces whose centroid is inside by the even-odd rule.
#[must_use]
pub fn triangulate(contours: &[Vec<Vec2>]) -> (Vec<Vec2>, Vec<u32>) {
    let mut cdt: ConstrainedDelaunayTriangulation<Point2<f64>> =
        ConstrainedDelaunayTriangulation::new();

    for contour in contours {
        let mut handles: Vec<FixedVertexHandle> = Vec::with_capacity(contour.len());
        for p in contour {
            match cdt.insert(Point2::new(f64::from(p.x), f64::from(p.y))) {
                Ok(handle) => handles.push(handle),
                Err(e) => log::warn!("dropping outline point {p}: {e:?}"),
            }
        }
        let n = handles.len();
        for i in 0..n {
            let (from, to) = (handles[i], handles[(i + 1) % n]);
            if from != to && cdt.can_add_constraint(from, to) {
                let _ = cdt.add_constraint(from, to);
            }
        }
    }

    let positions: Vec<Vec2> = cdt
        .vertices()
        .map(|v| {
            let p = v.position();
            Vec2::new(p.x as f32, p.y as f32)
        })
        .collect();

    let mut indices = Vec::new();
    for face in cdt.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| v.fix().index());
        let centroid = (positions[a] + positions[b] + positions[c]) / 3.0;
        if contains(contours, centroid) {
            indices.extend([a as u32, b as u32, c as u32]);
        }
    }
    (positions, indices)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::assets::{Glyph, OutlineCommand};

    fn square(min: f32, max: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(min, min),
            Vec2::new(max, min),
            Vec2::new(max, max),
            Vec2::new(min, max),
        ]
    }

    fn area(positions: &[Vec2], indices: &[u32]) -> f32 {
        indices
            .chunks_exact(3)
            .map(|t| {
                let (a, b, c) = (
                    positions[t[0] as usize],
                    positions[t[1] as usize],
                    positions[t[2] as usize],
                );
                ((b - a).perp_dot(c - a) * 0.5).abs()
            })
            .sum()
    }

    #[test]
    fn square_with_hole_excludes_the_hole() {
        let contours = [square(0.0, 10.0), square(3.0, 7.0)];
        let (positions, indices) = triangulate(&contours);
        assert_eq!(positions.len(), 8);
        assert_eq!(indices.len() / 3, 8);
        assert_relative_eq!(area(&positions, &indices), 100.0 - 16.0, epsilon = 1e-3);
    }

    #[test]
    fn concave_outline_stays_inside() {
        // An L shape: the notch must not be filled.
        let l = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let (positions, indices) = triangulate(&[l]);
        assert_relative_eq!(area(&positions, &indices), 7.0, epsilon = 1e-4);
    }

    fn block_font() -> Typeface {
        let mut font = Typeface::empty("Block");
        let outline = vec![
            OutlineCommand::MoveTo(Vec2::new(0.0, 0.0)),
            OutlineCommand::LineTo(Vec2::new(500.0, 0.0)),
            OutlineCommand::LineTo(Vec2::new(500.0, 1000.0)),
            OutlineCommand::LineTo(Vec2::new(0.0, 1000.0)),
            OutlineCommand::Close,
        ];
        font.insert_glyph(
            'I',
            Glyph {
                advance: 1000.0,
                outline,
            },
        );
        font.insert_glyph(
            ' ',
            Glyph {
                advance: 500.0,
                outline: Vec::new(),
            },
        );
        font
    }

    #[test]
    fn text_is_scaled_laid_out_and_centred() {
        let font = block_font();
        let mesh = build_text_mesh(&font, "I I", 200.0, 20);
        assert_eq!(mesh.triangle_count(), 4);
        let (lo, hi) = mesh.bounds().unwrap();
        // Two 100-wide blocks, pen advancing 200 then 100.
        assert_relative_eq!(hi.x - lo.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(hi.y - lo.y, 200.0, epsilon = 1e-3);
        assert_relative_eq!(lo.x, -hi.x, epsilon = 1e-3);
        assert_relative_eq!(lo.y, -hi.y, epsilon = 1e-3);
        assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let mesh = build_text_mesh(&block_font(), "xyz", 200.0, 20);
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
    }
}
