use serde::{Deserialize, Serialize};

/// A static text label placed in the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelOptions {
    /// Text to render.
    pub text: String,
    /// Position of the label's centre relative to the grid origin.
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Grid layout, fog and label parameters.
pub struct SceneOptions {
    /// Repeating (x, y) pattern; item `i` takes entry `i % len`.
    pub layout: Vec<[f32; 2]>,
    /// Depth distance between consecutive items.
    pub item_spacing: f32,
    /// Distance between a focused item and the camera plane offset; the
    /// grid moves so the focused item sits at this depth.
    pub focus_depth: f32,
    /// Fog start distance.
    pub fog_near: f32,
    /// Fog end distance (fully fogged).
    pub fog_far: f32,
    /// Glyph height of label text in world units.
    pub label_size: f32,
    /// Line segments per glyph curve.
    pub curve_segments: u32,
    /// Labels to build.
    pub labels: Vec<LabelOptions>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            layout: vec![
                [-350.0, 350.0],
                [350.0, 350.0],
                [350.0, -350.0],
                [-350.0, -350.0],
            ],
            item_spacing: 300.0,
            focus_depth: 200.0,
            fog_near: 1400.0,
            fog_far: 2000.0,
            label_size: 200.0,
            curve_segments: 20,
            labels: vec![
                LabelOptions {
                    text: "JANUARY".into(),
                    position: [-5.0, 0.0, -550.0],
                },
                LabelOptions {
                    text: "FEBRUARY".into(),
                    position: [140.0, 0.0, -2850.0],
                },
            ],
        }
    }
}
