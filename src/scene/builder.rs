//! One-shot construction of the scene from loaded assets.

use glam::Vec3;

use super::layout::{grid_depth, grid_position};
use super::{GridItem, Label, Scene};
use crate::assets::AssetRegistry;
use crate::options::{srgb_hex_to_linear, Options};
use crate::text::build_text_mesh;

/// Build labels and grid items from a registry.
///
/// Items follow registry order, so the manifest decides each texture's
/// slot. Labels use the configured font family, falling back to the first
/// loaded font; with no fonts at all the scene has no labels.
#[must_use]
pub fn build_scene(registry: &AssetRegistry, options: &Options) -> Scene {
    let palette = &options.colors.opening;
    let scene_opts = &options.scene;
    let mut scene =
        Scene::new(palette, scene_opts.fog_near, scene_opts.fog_far);

    match registry.font_or_first(&options.assets.label_font) {
        Some(font) => {
            if font.family_name != options.assets.label_font {
                log::warn!(
                    "font {:?} not loaded, using {:?} for labels",
                    options.assets.label_font,
                    font.family_name
                );
            }
            scene.labels = scene_opts
                .labels
                .iter()
                .map(|label| Label {
                    text: label.text.clone(),
                    position: Vec3::from_array(label.position),
                    mesh: build_text_mesh(
                        font,
                        &label.text,
                        scene_opts.label_size,
                        scene_opts.curve_segments,
                    ),
                })
                .collect();
        }
        None => log::warn!("no fonts loaded, building scene without labels"),
    }

    let gradient = srgb_hex_to_linear(palette.gradient);
    scene.items = registry
        .textures()
        .enumerate()
        .map(|(i, texture)| {
            GridItem::new(
                texture.id.clone(),
                i,
                texture.surface.display_size,
                grid_position(&scene_opts.layout, i),
                grid_depth(scene_opts.item_spacing, i),
                gradient,
            )
        })
        .collect();

    log::info!(
        "scene built: {} items, {} labels",
        scene.items.len(),
        scene.labels.len()
    );
    scene
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::assets::{Glyph, MediaSurface, OutlineCommand, Typeface};
    use crate::scene::Focusable;

    fn registry(textures: usize, font: Option<&str>) -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        for i in 0..textures {
            registry.insert_texture(
                format!("january/{i}.jpg"),
                MediaSurface::solid(640, 480, [0, 0, 0, 255]),
            );
        }
        if let Some(name) = font {
            let mut typeface = Typeface::empty(name);
            for ch in "JANUARYFEB".chars() {
                typeface.insert_glyph(
                    ch,
                    Glyph {
                        advance: 600.0,
                        outline: vec![
                            OutlineCommand::MoveTo(Vec2::ZERO),
                            OutlineCommand::LineTo(Vec2::new(500.0, 0.0)),
                            OutlineCommand::LineTo(Vec2::new(250.0, 700.0)),
                            OutlineCommand::Close,
                        ],
                    },
                );
            }
            registry.insert_font(typeface);
        }
        registry
    }

    #[test]
    fn items_follow_layout_and_registry_order() {
        let scene = build_scene(&registry(6, Some("Schnyder L")), &Options::default());
        assert_eq!(scene.items.len(), 6);
        let item = &scene.items[5];
        assert_eq!(item.id, "january/5.jpg");
        assert_eq!(item.origin, Vec2::new(350.0, 350.0));
        assert_eq!(item.depth, -1500.0);
        assert_eq!(item.size, Vec2::new(320.0, 240.0));
        assert_eq!(item.params.opacity.value(), 1.0);
        assert_eq!(item.params.progress.value(), 0.0);
        assert!(scene.items.iter().all(|i| !i.is_active()));
    }

    #[test]
    fn labels_are_built_with_fallback_font() {
        let scene = build_scene(&registry(1, Some("Other")), &Options::default());
        assert_eq!(scene.labels.len(), 2);
        assert_eq!(scene.labels[0].text, "JANUARY");
        assert_eq!(scene.labels[1].position, Vec3::new(140.0, 0.0, -2850.0));
        assert!(!scene.labels[0].mesh.is_empty());
    }

    #[test]
    fn no_fonts_means_no_labels() {
        let scene = build_scene(&registry(2, None), &Options::default());
        assert!(scene.labels.is_empty());
        assert_eq!(scene.items.len(), 2);
    }
}
