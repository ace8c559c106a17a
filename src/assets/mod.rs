//! Asset manifest, loaded-asset registry, and the parallel loader.
//!
//! The manifest is a fixed list of clips, categorized images and typeface
//! files. [`loader::load_all`] reads and decodes every entry on its own
//! worker thread and joins them into an [`AssetRegistry`] that preserves
//! manifest order, which in turn fixes each item's slot in the grid.

/// Parallel fetch-and-join over a manifest.
pub mod loader;
/// Image and animated-clip decoding.
pub mod media;
/// Typeface JSON font parsing.
pub mod typeface;

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub use loader::load_all;
pub use media::{MediaFrame, MediaSurface};
pub use typeface::{Glyph, OutlineCommand, Typeface};

/// A looping animated clip, the stand-in for a page-provided video element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClipEntry {
    /// Identifier the clip is registered under.
    pub id: String,
    /// Path relative to the manifest root.
    pub path: String,
}

/// Images that share a category directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageCategory {
    /// Directory name under the manifest root, also the id prefix.
    pub name: String,
    /// File names inside the directory, in display order.
    pub files: Vec<String>,
}

/// Everything the timeline loads at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetManifest {
    /// Directory every relative path is resolved against.
    pub root: PathBuf,
    /// Typeface JSON files, relative to `root`.
    pub fonts: Vec<String>,
    /// Animated clips, placed first in the grid.
    pub clips: Vec<ClipEntry>,
    /// Image categories, placed after the clips.
    pub images: Vec<ImageCategory>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let category = |name: &str, files: &[&str]| ImageCategory {
            name: name.to_owned(),
            files: files.iter().map(|f| (*f).to_owned()).collect(),
        };
        Self {
            root: PathBuf::from("assets"),
            fonts: vec!["fonts/schnyder.json".to_owned()],
            clips: Vec::new(),
            images: vec![
                category("january", &["nala.jpg", "nala2.jpg", "skincare.jpg"]),
                category("february", &["iat.jpg", "jekka.jpg"]),
                category("march", &["nath.jpg", "sign.jpg"]),
            ],
        }
    }
}

/// What kind of resource a manifest entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Single still image.
    Image,
    /// Looping animated frame sequence.
    Clip,
    /// Typeface JSON font.
    Font,
}

/// One file to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Registry identifier (`"{category}/{file}"` for images).
    pub id: String,
    /// Resolved filesystem path.
    pub path: PathBuf,
    /// Decoder to use.
    pub kind: AssetKind,
}

impl AssetManifest {
    /// Flatten into load order: clips, then images by category, then fonts.
    #[must_use]
    pub fn entries(&self) -> Vec<ManifestEntry> {
        let clips = self.clips.iter().map(|clip| ManifestEntry {
            id: clip.id.clone(),
            path: self.root.join(&clip.path),
            kind: AssetKind::Clip,
        });
        let images = self.images.iter().flat_map(|category| {
            category.files.iter().map(move |file| ManifestEntry {
                id: format!("{}/{file}", category.name),
                path: self.root.join(&category.name).join(file),
                kind: AssetKind::Image,
            })
        });
        let fonts = self.fonts.iter().map(|font| ManifestEntry {
            id: font.clone(),
            path: self.root.join(font),
            kind: AssetKind::Font,
        });
        clips.chain(images).chain(fonts).collect()
    }
}

/// A decoded texture source and the id it was registered under.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    /// Manifest identifier.
    pub id: String,
    /// Decoded pixels and sizing.
    pub surface: MediaSurface,
}

/// Loaded textures (in manifest order) and fonts keyed by family name.
///
/// Populated once by the loader, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    textures: Vec<TextureAsset>,
    texture_index: FxHashMap<String, usize>,
    fonts: FxHashMap<String, Typeface>,
    font_order: Vec<String>,
}

impl AssetRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a texture. Re-registering an id replaces the surface but
    /// keeps its original slot.
    pub fn insert_texture(&mut self, id: String, surface: MediaSurface) {
        if let Some(&slot) = self.texture_index.get(&id) {
            self.textures[slot].surface = surface;
            return;
        }
        let _ = self.texture_index.insert(id.clone(), self.textures.len());
        self.textures.push(TextureAsset { id, surface });
    }

    /// Register a font under its family name.
    pub fn insert_font(&mut self, typeface: Typeface) {
        let family = typeface.family_name.clone();
        if self.fonts.insert(family.clone(), typeface).is_none() {
            self.font_order.push(family);
        }
    }

    /// Textures in manifest order.
    pub fn textures(&self) -> impl Iterator<Item = &TextureAsset> {
        self.textures.iter()
    }

    /// Texture in a manifest slot.
    #[must_use]
    pub fn texture_at(&self, slot: usize) -> Option<&TextureAsset> {
        self.textures.get(slot)
    }

    /// Texture by manifest id.
    #[must_use]
    pub fn texture(&self, id: &str) -> Option<&MediaSurface> {
        self.texture_index
            .get(id)
            .map(|&slot| &self.textures[slot].surface)
    }

    /// Number of loaded textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Font by family name.
    #[must_use]
    pub fn font(&self, family: &str) -> Option<&Typeface> {
        self.fonts.get(family)
    }

    /// Font by family name, or the first font loaded when the family is
    /// missing.
    #[must_use]
    pub fn font_or_first(&self, family: &str) -> Option<&Typeface> {
        self.font(family).or_else(|| {
            self.font_order.first().and_then(|name| self.fonts.get(name))
        })
    }

    /// Family names in load order.
    pub fn font_families(&self) -> impl Iterator<Item = &str> {
        self.font_order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_orders_images_by_category() {
        let ids: Vec<String> = AssetManifest::default()
            .entries()
            .into_iter()
            .filter(|e| e.kind == AssetKind::Image)
            .map(|e| e.id)
            .collect();
        assert_eq!(
            ids,
            [
                "january/nala.jpg",
                "january/nala2.jpg",
                "january/skincare.jpg",
                "february/iat.jpg",
                "february/jekka.jpg",
                "march/nath.jpg",
                "march/sign.jpg",
            ]
        );
    }

    #[test]
    fn clips_come_first_and_fonts_last() {
        let mut manifest = AssetManifest::default();
        manifest.clips.push(ClipEntry {
            id: "intro".into(),
            path: "clips/intro.gif".into(),
        });
        let entries = manifest.entries();
        assert_eq!(entries[0].kind, AssetKind::Clip);
        assert_eq!(entries[0].path, PathBuf::from("assets/clips/intro.gif"));
        assert_eq!(entries.last().map(|e| e.kind), Some(AssetKind::Font));
        assert_eq!(entries.len(), 9);
    }

    #[test]
    fn registry_keeps_insertion_order_and_slots() {
        let mut registry = AssetRegistry::new();
        registry.insert_texture("b".into(), MediaSurface::solid(2, 2, [0; 4]));
        registry.insert_texture("a".into(), MediaSurface::solid(4, 4, [0; 4]));
        registry.insert_texture("b".into(), MediaSurface::solid(8, 8, [0; 4]));
        let ids: Vec<&str> =
            registry.textures().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(registry.texture("b").map(|s| s.width), Some(8));
        assert_eq!(registry.texture_at(1).map(|t| t.id.as_str()), Some("a"));
        assert!(registry.texture_at(2).is_none());
        assert_eq!(registry.texture_count(), 2);
    }

    #[test]
    fn font_lookup_falls_back_to_first_loaded() {
        let mut registry = AssetRegistry::new();
        assert!(registry.font_or_first("Schnyder L").is_none());
        registry.insert_font(Typeface::empty("Fallback Sans"));
        assert_eq!(
            registry
                .font_or_first("Schnyder L")
                .map(|f| f.family_name.as_str()),
            Some("Fallback Sans")
        );
    }
}
