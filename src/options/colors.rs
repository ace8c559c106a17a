use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize};

/// One colour scheme. Values are `0xRRGGBB` sRGB hex so TOML files can
/// write them as `background = 0xAEC7C3`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    /// Clear colour behind the grid.
    pub background: u32,
    /// Colour distant geometry fades into.
    pub fog: u32,
    /// Fill colour of the text labels.
    pub label: u32,
    /// Tint blended over unfocused item textures.
    pub gradient: u32,
}

impl Palette {
    /// Palette shown at startup.
    #[must_use]
    pub fn opening() -> Self {
        Self {
            background: 0xAEC7C3,
            fog: 0xAEC7C3,
            label: 0x1B42D8,
            gradient: 0x1B42D8,
        }
    }

    /// Palette faded to once the grid scrolls past the colour threshold.
    #[must_use]
    pub fn closing() -> Self {
        Self {
            background: 0x012534,
            fog: 0x012534,
            label: 0xFD6F53,
            gradient: 0x012534,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::opening()
    }
}

/// A palette table as written in TOML, where any colour may be omitted.
#[derive(Debug, Deserialize)]
struct PartialPalette {
    background: Option<u32>,
    fog: Option<u32>,
    label: Option<u32>,
    gradient: Option<u32>,
}

impl PartialPalette {
    fn over(self, base: Palette) -> Palette {
        Palette {
            background: self.background.unwrap_or(base.background),
            fog: self.fog.unwrap_or(base.fog),
            label: self.label.unwrap_or(base.label),
            gradient: self.gradient.unwrap_or(base.gradient),
        }
    }
}

fn opening_palette<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Palette, D::Error> {
    Ok(PartialPalette::deserialize(deserializer)?.over(Palette::opening()))
}

fn closing_palette<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Palette, D::Error> {
    Ok(PartialPalette::deserialize(deserializer)?.over(Palette::closing()))
}

/// Colour palettes for the two halves of the timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColorOptions {
    /// Palette in effect at startup.
    #[serde(deserialize_with = "opening_palette")]
    pub opening: Palette,
    /// Palette after the one-shot transition. Colours left out of the
    /// table keep their closing defaults.
    #[serde(deserialize_with = "closing_palette")]
    pub closing: Palette,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            opening: Palette::opening(),
            closing: Palette::closing(),
        }
    }
}

/// Convert `0xRRGGBB` sRGB hex to linear RGB.
#[must_use]
pub fn srgb_hex_to_linear(hex: u32) -> Vec3 {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(16), channel(8), channel(0))
}
