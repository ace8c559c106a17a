//! Centralized tuning options with TOML file support.
//!
//! Every constant the timeline depends on (camera distance, layout pattern,
//! palettes, scroll smoothing, tween durations, asset manifest) lives here.
//! All sub-structs use `#[serde(default)]` so partial TOML files (e.g. only
//! overriding `[interaction]`) work.

mod assets;
mod camera;
mod colors;
mod interaction;
mod scene;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use colors::{srgb_hex_to_linear, ColorOptions, Palette};
pub use interaction::InteractionOptions;
pub use scene::{LabelOptions, SceneOptions};
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera placement and parallax.
    pub camera: CameraOptions,
    /// Layout, fog and labels.
    pub scene: SceneOptions,
    /// Colour palettes.
    pub colors: ColorOptions,
    /// Scroll, focus and transition tuning.
    pub interaction: InteractionOptions,
    /// Asset manifest and loading policy.
    pub assets: AssetOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Io`] if the file cannot be read and
    /// [`TimelineError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, TimelineError> {
        toml::from_str(content)
            .map_err(|e| TimelineError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), TimelineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TimelineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(TimelineError::Io)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::animation::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[interaction]
scroll_speed = 45.0

[interaction.focus]
easing = "power4_out"

[colors.closing]
label = 0xFFFFFF
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.interaction.scroll_speed, 45.0);
        assert_eq!(opts.interaction.focus.easing, EasingFunction::Power4Out);
        assert_eq!(opts.interaction.focus.seconds, 1.5);
        assert_eq!(opts.colors.closing.label, 0xFF_FFFF);
        assert_eq!(opts.colors.closing.background, 0x01_2534);
        assert_eq!(opts.colors.closing.fog, 0x01_2534);
        assert_eq!(opts.colors.closing.gradient, 0x01_2534);
        assert_eq!(opts.colors.opening, Palette::opening());
        assert_eq!(opts.camera.distance, 900.0);
        assert_eq!(opts.scene.labels.len(), 2);
    }

    #[test]
    fn partial_opening_palette_keeps_opening_defaults() {
        let toml_str = r#"
[colors.opening]
background = 0x000000
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.colors.opening.background, 0);
        assert_eq!(opts.colors.opening.label, 0x1B_42D8);
        assert_eq!(opts.colors.closing, Palette::closing());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[camera\ndistance = ").unwrap_err();
        assert!(matches!(err, TimelineError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("slow.toml");
        let mut opts = Options::default();
        opts.interaction.scroll_smoothing = 20.0;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn zero_timeout_waits_forever() {
        let mut assets = AssetOptions::default();
        assert!(assets.load_timeout().is_some());
        assets.load_timeout_secs = 0.0;
        assert!(assets.load_timeout().is_none());
        assets.load_timeout_secs = -4.0;
        assert!(assets.load_timeout().is_none());
    }

    #[test]
    fn infinite_durations_do_not_panic() {
        let toml_str = r#"
[assets]
load_timeout_secs = inf

[interaction.focus]
seconds = inf
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(opts.assets.load_timeout().is_none());
        assert!(opts.interaction.focus.duration().is_zero());
    }

    #[test]
    fn hex_colors_convert_to_linear() {
        let white = srgb_hex_to_linear(0xFF_FFFF);
        assert_relative_eq!(white.x, 1.0, epsilon = 1e-6);
        assert_eq!(srgb_hex_to_linear(0), glam::Vec3::ZERO);
        let c = srgb_hex_to_linear(0x00_80_00);
        assert_eq!(c.x, 0.0);
        assert_relative_eq!(c.y, 0.2158, epsilon = 1e-3);
    }
}
