use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::AssetManifest;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// What to load and how long to wait for it.
pub struct AssetOptions {
    /// Give up on loading after this many seconds. `0` waits forever.
    pub load_timeout_secs: f32,
    /// Font family used for labels. Falls back to the first loaded font.
    pub label_font: String,
    /// Files to load.
    pub manifest: AssetManifest,
}

impl AssetOptions {
    /// Loading deadline, or `None` to wait indefinitely. Zero, negative
    /// and non-finite values all mean no deadline.
    #[must_use]
    pub fn load_timeout(&self) -> Option<Duration> {
        Duration::try_from_secs_f32(self.load_timeout_secs)
            .ok()
            .filter(|timeout| !timeout.is_zero())
    }
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            load_timeout_secs: 30.0,
            label_font: "Schnyder L".into(),
            manifest: AssetManifest::default(),
        }
    }
}
