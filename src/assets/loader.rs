//! Parallel fetch-and-join over an [`AssetManifest`].
//!
//! Each entry is read and decoded on its own worker thread. Results flow
//! back over a channel and the caller blocks until every entry has
//! reported (the join), an entry fails, or the optional deadline passes.
//! Without a deadline a file that never finishes reading stalls startup
//! forever. Nothing is retried.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Duration;

use web_time::Instant;

use super::media::MediaSurface;
use super::typeface::Typeface;
use super::{AssetKind, AssetManifest, AssetRegistry, ManifestEntry};
use crate::error::TimelineError;

enum LoadedAsset {
    Texture(MediaSurface),
    Font(Typeface),
}

type LoadResult = Result<LoadedAsset, TimelineError>;

fn load_entry(entry: &ManifestEntry) -> LoadResult {
    let bytes =
        std::fs::read(&entry.path).map_err(|e| TimelineError::AssetLoad {
            id: entry.id.clone(),
            reason: format!("{}: {e}", entry.path.display()),
        })?;
    let decode_err = |reason: String| TimelineError::AssetLoad {
        id: entry.id.clone(),
        reason,
    };
    match entry.kind {
        AssetKind::Image => MediaSurface::decode_image(&bytes)
            .map(LoadedAsset::Texture)
            .map_err(decode_err),
        AssetKind::Clip => MediaSurface::decode_clip(bytes)
            .map(LoadedAsset::Texture)
            .map_err(decode_err),
        AssetKind::Font => Typeface::from_json(&bytes).map(LoadedAsset::Font),
    }
}

/// Load every manifest entry in parallel and join them into a registry.
///
/// Textures keep manifest order regardless of which worker finishes
/// first; fonts are keyed by family name.
///
/// # Errors
///
/// - [`TimelineError::AssetLoad`] for the first entry that fails to read
///   or decode.
/// - [`TimelineError::FontParse`] for a malformed typeface.
/// - [`TimelineError::AssetTimeout`] if `timeout` elapses first.
/// - [`TimelineError::Io`] if a worker thread cannot be spawned.
pub fn load_all(
    manifest: &AssetManifest,
    timeout: Option<Duration>,
) -> Result<AssetRegistry, TimelineError> {
    let entries = manifest.entries();
    let started = Instant::now();
    let deadline = timeout.map(|t| started + t);
    log::info!(
        "loading {} assets from {}",
        entries.len(),
        manifest.root.display()
    );

    let (tx, rx) = mpsc::channel::<(usize, LoadResult)>();
    for (slot, entry) in entries.iter().enumerate() {
        let tx = tx.clone();
        let entry = entry.clone();
        let _ = std::thread::Builder::new()
            .name(format!("asset-{slot}"))
            .spawn(move || {
                let result = load_entry(&entry);
                // The receiver is gone once loading timed out; nothing to do.
                let _ = tx.send((slot, result));
            })?;
    }
    drop(tx);

    let mut loaded: Vec<Option<LoadedAsset>> =
        entries.iter().map(|_| None).collect();
    let mut remaining = entries.len();
    while remaining > 0 {
        let received = match deadline {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                rx.recv_timeout(wait)
            }
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok((slot, result)) => {
                let asset = result?;
                log::debug!("loaded {}", entries[slot].id);
                loaded[slot] = Some(asset);
                remaining -= 1;
            }
            Err(RecvTimeoutError::Timeout) => {
                let pending = pending_ids(&entries, &loaded);
                log::warn!("asset loading timed out waiting for {pending:?}");
                return Err(TimelineError::AssetTimeout { pending });
            }
            Err(RecvTimeoutError::Disconnected) => {
                let pending = pending_ids(&entries, &loaded);
                return Err(TimelineError::AssetLoad {
                    id: pending.join(", "),
                    reason: "loader thread exited without a result".into(),
                });
            }
        }
    }

    let mut registry = AssetRegistry::new();
    for (entry, asset) in entries.iter().zip(loaded) {
        match asset {
            Some(LoadedAsset::Texture(surface)) => {
                registry.insert_texture(entry.id.clone(), surface);
            }
            Some(LoadedAsset::Font(typeface)) => registry.insert_font(typeface),
            None => {}
        }
    }

    log::info!(
        "loaded {} textures and {} fonts in {:.2?}",
        registry.texture_count(),
        registry.font_families().count(),
        started.elapsed()
    );
    Ok(registry)
}

fn pending_ids(
    entries: &[ManifestEntry],
    loaded: &[Option<LoadedAsset>],
) -> Vec<String> {
    entries
        .iter()
        .zip(loaded)
        .filter(|(_, asset)| asset.is_none())
        .map(|(entry, _)| entry.id.clone())
        .collect()
}
