//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the depthline crate.
#[derive(Debug)]
pub enum TimelineError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// An asset could not be read or decoded.
    AssetLoad {
        /// Manifest identifier of the failing asset.
        id: String,
        /// Human-readable failure description.
        reason: String,
    },
    /// Asset loading did not finish before the configured deadline.
    AssetTimeout {
        /// Identifiers still outstanding when the deadline passed.
        pending: Vec<String>,
    },
    /// A typeface file could not be parsed.
    FontParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for TimelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::AssetLoad { id, reason } => {
                write!(f, "failed to load asset {id}: {reason}")
            }
            Self::AssetTimeout { pending } => {
                write!(
                    f,
                    "asset loading timed out with {} pending: {}",
                    pending.len(),
                    pending.join(", ")
                )
            }
            Self::FontParse(msg) => write!(f, "font parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for TimelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for TimelineError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for TimelineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
