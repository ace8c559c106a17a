// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven 3D visual timeline rendered with wgpu.
//!
//! Depthline lays a grid of images and looping clips out along the Z axis.
//! The mouse wheel moves the grid toward a fixed camera, the pointer tilts
//! the camera for parallax, and clicking an item zooms it into focus. Past
//! a depth threshold the whole palette fades to a second colour scheme,
//! once.
//!
//! # Key entry points
//!
//! - [`engine::TimelineEngine`] - loads assets, owns the GPU pipeline and
//!   drives the frame loop
//! - [`timeline::Timeline`] - the GPU-free state machine: commands in,
//!   eased scene state out
//! - [`scene::Scene`] - grid items, labels, palette and focus
//! - [`options::Options`] - TOML configuration (camera, scene, colors,
//!   interaction, assets)
//! - `Viewer` - a ready-made winit window (`viewer` feature)
//!
//! # Architecture
//!
//! Start-up loads every manifest entry on its own thread and joins them
//! into an immutable [`assets::AssetRegistry`]. From then on everything runs
//! on the event-loop thread: window events become [`TimelineCommand`]s that
//! move *targets*, and each redraw eases current values toward them before
//! drawing labels and items in a single pass. Disposing an engine returns a
//! [`session::SessionContext`] holding the registry, so a new engine can
//! start without reloading.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod text;
pub mod timeline;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::TimelineEngine;
pub use error::TimelineError;
pub use timeline::TimelineCommand;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
