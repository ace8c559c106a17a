//! The timeline's complete interactive vocabulary.
//!
//! Every user-facing operation is represented as a `TimelineCommand`.
//! Consumers construct commands (usually through
//! [`InputProcessor`](crate::input::InputProcessor)) and pass them to
//! [`Timeline::execute`](super::Timeline::execute).

use glam::Vec2;

/// A request to change the timeline's target state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineCommand {
    /// Move the scroll target by a normalized wheel amount.
    Scroll {
        /// Wheel notches, positive when scrolling away from the user.
        notches: f32,
    },
    /// Tilt the camera toward the pointer.
    Look {
        /// Pointer offset from the viewport centre, each axis in
        /// `[-0.5, 0.5]` with y pointing down.
        offset: Vec2,
    },
    /// Hit-test under the pointer and toggle focus on an item.
    Pick {
        /// Pointer position in normalized device coordinates.
        ndc: Vec2,
    },
    /// The viewport changed size.
    Resize {
        /// Width in logical pixels.
        width: f32,
        /// Height in logical pixels.
        height: f32,
        /// Rendering pixel ratio (1 or 2).
        pixel_ratio: f32,
    },
}
