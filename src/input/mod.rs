//! Input handling: event types, wheel normalization, and the input
//! processor that converts raw window events into timeline commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into timeline commands.
pub mod processor;

pub use event::{InputEvent, MouseButton, WheelInput};
pub use processor::InputProcessor;
