//! Converts raw platform events into timeline commands.
//!
//! The `InputProcessor` owns the transient input state (cursor position,
//! surface size, scale factor). It is the only thing that sits between raw
//! window events and the engine's
//! [`execute`](crate::engine::TimelineEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::timeline::TimelineCommand;

/// Converts raw window events into [`TimelineCommand`]s.
///
/// Pointer events arriving before the first resize (unknown surface size)
/// are dropped.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last cursor position in physical pixels.
    cursor: Vec2,
    /// Surface size in physical pixels.
    size: Vec2,
}

impl InputProcessor {
    /// Create a processor with an unknown surface size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<TimelineCommand> {
        match event {
            InputEvent::Resized {
                width,
                height,
                scale_factor,
            } => Some(self.handle_resize(width, height, scale_factor)),
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.has_size().then(|| TimelineCommand::Look {
                    offset: self.cursor / self.size - 0.5,
                })
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed: true,
            } => self.has_size().then(|| TimelineCommand::Pick {
                ndc: self.cursor_ndc(),
            }),
            InputEvent::MouseButton { .. } => None,
            InputEvent::Wheel(wheel) => Some(TimelineCommand::Scroll {
                notches: wheel.normalized(),
            }),
        }
    }

    fn handle_resize(
        &mut self,
        width: u32,
        height: u32,
        scale_factor: f64,
    ) -> TimelineCommand {
        self.size = Vec2::new(width as f32, height as f32);
        let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        TimelineCommand::Resize {
            width: (f64::from(width) / scale) as f32,
            height: (f64::from(height) / scale) as f32,
            pixel_ratio: if scale >= 2.0 { 2.0 } else { 1.0 },
        }
    }

    fn has_size(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Cursor in normalized device coordinates (y up).
    fn cursor_ndc(&self) -> Vec2 {
        Vec2::new(
            2.0 * self.cursor.x / self.size.x - 1.0,
            -2.0 * self.cursor.y / self.size.y + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::WheelInput;

    fn sized() -> InputProcessor {
        let mut processor = InputProcessor::new();
        let _ = processor.handle_event(InputEvent::Resized {
            width: 800,
            height: 600,
            scale_factor: 1.0,
        });
        processor
    }

    #[test]
    fn resize_reports_logical_size_and_pixel_ratio() {
        let mut processor = InputProcessor::new();
        let cmd = processor.handle_event(InputEvent::Resized {
            width: 2560,
            height: 1600,
            scale_factor: 2.0,
        });
        assert_eq!(
            cmd,
            Some(TimelineCommand::Resize {
                width: 1280.0,
                height: 800.0,
                pixel_ratio: 2.0,
            })
        );
        let cmd = processor.handle_event(InputEvent::Resized {
            width: 1500,
            height: 900,
            scale_factor: 1.5,
        });
        assert!(matches!(
            cmd,
            Some(TimelineCommand::Resize { pixel_ratio, .. }) if pixel_ratio == 1.0
        ));
    }

    #[test]
    fn cursor_move_yields_offset_from_centre() {
        let mut processor = sized();
        let cmd = processor.handle_event(InputEvent::CursorMoved { x: 600.0, y: 150.0 });
        assert_eq!(
            cmd,
            Some(TimelineCommand::Look {
                offset: Vec2::new(0.25, -0.25)
            })
        );
    }

    #[test]
    fn left_press_picks_at_cursor_ndc() {
        let mut processor = sized();
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let cmd = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert_eq!(
            cmd,
            Some(TimelineCommand::Pick {
                ndc: Vec2::new(-1.0, 1.0)
            })
        );
    }

    #[test]
    fn release_and_other_buttons_are_ignored() {
        let mut processor = sized();
        for (button, pressed) in [
            (MouseButton::Left, false),
            (MouseButton::Right, true),
            (MouseButton::Middle, true),
        ] {
            let cmd = processor.handle_event(InputEvent::MouseButton { button, pressed });
            assert!(cmd.is_none());
        }
    }

    #[test]
    fn pointer_events_before_resize_are_dropped() {
        let mut processor = InputProcessor::new();
        assert!(processor
            .handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 })
            .is_none());
        assert_eq!(processor.cursor(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn wheel_is_normalized() {
        let mut processor = InputProcessor::new();
        let cmd = processor.handle_event(InputEvent::Wheel(WheelInput::from_wheel_delta(-120.0)));
        assert_eq!(cmd, Some(TimelineCommand::Scroll { notches: -1.0 }));
    }
}
