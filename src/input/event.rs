/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`TimelineCommand`](crate::TimelineCommand) values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
/// ) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window resized.
    Resized {
        /// Width in physical pixels.
        width: u32,
        /// Height in physical pixels.
        height: u32,
        /// Display scale factor (physical pixels per logical pixel).
        scale_factor: f64,
    },
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel turned.
    Wheel(WheelInput),
}

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Touch input steers the view like the cursor. Only moves count; a
    /// touch start, end or cancel produces no event.
    #[must_use]
    pub fn from_touch(
        phase: winit::event::TouchPhase,
        location: winit::dpi::PhysicalPosition<f64>,
    ) -> Option<Self> {
        (phase == winit::event::TouchPhase::Moved).then_some(Self::CursorMoved {
            x: location.x as f32,
            y: location.y as f32,
        })
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Wheel notches per unit of `wheel_delta`.
const WHEEL_DELTA_PER_NOTCH: f32 = 120.0;

/// Raw wheel reading in the two shapes platforms report.
///
/// `detail` counts lines (positive = toward the user) and `wheel_delta`
/// is a signed amount in 1/120 notch units (positive = away from the
/// user). A device fills in one or both.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    /// Line count, zero when unreported.
    pub detail: f32,
    /// Notch-scaled delta, zero when unreported.
    pub wheel_delta: f32,
}

impl WheelInput {
    /// Reading from a device that reports only `wheel_delta`.
    #[must_use]
    pub fn from_wheel_delta(wheel_delta: f32) -> Self {
        Self {
            detail: 0.0,
            wheel_delta,
        }
    }

    /// Collapse either shape to notches, positive when scrolling away from
    /// the user.
    #[must_use]
    pub fn normalized(&self) -> f32 {
        if self.detail != 0.0 {
            if self.wheel_delta != 0.0 {
                self.wheel_delta / self.detail / 40.0 * self.detail.signum()
            } else {
                -self.detail / 3.0
            }
        } else {
            self.wheel_delta / WHEEL_DELTA_PER_NOTCH
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseScrollDelta> for WheelInput {
    fn from(delta: winit::event::MouseScrollDelta) -> Self {
        match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => {
                Self::from_wheel_delta(y * WHEEL_DELTA_PER_NOTCH)
            }
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                Self::from_wheel_delta(pos.y as f32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn wheel_delta_only_counts_notches() {
        assert_eq!(WheelInput::from_wheel_delta(120.0).normalized(), 1.0);
        assert_eq!(WheelInput::from_wheel_delta(-240.0).normalized(), -2.0);
    }

    #[test]
    fn detail_only_is_inverted_lines() {
        let wheel = WheelInput {
            detail: 3.0,
            wheel_delta: 0.0,
        };
        assert_eq!(wheel.normalized(), -1.0);
    }

    #[test]
    fn both_fields_divide_by_detail() {
        let wheel = WheelInput {
            detail: -2.0,
            wheel_delta: 160.0,
        };
        // 160 / -2 / 40 * -1
        assert_relative_eq!(wheel.normalized(), 2.0);
        let wheel = WheelInput {
            detail: 4.0,
            wheel_delta: 160.0,
        };
        assert_relative_eq!(wheel.normalized(), 1.0);
    }

    #[test]
    fn empty_reading_is_zero() {
        assert_eq!(WheelInput::default().normalized(), 0.0);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn winit_deltas_map_to_wheel_delta() {
        use winit::dpi::PhysicalPosition;
        use winit::event::MouseScrollDelta;

        let line = WheelInput::from(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert_eq!(line.normalized(), 1.0);
        let pixels = WheelInput::from(MouseScrollDelta::PixelDelta(
            PhysicalPosition::new(0.0, -60.0),
        ));
        assert_eq!(pixels.normalized(), -0.5);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn touch_moves_map_to_cursor_moves() {
        use winit::dpi::PhysicalPosition;
        use winit::event::TouchPhase;

        let at = PhysicalPosition::new(320.0, 180.5);
        assert_eq!(
            InputEvent::from_touch(TouchPhase::Moved, at),
            Some(InputEvent::CursorMoved { x: 320.0, y: 180.5 })
        );
        assert_eq!(InputEvent::from_touch(TouchPhase::Started, at), None);
        assert_eq!(InputEvent::from_touch(TouchPhase::Ended, at), None);
    }
}
