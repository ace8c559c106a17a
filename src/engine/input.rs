//! Input and command dispatch for TimelineEngine.

use web_time::Instant;

use super::TimelineEngine;
use crate::input::InputEvent;
use crate::scene::PickTarget;
use crate::timeline::TimelineCommand;

impl TimelineEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Resizes also reconfigure the surface. Everything else is turned into
    /// at most one [`TimelineCommand`] and executed immediately.
    ///
    /// Returns what a click hit, or [`PickTarget::None`].
    pub fn handle_input(&mut self, event: InputEvent) -> PickTarget {
        if let InputEvent::Resized { width, height, .. } = event {
            self.context.resize(width, height);
        }
        self.input
            .handle_event(event)
            .map_or(PickTarget::None, |command| self.execute(command))
    }

    /// Execute a command against the timeline at the current time.
    pub fn execute(&mut self, command: TimelineCommand) -> PickTarget {
        log::trace!("execute {command:?}");
        self.timeline.execute(command, Instant::now())
    }
}
