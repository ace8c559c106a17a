//! Per-frame timeline state: commands in, eased scene state out.
//!
//! Input only ever changes *targets* (scroll target, look direction, focus
//! tweens). [`Timeline::tick`] runs once per redraw and moves the current
//! values toward those targets:
//!
//! 1. a pending look request tweens the camera tilt,
//! 2. smooth scrolling steps the grid a fixed fraction toward the scroll
//!    target,
//! 3. crossing the colour threshold fires the palette fade, once,
//! 4. every tween advances to the frame time.
//!
//! Nothing here touches the GPU, so the whole state machine is unit
//! testable.

pub mod command;

pub use command::TimelineCommand;

use glam::Vec2;
use web_time::Instant;

use crate::animation::Animated;
use crate::camera::Camera;
use crate::options::Options;
use crate::scene::{PickTarget, Scene};

/// Window and scroll bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Logical size in pixels.
    pub size: Vec2,
    /// Rendering pixel ratio (2 on high-density displays, else 1).
    pub pixel_ratio: f32,
    /// Grid z that smooth scrolling is heading toward.
    pub scroll_target: f32,
    /// Whether smooth scrolling is still stepping.
    pub scrolling: bool,
    /// Whether the one-shot palette fade has fired.
    pub colour_changed: bool,
}

impl Viewport {
    fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            pixel_ratio,
            scroll_target: 0.0,
            scrolling: false,
            colour_changed: false,
        }
    }
}

/// Scene, camera and viewport driven by commands and frame ticks.
#[derive(Debug, Clone)]
pub struct Timeline {
    options: Options,
    scene: Scene,
    camera: Camera,
    tilt: Animated<Vec2>,
    viewport: Viewport,
    pointer_offset: Vec2,
    look_pending: bool,
    started: Instant,
}

impl Timeline {
    /// Start the timeline with a built scene and a logical viewport size.
    #[must_use]
    pub fn new(
        scene: Scene,
        options: Options,
        size: Vec2,
        pixel_ratio: f32,
        now: Instant,
    ) -> Self {
        let camera = Camera::new(&options.camera, size.x, size.y);
        let mut viewport = Viewport::new(size.x, size.y, pixel_ratio);
        viewport.scroll_target = scene.grid_z.value();
        Self {
            options,
            scene,
            camera,
            tilt: Animated::new(Vec2::ZERO),
            viewport,
            pointer_offset: Vec2::ZERO,
            look_pending: false,
            started: now,
        }
    }

    /// The scene being animated.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera as of the last tick.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewport and scroll state.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Options the timeline was started with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply one command. Returns what a pick hit, for callers that want
    /// to react to it; other commands return [`PickTarget::None`].
    pub fn execute(&mut self, command: TimelineCommand, now: Instant) -> PickTarget {
        match command {
            TimelineCommand::Scroll { notches } => {
                self.viewport.scroll_target +=
                    -notches * self.options.interaction.scroll_speed;
                self.viewport.scrolling = true;
            }
            TimelineCommand::Look { offset } => {
                self.pointer_offset = offset;
                self.look_pending = true;
            }
            TimelineCommand::Pick { ndc } => return self.pick(ndc, now),
            TimelineCommand::Resize {
                width,
                height,
                pixel_ratio,
            } => {
                self.viewport.size = Vec2::new(width, height);
                self.viewport.pixel_ratio = pixel_ratio;
                self.camera.resize(width, height);
            }
        }
        PickTarget::None
    }

    fn pick(&mut self, ndc: Vec2, now: Instant) -> PickTarget {
        let ray = self.camera.ray(ndc);
        let target = self.scene.pick(&ray);
        match target {
            PickTarget::Item(index) => {
                let interaction = &self.options.interaction;
                if let Some(grid_z) = self.scene.toggle_focus(
                    index,
                    self.options.scene.focus_depth,
                    interaction.focus,
                    now,
                ) {
                    // Later wheel input continues from the focus position.
                    self.viewport.scroll_target = grid_z;
                    self.viewport.scrolling = false;
                }
            }
            PickTarget::Label(index) => {
                log::debug!("pick hit label {index}, nothing to do");
            }
            PickTarget::None => log::debug!("pick at {ndc} hit nothing"),
        }
        target
    }

    /// Advance one frame. Returns `true` while anything is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        let camera_opts = &self.options.camera;
        let interaction = &self.options.interaction;

        if self.look_pending {
            let strength = camera_opts.parallax_strength;
            let tilt = Vec2::new(
                -self.pointer_offset.y * strength,
                -self.pointer_offset.x * strength,
            );
            self.tilt.animate_to(tilt, camera_opts.look, now);
            self.look_pending = false;
        }

        if self.viewport.scrolling {
            let z = self.scene.grid_z.value();
            let delta =
                (self.viewport.scroll_target - z) / interaction.scroll_smoothing;
            self.scene.grid_z.set(z + delta);
            self.viewport.scrolling = delta.abs() > interaction.scroll_settle;
        }

        if !self.viewport.colour_changed
            && self.scene.grid_z.value() > interaction.color_threshold
        {
            log::info!("grid passed {}, fading palette", interaction.color_threshold);
            self.scene.apply_palette(
                &self.options.colors.closing,
                interaction.palette,
                now,
            );
            self.viewport.colour_changed = true;
        }

        let tilting = self.tilt.update(now);
        self.camera.set_tilt(self.tilt.value());
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        let animating = self.scene.update(now, elapsed);
        tilting || animating || self.viewport.scrolling
    }
}
