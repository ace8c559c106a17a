//! The engine that ties assets, timeline state and rendering together.

mod input;

use std::sync::Arc;

use glam::Vec2;
use web_time::Instant;

use crate::assets::{load_all, AssetRegistry};
use crate::error::TimelineError;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::renderer::TimelineRenderer;
use crate::scene::build_scene;
use crate::session::SessionContext;
use crate::timeline::{Timeline, TimelineCommand};

/// The timeline engine: assets, scene state and the GPU pipeline.
///
/// # Construction
///
/// [`TimelineEngine::new`] creates the GPU context for a window, then
/// either reuses the registry carried by the [`SessionContext`] or loads
/// every asset in the manifest (blocking until the join completes).
///
/// # Frame loop
///
/// Each redraw, call [`update`](Self::update) to advance the timeline and
/// [`render`](Self::render) to draw and present. Window events go through
/// [`handle_input`](Self::handle_input).
///
/// # Teardown
///
/// [`dispose`](Self::dispose) drops all GPU resources and returns the
/// session so the next engine starts warm.
pub struct TimelineEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: TimelineRenderer,
    registry: Arc<AssetRegistry>,
    timeline: Timeline,
    input: InputProcessor,
    started: Instant,
}

impl TimelineEngine {
    /// Engine drawing into `window`, with its size in physical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError`] if GPU initialization or asset loading
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
        session: &SessionContext,
    ) -> Result<Self, TimelineError> {
        let context = RenderContext::new(window, size).await?;
        Self::new_from_context(context, scale_factor, options, session)
    }

    /// Engine from a pre-built [`RenderContext`].
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError`] if asset loading fails.
    pub fn new_from_context(
        context: RenderContext,
        scale_factor: f64,
        options: Options,
        session: &SessionContext,
    ) -> Result<Self, TimelineError> {
        let registry = if let Some(registry) = session.registry() {
            log::info!(
                "reusing {} loaded textures from the previous session",
                registry.texture_count()
            );
            Arc::clone(registry)
        } else {
            let assets = &options.assets;
            Arc::new(load_all(&assets.manifest, assets.load_timeout())?)
        };

        let scene = build_scene(&registry, &options);
        let now = Instant::now();

        let mut input = InputProcessor::new();
        let (width, height) = context.size();
        let resize = input.handle_event(InputEvent::Resized {
            width,
            height,
            scale_factor,
        });
        let (size, pixel_ratio) = match resize {
            Some(TimelineCommand::Resize {
                width,
                height,
                pixel_ratio,
            }) => (Vec2::new(width, height), pixel_ratio),
            _ => (Vec2::new(width as f32, height as f32), 1.0),
        };
        let timeline = Timeline::new(scene, options, size, pixel_ratio, now);

        let renderer = TimelineRenderer::new(
            &context,
            &registry,
            timeline.scene(),
            timeline.camera(),
        );

        Ok(Self {
            context,
            renderer,
            registry,
            timeline,
            input,
            started: now,
        })
    }

    /// Advance easing and one-shot transitions to the current time.
    /// Returns `true` while anything is still moving.
    pub fn update(&mut self) -> bool {
        self.timeline.tick(Instant::now())
    }

    /// Draw the current state and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired. Lost or outdated surfaces are fixed by
    /// [`reconfigure`](Self::reconfigure).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let elapsed = self.started.elapsed();
        self.renderer.render(
            &self.context,
            &self.registry,
            self.timeline.scene(),
            self.timeline.camera(),
            elapsed,
        )
    }

    /// Recreate the surface and depth buffer at the current size.
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// The timeline state machine.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Assets shared with any later session.
    #[must_use]
    pub fn registry(&self) -> &Arc<AssetRegistry> {
        &self.registry
    }

    /// Drop every GPU resource and hand the loaded assets back.
    #[must_use]
    pub fn dispose(self) -> SessionContext {
        log::info!("disposing engine");
        let Self { registry, .. } = self;
        SessionContext::with_registry(registry)
    }
}
