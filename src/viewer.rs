//! Standalone timeline window backed by winit.
//!
//! ```no_run
//! # use depthline::Viewer;
//! let session = Viewer::builder()
//!     .with_title("1969")
//!     .build()
//!     .run()
//!     .unwrap();
//! assert!(session.is_warm());
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::TimelineEngine,
    error::TimelineError,
    input::{InputEvent, MouseButton, WheelInput},
    options::Options,
    session::SessionContext,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    session: SessionContext,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default options, a cold session and the
    /// title "Depthline".
    fn new() -> Self {
        Self {
            options: None,
            session: SessionContext::new(),
            title: "Depthline".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Start from a previous session, skipping asset loading.
    #[must_use]
    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            session: self.session,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the timeline.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    session: SessionContext,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed, then returns the session holding the loaded assets.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<SessionContext, TimelineError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TimelineError::Viewer(e.to_string()))?;
        // Redraws drive the timeline; each one requests the next.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            session: self.session,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TimelineError::Viewer(e.to_string()))?;
        app.shutdown();
        Ok(app.session)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<TimelineEngine>,
    session: SessionContext,
    options: Options,
    title: String,
}

impl ViewerApp {
    /// Dispose the engine (keeping its assets) and drop the window.
    fn shutdown(&mut self) {
        if let Some(engine) = self.engine.take() {
            self.session = engine.dispose();
        }
        self.window = None;
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };
        let _ = engine.update();
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface lost, reconfiguring");
                engine.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        window.request_redraw();
    }

    fn forward(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            let _ = engine.handle_input(event);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let engine = pollster::block_on(TimelineEngine::new(
            Arc::clone(&window),
            (inner.width.max(1), inner.height.max(1)),
            window.scale_factor(),
            self.options.clone(),
            &self.session,
        ));
        let engine = match engine {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("suspended, releasing the surface");
        self.shutdown();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.shutdown();
            event_loop.exit();
            return;
        }

        let Some(window) = self.window.as_ref().map(Arc::clone) else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                self.forward(InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                    scale_factor: window.scale_factor(),
                });
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let inner = window.inner_size();
                self.forward(InputEvent::Resized {
                    width: inner.width,
                    height: inner.height,
                    scale_factor,
                });
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.forward(InputEvent::Wheel(WheelInput::from(delta)));
            }

            WindowEvent::Touch(touch) => {
                if let Some(event) =
                    InputEvent::from_touch(touch.phase, touch.location)
                {
                    self.forward(event);
                }
            }

            _ => (),
        }
    }
}
