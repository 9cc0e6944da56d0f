//! Standalone window backed by winit.
//!
//! ```no_run
//! # use lookup::Viewer;
//! Viewer::builder()
//!     .with_title("Look Up")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    camera::Camera,
    error::LookupError,
    experience::Experience,
    gpu::RenderContext,
    input::{InputEvent, InputProcessor, MouseButton},
    options::Options,
    renderer::SceneRenderer,
    stage::Stage,
    util::frame_timing::FrameTiming,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    target_fps: u32,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Look Up", default
    /// options, unlimited frame rate).
    fn new() -> Self {
        Self {
            options: None,
            title: "Look Up".into(),
            target_fps: 0,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Cap the frame rate (0 = unlimited).
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            target_fps: self.target_fps,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that plays the experience.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    target_fps: u32,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Curve`] if the configured path is invalid and
    /// [`LookupError::Viewer`] if the event loop cannot be created or fails.
    pub fn run(self) -> Result<(), LookupError> {
        let input = InputProcessor::with_key_bindings(
            self.options.keybindings.clone(),
        );
        let experience = Experience::new(self.options)?;

        let event_loop = EventLoop::new()
            .map_err(|e| LookupError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gpu: None,
            experience,
            input,
            frame_timing: FrameTiming::new(self.target_fps),
            title: self.title,
            shown_title: String::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| LookupError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU state created once the window exists.
struct Gpu {
    context: RenderContext,
    renderer: SceneRenderer,
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    experience: Experience,
    input: InputProcessor,
    frame_timing: FrameTiming,
    title: String,
    /// Last title pushed to the window, to avoid redundant updates.
    shown_title: String,
}

impl ViewerApp {
    /// Route a raw input event through the processor into the experience.
    fn dispatch(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.experience.execute(command);
        }
    }

    fn redraw(&mut self) {
        if !self.frame_timing.should_render() {
            return;
        }
        let dt = self.frame_timing.begin_frame();
        let snapshot = self.experience.update(dt);

        if let Some(gpu) = &mut self.gpu {
            let state = snapshot.camera_or(self.experience.resting_camera());
            let camera = Camera::from_state(
                state,
                &self.experience.options().camera,
                gpu.context.aspect(),
            );
            gpu.renderer.render(&mut gpu.context, &snapshot, &camera);
        }

        let title = match snapshot.stage {
            Stage::Intro => format!("{} (click or press Enter)", self.title),
            Stage::Loading => {
                format!("{} (loading {}%)", self.title, snapshot.loading_percent)
            }
            Stage::Scene => format!(
                "{} ({:.0} fps)",
                self.title,
                self.frame_timing.fps()
            ),
        };
        if title != self.shown_title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.shown_title = title;
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let context = match pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            (inner.width, inner.height),
        )) {
            Ok(context) => context,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };
        let renderer = SceneRenderer::new(&context, self.experience.bodies());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(Gpu { context, renderer });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.experience.unmount();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.dispatch(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.dispatch(InputEvent::from_scroll(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Some(command) = self.input.handle_key_press(&key_str) {
                    self.experience.execute(command);
                }
            }

            _ => (),
        }
    }
}
