//! Application shell: winit event loop, window lifecycle, and the
//! single-threaded frame loop (input poll, scene update, render, frame-cap
//! sleep, delta measurement).

pub mod input;
pub mod window;

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use self::input::Input;
use self::window::WinitSurface;
use crate::errors::Result;
use crate::renderer::pipeline::ShaderLibrary;
use crate::renderer::settings::RendererSettings;
use crate::renderer::{GpuContext, Renderer};
use crate::scene::graph::SceneGraph;
use crate::scene::node::SceneObject;
use crate::utils::fps_counter::FpsCounter;
use crate::utils::time::FrameTimer;

/// Called once when the renderer exists, to populate the scene.
pub type SetupFn = Box<dyn FnOnce(&mut SceneGraph, &Renderer)>;
/// Called every frame before the scene graph update.
pub type UpdateFn = Box<dyn FnMut(&mut SceneGraph, &Input, f32)>;

/// Owns the window, the renderer and the scene graph, and runs the frame
/// loop until the window closes.
pub struct App {
    title: String,
    settings: RendererSettings,

    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    pub graph: SceneGraph,

    input: Input,
    timer: FrameTimer,
    fps: FpsCounter,

    setup_fn: Option<SetupFn>,
    update_fn: Option<UpdateFn>,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Trellis Engine".into(),
            settings: RendererSettings::default(),
            window: None,
            renderer: None,
            graph: SceneGraph::new(SceneObject::group("Root")),
            input: Input::new(),
            timer: FrameTimer::new(),
            fps: FpsCounter::new(),
            setup_fn: None,
            update_fn: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: RendererSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Scene population callback, run once after the GPU context exists.
    pub fn set_setup_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut SceneGraph, &Renderer) + 'static,
    {
        self.setup_fn = Some(Box::new(f));
        self
    }

    /// Per-frame application logic, run before the graph update.
    pub fn set_update_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&mut SceneGraph, &Input, f32) + 'static,
    {
        self.update_fn = Some(Box::new(f));
        self
    }

    /// The renderer, once the window exists (after `resumed`).
    #[must_use]
    pub fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut Renderer> {
        self.renderer.as_mut()
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self).map_err(Into::into)
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer)) = (&self.window, &mut self.renderer) else {
            return;
        };

        let dt = self.timer.dt_seconds();

        if let Some(update_fn) = &mut self.update_fn {
            update_fn(&mut self.graph, &self.input, dt);
        }

        let mut surface = WinitSurface::new(window);
        self.graph.update(dt, &mut self.input, &mut surface);

        if let Err(err) = renderer.render(&mut self.graph) {
            // Frame preconditions are fatal; terminate instead of rendering
            // partial frames.
            log::error!("fatal render error: {err}");
            event_loop.exit();
            return;
        }

        self.input.end_frame();

        self.timer.sleep_until_frame_target(renderer.settings.target_fps);
        self.timer.tick();

        if let Some(fps) = self.fps.update() {
            log::debug!("fps: {fps:.1}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .expect("Failed to create window"),
        );
        self.window = Some(window.clone());

        let size = window.inner_size();
        self.input.handle_resize(size.width, size.height);

        log::info!("initializing renderer backend");
        let ctx = match pollster::block_on(GpuContext::new(window, &self.settings)) {
            Ok(ctx) => ctx,
            Err(err) => {
                log::error!("fatal renderer error: {err}");
                event_loop.exit();
                return;
            }
        };
        let renderer = Renderer::new(ctx, self.settings.clone(), &ShaderLibrary::builtin());

        if let Some(setup_fn) = self.setup_fn.take() {
            setup_fn(&mut self.graph, &renderer);
        }

        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.input.handle_resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input
                    .handle_key(event.physical_key, event.state, event.repeat);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.handle_cursor_move(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.handle_mouse_button(state, button);
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
