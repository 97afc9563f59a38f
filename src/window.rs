//! Interactive window for a [`Sandbox`].
//!
//! Frames are drawn on the CPU into a [`Framebuffer`] the size of the window
//! and handed to [`GpuState`] for presentation. Input is gathered from winit
//! events between redraws and consumed once per frame.
//!
//! | Key | Action |
//! |-----|--------|
//! | `1`-`9` | Select effect |
//! | `Space` | Pause |
//! | `C` | Clear |
//! | `S` | Save a PNG into the capture directory |
//! | `Esc` | Quit |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::canvas::Framebuffer;
use crate::error::RunError;
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode};
use crate::sandbox::Sandbox;
use crate::time::FrameClock;

impl Sandbox {
    /// Open a window and run until it is closed.
    ///
    /// Blocks the calling thread. Window and GPU setup failures are returned;
    /// failed screenshots are logged and the sandbox keeps running.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    sandbox: Sandbox,
    input: Input,
    clock: FrameClock,
    framebuffer: Framebuffer,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    title: String,
    error: Option<RunError>,
}

impl App {
    fn new(sandbox: Sandbox) -> Self {
        let (width, height) = (sandbox.config().width, sandbox.config().height);
        let title = sandbox.config().title.clone();
        Self {
            sandbox,
            input: Input::new(),
            clock: FrameClock::new(),
            framebuffer: Framebuffer::new(width, height),
            window: None,
            gpu_state: None,
            title,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        tracing::error!(%error, "sandbox stopped");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.tick();

        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }

        self.sandbox.frame(&self.input, &mut self.framebuffer);

        if self.input.key_pressed(KeyCode::S) {
            self.capture();
        }
        self.input.end_frame();

        if let Some(gpu_state) = &mut self.gpu_state {
            match gpu_state.present(&self.framebuffer) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = gpu_state.size();
                    gpu_state.resize(width, height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => tracing::warn!(error = %e, "render error"),
            }
        }

        self.update_title();
    }

    fn capture(&self) {
        let path = self.sandbox.capture_path();
        match self.framebuffer.save_png(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "saved frame"),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to save frame"),
        }
    }

    fn update_title(&mut self) {
        let title = if self.sandbox.has_drawn() {
            format!("{} | {:.0} fps", self.sandbox.status(), self.clock.fps())
        } else {
            self.sandbox.status()
        };
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.sandbox.config();
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        self.framebuffer.resize(size.width.max(1), size.height.max(1));

        match pollster::block_on(GpuState::new(window.clone())) {
            Ok(gpu_state) => self.gpu_state = Some(gpu_state),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        tracing::info!(width = size.width, height = size.height, "window opened");
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.framebuffer
                        .resize(physical_size.width, physical_size.height);
                    if let Some(gpu_state) = &mut self.gpu_state {
                        gpu_state.resize(physical_size.width, physical_size.height);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
