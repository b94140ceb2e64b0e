use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::config::SpectrogramConfig;
use crate::error::{Error, Result};
use crate::render::Renderer;
use crate::surface;

const WINDOW_WIDTH: f64 = 700.0;
const WINDOW_HEIGHT: f64 = 500.0;

/* Window and the surface softbuffer presents to. Created on resume. */
struct WindowState {
    window: Rc<Window>,
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

/// Hosts a renderer in a window: a fixed rate timer draws new lines and
/// every redraw paints the whole image.
pub struct Application {
    renderer: Renderer,
    config: SpectrogramConfig,
    tick_interval: Duration,
    next_tick: Instant,
    state: Option<WindowState>,
    error: Option<Error>,
}

impl Application {
    pub fn new(renderer: Renderer, config: SpectrogramConfig) -> Application {
        let tick_interval = Duration::from_secs(1) / config.fps;
        Application {
            renderer,
            config,
            tick_interval,
            next_tick: Instant::now() + tick_interval,
            state: None,
            error: None,
        }
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
        event_loop.run_app(&mut self)?;
        log::info!(
            "Drew {} lines, dropped {} blocks",
            self.renderer.image().columns_written(),
            self.renderer.dropped_blocks()
        );
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<WindowState> {
        let attributes = Window::default_attributes()
            .with_title("Spectrogram")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;
        Ok(WindowState {
            window,
            _context: context,
            surface,
        })
    }

    fn paint(&mut self) -> Result<()> {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Ok(()),
        };
        let size = state.window.inner_size();
        let (width, height) = match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            (Some(width), Some(height)) => (width, height),
            _ => return Ok(()),
        };
        state.surface.resize(width, height)?;

        let mut buffer = state.surface.buffer_mut()?;
        surface::paint(
            self.renderer.image(),
            &mut buffer,
            width.get(),
            height.get(),
            self.config.background,
        );
        buffer.present()?;
        Ok(())
    }

    fn timer_callback(&mut self) -> Result<()> {
        if self.renderer.tick()? {
            if let Some(state) = &self.state {
                state.window.request_redraw();
            }
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Application {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Err(err) = self.timer_callback() {
                self.fail(event_loop, err);
            }
            // Skip ticks that were missed rather than bursting to catch up.
            let now = Instant::now();
            self.next_tick += self.tick_interval;
            if self.next_tick < now {
                self.next_tick = now + self.tick_interval;
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok(state) => {
                log::info!("Window opened");
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(_) => {
                if let Some(state) = &self.state {
                    state.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.paint() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}
