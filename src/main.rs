use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ambient_scene::cli::Cli;
use ambient_scene::core::backdrop::Backdrop;
use ambient_scene::core::presenter::WgpuPresenter;
use ambient_scene::pointer::PointerState;

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// === Application ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    backdrop: Backdrop<WgpuPresenter>,
    last_frame_time: Instant,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli) -> Self {
        let theme = cli.theme;
        Self {
            cli,
            window: None,
            backdrop: Backdrop::new(theme),
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn aspect(&self) -> f32 {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                size.width.max(1) as f32 / size.height.max(1) as f32
            })
            .unwrap_or(1.0)
    }

    /// Mount (or remount) the backdrop against the current window. A failed
    /// presenter build leaves the backdrop unmounted; the window stays up
    /// and simply shows no background.
    fn mount_backdrop(&mut self) {
        if let Some(window) = &self.window {
            let window = window.clone();
            self.backdrop
                .mount(self.aspect(), |scene| WgpuPresenter::new(window, scene));
        }
    }

    fn toggle_theme(&mut self) {
        let next = self.backdrop.theme().toggled();
        info!("theme change: {:?}", next);
        if let Some(window) = &self.window {
            let window = window.clone();
            self.backdrop
                .set_theme(next, self.aspect(), |scene| {
                    WgpuPresenter::new(window, scene)
                });
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            debug!("fps: {:.1}", self.frame_count as f32 / self.fps_update_timer);
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Ambient Scene")
                    .with_transparent(true)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.cli.width,
                        self.cli.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    error!("failed to create window: {e}");
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.mount_backdrop();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.backdrop.teardown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyT),
                        repeat: false,
                        ..
                    },
                ..
            } => self.toggle_theme(),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.backdrop.pointer_moved(PointerState::from_window(
                        position.x as f32,
                        position.y as f32,
                        size.width as f32,
                        size.height as f32,
                    ));
                }
            }
            WindowEvent::Resized(size) => {
                self.backdrop.resized(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                self.update_fps(delta);
                self.backdrop.frame();
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

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    info!("ambient scene backdrop - T toggles theme, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
