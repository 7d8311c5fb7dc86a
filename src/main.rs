use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod animation;
mod app;
mod error;
mod preview;
mod renderer;
mod scene;
mod settings;
mod ui;

pub const CONFY_APP_NAME: &str = "animvis-rs";

struct AppHandler {
    app: Option<app::App>,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("AnimVis-RS - Playable Preview")
                .with_inner_size(winit::dpi::LogicalSize::new(1000.0, 700.0))
                .with_min_inner_size(winit::dpi::LogicalSize::new(400.0, 400.0));

            let window = event_loop.create_window(window_attrs).unwrap();
            let app = pollster::block_on(app::App::new(Arc::new(window))).unwrap();

            self.app = Some(app);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if let Err(e) = app.frame() {
                log::error!("render error: {e:?}");
            }
            app.window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler { app: None };
    event_loop.run_app(&mut handler)?;

    Ok(())
}
