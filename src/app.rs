use std::sync::Arc;
use std::time::Instant;

use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use winit::window::Window;

use crate::preview::PreviewState;
use crate::renderer::{Renderer, lines};
use crate::scene::{Scene, Selection, demo};
use crate::settings::PreviewSettings;
use crate::ui::Ui;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

/// All window state in one place. The event and frame entry points take it
/// by exclusive reference; there is no other shared state.
pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    egui_state: State,
    ui: Ui,
    scene: Scene,
    selection: Selection,
    preview: PreviewState,
    settings: PreviewSettings,
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = renderer.egui_context();
        egui_ctx.options_mut(|options| {
            options.max_passes = std::num::NonZero::new(2).unwrap();
        });
        let egui_state = State::new(
            egui_ctx.clone(),
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let (scene, selection) = demo::build();

        // Restore the last previewed target by name, if it still exists.
        let settings = PreviewSettings::load();
        let target = settings
            .last_target
            .as_deref()
            .and_then(|name| scene.index_of(name));
        let preview = PreviewState::new(target);

        Ok(Self {
            window,
            renderer,
            egui_state,
            ui: Ui::new(),
            scene,
            selection,
            preview,
            settings,
            last_frame: Instant::now(),
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if !egui_response.consumed
                    && event.logical_key
                        == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            _ => {}
        }

        EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        }
    }

    /// One frame: advance playback by the wall-clock delta, reconcile the
    /// preview lifecycle, run the UI, then draw.
    pub fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        // The selection drives the clip; a change rebuilds the playable.
        self.preview.set_clip(self.selection.active_clip());
        self.preview.sync(&self.scene);
        self.preview.tick(dt);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut viewport = None;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            let output = self.ui.show(
                ctx,
                &self.scene,
                &mut self.selection,
                &mut self.preview,
                &mut self.settings,
            );
            viewport = output.viewport;
        });

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [
                self.window.inner_size().width,
                self.window.inner_size().height,
            ],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let skeleton = self
            .preview
            .instance()
            .map(lines::skeleton_lines)
            .unwrap_or_default();
        self.renderer.update_skeleton(&skeleton);

        self.renderer.render(
            &self.preview.camera,
            viewport,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }
}
