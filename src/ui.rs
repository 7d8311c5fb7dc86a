use crate::preview::PreviewState;
use crate::scene::{Scene, Selection};
use crate::settings::PreviewSettings;

/// Points per wheel notch as egui reports them; the camera wants notch-sized
/// steps.
const WHEEL_NOTCH_POINTS: f32 = 50.0;
const WHEEL_STEPS_PER_NOTCH: f32 = 3.0;

pub struct UiOutput {
    /// Screen rect (in points) the renderer should draw the 3-D scene into.
    pub viewport: Option<egui::Rect>,
}

pub struct Ui {
    error_dialog: Option<String>,
}

impl Ui {
    pub fn new() -> Self {
        Self { error_dialog: None }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        scene: &Scene,
        selection: &mut Selection,
        preview: &mut PreviewState,
        settings: &mut PreviewSettings,
    ) -> UiOutput {
        self.show_toolbar(ctx, scene, selection, preview, settings);

        if preview.missing_animator() {
            egui::TopBottomPanel::top("warning").show(ctx, |ui| {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    "\u{26a0} The preview target needs an Animator component on itself \
                     or a child object.",
                );
            });
        }

        if preview.transport_ready() {
            self.show_transport(ctx, preview);
        }

        self.show_states_panel(ctx, selection);
        self.show_error_dialog(ctx);

        let viewport = self.show_viewport(ctx, preview);
        UiOutput { viewport }
    }

    fn show_toolbar(
        &mut self,
        ctx: &egui::Context,
        scene: &Scene,
        selection: &Selection,
        preview: &mut PreviewState,
        settings: &mut PreviewSettings,
    ) {
        // Some(None) clears the target, None leaves it alone.
        let mut requested: Option<Option<usize>> = None;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Preview Target");

                let current = preview
                    .target()
                    .and_then(|i| scene.object(i))
                    .map_or("(none)", |o| o.name.as_str())
                    .to_owned();
                egui::ComboBox::from_id_salt("preview-target")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (i, object) in scene.objects().iter().enumerate() {
                            let selected = preview.target() == Some(i);
                            if ui.selectable_label(selected, &object.name).clicked() {
                                requested = Some(Some(i));
                            }
                        }
                    });

                if ui.button("None").clicked() {
                    requested = Some(None);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let clip_name = selection
                        .active_clip()
                        .map_or_else(|| "(no clip)".to_owned(), |c| c.name.clone());
                    ui.add_enabled(false, egui::Button::new(clip_name));
                    ui.label("Clip:");
                });
            });
        });

        if let Some(new_target) = requested {
            match preview.set_target(scene, new_target) {
                Ok(()) => {
                    settings.last_target = preview
                        .target()
                        .and_then(|i| scene.object(i))
                        .map(|o| o.name.clone());
                    settings.save();
                }
                Err(e) => self.error_dialog = Some(e.to_string()),
            }
        }
    }

    fn show_transport(&mut self, ctx: &egui::Context, preview: &mut PreviewState) {
        egui::TopBottomPanel::top("transport").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let icon = if preview.is_paused() { "\u{25b6}" } else { "\u{275a}\u{275a}" };
                if ui.button(icon).clicked() {
                    preview.toggle_play();
                }

                let duration = preview.clip_duration();
                let mut time = preview.current_time();
                let slider = ui.add(
                    egui::Slider::new(&mut time, 0.0..=duration)
                        .show_value(true)
                        .suffix(" s"),
                );
                if slider.changed() {
                    preview.scrub(time);
                }

                ui.toggle_value(&mut preview.looping, "Loop");
            });
        });
    }

    fn show_states_panel(&mut self, ctx: &egui::Context, selection: &mut Selection) {
        egui::SidePanel::left("states")
            .default_width(150.0)
            .show(ctx, |ui| {
                ui.heading("Animator States");
                ui.separator();
                let mut clicked = None;
                for (i, state) in selection.states().iter().enumerate() {
                    let active = selection.active() == Some(i);
                    if ui.selectable_label(active, &state.name).clicked() {
                        clicked = Some(i);
                    }
                }
                if let Some(i) = clicked {
                    selection.set_active(Some(i));
                }
            });
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_dialog.clone() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("preview-error")).show(ctx, |ui| {
            ui.heading("Error");
            ui.label(message);
            ui.separator();
            if ui.button("OK").clicked() {
                self.error_dialog = None;
            }
        });
        if modal.should_close() {
            self.error_dialog = None;
        }
    }

    /// The remaining central region is the 3-D viewport: drag orbits,
    /// scroll zooms, both only while the pointer is inside the rect.
    fn show_viewport(&mut self, ctx: &egui::Context, preview: &mut PreviewState) -> Option<egui::Rect> {
        let mut viewport = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.available_rect_before_wrap();
                if rect.width() < 1.0 || rect.height() < 1.0 {
                    return;
                }
                let response = ui.allocate_rect(rect, egui::Sense::drag());

                if response.dragged_by(egui::PointerButton::Primary) {
                    let delta = response.drag_delta();
                    preview.camera.orbit(delta.x, delta.y);
                }
                if response.hovered() {
                    let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                    if scroll != 0.0 {
                        let wheel = -scroll / WHEEL_NOTCH_POINTS * WHEEL_STEPS_PER_NOTCH;
                        preview.camera.zoom(wheel);
                    }
                }
                viewport = Some(rect);
            });
        viewport
    }
}
