use crate::digits::DigitBuffer;
use crate::emitter::KeystrokeEmitter;
use crate::feedback::ButtonFeedback;
use crate::keyboard_hook::{KeyAction, KeyboardHook};
use crate::overlay::{self, OverlayWindow, PositionPreset};
use crate::preferences::{Preferences, PreferencesHandle};
use crate::theme;
use crate::visibility::ViewportCtx;
use eframe::egui;
use std::time::Instant;

pub const HELP_TEXT: &str = "Enter → Send | Backspace → Clear | Use Numpad for Input";

pub struct CounterApp {
    digits: DigitBuffer,
    prefs: PreferencesHandle,
    overlay: Option<OverlayWindow>,
    hook: Option<KeyboardHook>,
    emitter: Box<dyn KeystrokeEmitter>,
    save_feedback: ButtonFeedback,
}

impl CounterApp {
    pub fn new(
        prefs: PreferencesHandle,
        hook: Option<KeyboardHook>,
        emitter: Box<dyn KeystrokeEmitter>,
    ) -> Self {
        Self {
            digits: DigitBuffer::new(),
            prefs,
            overlay: None,
            hook,
            emitter,
            save_feedback: ButtonFeedback::default(),
        }
    }

    pub fn digits(&self) -> &DigitBuffer {
        &self.digits
    }

    pub fn preferences(&self) -> &Preferences {
        self.prefs.get()
    }

    pub fn overlay(&self) -> Option<&OverlayWindow> {
        self.overlay.as_ref()
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        tracing::debug!(?action, "key event");
        if let Err(err) = self.digits.apply(action, self.emitter.as_mut()) {
            tracing::error!(error = ?err, "failed to type digits");
        }
    }

    /// Apply every key event the hook thread queued since the last frame.
    pub fn process_pending_keys(&mut self) {
        let events = match &self.hook {
            Some(hook) => hook.drain_events(),
            None => return,
        };
        for action in events {
            self.handle_key(action);
        }
    }

    pub fn clear_digits(&mut self) {
        self.digits.clear();
    }

    pub fn toggle_overlay(&mut self, screen_width: i32) {
        if self.overlay.is_some() {
            self.close_overlay();
        } else {
            self.overlay = Some(OverlayWindow::open(self.prefs.get(), screen_width));
        }
    }

    pub fn close_overlay(&mut self) {
        if self.overlay.take().is_some() {
            tracing::debug!("overlay closed");
        }
    }

    /// Flip the lock flag, persist it and re-apply click-through to an open
    /// overlay.
    pub fn toggle_lock(&mut self, ctx: &impl ViewportCtx) {
        let locked = self.prefs.toggle_locked();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.set_click_through(ctx, locked);
        }
    }

    /// Move the overlay to a preset spot. Ignored while the overlay is closed.
    pub fn apply_preset(&mut self, ctx: &impl ViewportCtx, preset: PositionPreset, screen_width: i32) {
        let Some(overlay) = self.overlay.as_mut() else {
            return;
        };
        let pos = preset.position(screen_width);
        overlay.move_to(ctx, pos);
        self.prefs.set_overlay_position(pos);
    }

    pub fn record_overlay_move(&mut self, pos: (i32, i32)) {
        self.prefs.set_overlay_position(pos);
    }

    pub fn set_color(&mut self, hex: String) {
        self.prefs.set_overlay_color(hex);
    }

    pub fn reset_color(&mut self, now: Instant) {
        self.prefs.reset_overlay_color();
        self.save_feedback.show("Reset to default!", now);
    }

    /// Explicit save from the Save button. Feedback is shown only on success.
    pub fn save_settings(&mut self, now: Instant) -> bool {
        let saved = self.prefs.save();
        if saved {
            self.save_feedback.show("Saved!", now);
        }
        saved
    }

    pub fn save_label(&mut self, now: Instant) -> String {
        self.save_feedback.label("Save", now).to_string()
    }

    fn settings_ui(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Settings").strong());
            ui.horizontal(|ui| {
                let current = theme::digit_color(&self.prefs.get().overlay_color);
                let mut rgb = [current.r(), current.g(), current.b()];
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    let picked = egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]);
                    self.set_color(theme::to_hex(picked));
                }
                ui.label("Pick Color");

                if ui.button("Reset Default").clicked() {
                    self.reset_color(now);
                }

                let label = self.save_label(now);
                if ui.button(label).clicked() {
                    self.save_settings(now);
                }

                let lock_text = if self.prefs.get().overlay_locked {
                    "🔒 Locked"
                } else {
                    "🔒 Unlocked"
                };
                if ui.button(lock_text).clicked() {
                    self.toggle_lock(ui.ctx());
                }
            });
        });
    }

    fn display_ui(&mut self, ui: &mut egui::Ui) {
        let color = theme::digit_color(&self.prefs.get().overlay_color);
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(25.0))
            .show(ui, |ui| {
                ui.set_min_height(60.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(self.digits.render_spaced())
                            .monospace()
                            .strong()
                            .size(theme::DIGIT_FONT_SIZE)
                            .color(color),
                    );
                });
            });

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(HELP_TEXT).weak());
        });
    }

    fn actions_ui(&mut self, ui: &mut egui::Ui, screen_width: i32) {
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                self.clear_digits();
            }
            let overlay_text = if self.overlay.is_some() {
                "Overlay ON"
            } else {
                "Overlay OFF"
            };
            if ui.button(overlay_text).clicked() {
                self.toggle_overlay(screen_width);
            }
        });

        ui.group(|ui| {
            ui.label(egui::RichText::new("Overlay Position").strong());
            ui.horizontal(|ui| {
                for preset in PositionPreset::ALL {
                    if ui.button(preset.label()).clicked() {
                        self.apply_preset(ui.ctx(), preset, screen_width);
                    }
                }
            });
        });
    }

    fn show_overlay(&mut self, ctx: &egui::Context) {
        let response = match self.overlay.as_mut() {
            Some(overlay) => overlay.show(ctx, &self.digits.render_spaced(), self.prefs.get()),
            None => return,
        };
        if let Some(pos) = response.moved {
            self.record_overlay_move(pos);
        }
        if response.close_requested {
            self.close_overlay();
        }
    }
}

impl eframe::App for CounterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_keys();

        let now = Instant::now();
        let screen_width = overlay::screen_width(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Oracle Counter");
            ui.add_space(8.0);
            self.settings_ui(ui, now);
            ui.add_space(12.0);
            self.display_ui(ui);
            ui.add_space(12.0);
            self.actions_ui(ui, screen_width);
        });

        if let Some(remaining) = self.save_feedback.remaining(now) {
            ctx.request_repaint_after(remaining);
        }

        self.show_overlay(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // The overlay viewport relies on a transparent clear.
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.close_overlay();
        self.prefs.save();
    }
}
