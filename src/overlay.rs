//! Always-on-top overlay mirroring the digit buffer.
//!
//! The visual mode is a pure function of whether there are digits to show and
//! whether the overlay is locked. Locking also makes the window click-through.

use crate::digits::MAX_DIGITS;
use crate::preferences::Preferences;
use crate::theme;
use crate::visibility::{apply_click_through, apply_position, ViewportCtx};
use eframe::egui;

pub const OVERLAY_WIDTH: i32 = 480;
pub const OVERLAY_HEIGHT: i32 = 100;
pub const OVERLAY_TOP: i32 = 30;
pub const EDGE_MARGIN: i32 = 20;
/// Used when the windowing backend does not report the monitor size.
pub const FALLBACK_SCREEN_WIDTH: i32 = 1920;
pub const POSITION_HINT: &str = "Overlay Position\n(max 7 numbers)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    /// Digits are shown; `decorated` adds the border and tinted background.
    Digits { decorated: bool },
    /// Empty and unlocked: a hint label inside the decoration.
    PositioningHint,
    /// Empty and locked: nothing is drawn.
    Transparent,
}

impl OverlayMode {
    pub fn is_decorated(self) -> bool {
        matches!(
            self,
            OverlayMode::Digits { decorated: true } | OverlayMode::PositioningHint
        )
    }
}

pub fn overlay_mode(has_digits: bool, locked: bool) -> OverlayMode {
    match (has_digits, locked) {
        (true, locked) => OverlayMode::Digits { decorated: !locked },
        (false, true) => OverlayMode::Transparent,
        (false, false) => OverlayMode::PositioningHint,
    }
}

/// Keep at most the first seven whitespace-separated tokens.
pub fn clamp_display_text(text: &str) -> String {
    text.split_whitespace()
        .take(MAX_DIGITS)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionPreset {
    Left,
    Middle,
    Right,
}

impl PositionPreset {
    pub const ALL: [PositionPreset; 3] = [
        PositionPreset::Left,
        PositionPreset::Middle,
        PositionPreset::Right,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PositionPreset::Left => "Left",
            PositionPreset::Middle => "Middle",
            PositionPreset::Right => "Right",
        }
    }

    pub fn position(self, screen_width: i32) -> (i32, i32) {
        let x = match self {
            PositionPreset::Left => EDGE_MARGIN,
            PositionPreset::Middle => (screen_width - OVERLAY_WIDTH).div_euclid(2),
            PositionPreset::Right => screen_width - OVERLAY_WIDTH - EDGE_MARGIN,
        };
        (x, OVERLAY_TOP)
    }
}

/// Horizontally centred near the top of the screen.
pub fn default_position(screen_width: i32) -> (i32, i32) {
    PositionPreset::Middle.position(screen_width)
}

/// Width of the monitor hosting the current viewport, in points.
pub fn screen_width(ctx: &egui::Context) -> i32 {
    ctx.input(|i| i.viewport().monitor_size)
        .map(|size| size.x.round() as i32)
        .filter(|w| *w > 0)
        .unwrap_or(FALLBACK_SCREEN_WIDTH)
}

/// What happened in the overlay during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayResponse {
    /// New outer position after a drag increment.
    pub moved: Option<(i32, i32)>,
    pub close_requested: bool,
}

#[derive(Debug)]
pub struct OverlayWindow {
    id: egui::ViewportId,
    initial_pos: (i32, i32),
    last_pos: (i32, i32),
    click_through: bool,
    /// A programmatic move is in flight; the next reported position predates it.
    pending_move: bool,
}

impl OverlayWindow {
    /// Place the overlay at the persisted position, or the default one.
    pub fn open(prefs: &Preferences, screen_width: i32) -> Self {
        let pos = prefs
            .overlay_position()
            .unwrap_or_else(|| default_position(screen_width));
        tracing::debug!(x = pos.0, y = pos.1, locked = prefs.overlay_locked, "opening overlay");
        Self {
            id: egui::ViewportId::from_hash_of("oracle_counter_overlay"),
            initial_pos: pos,
            last_pos: pos,
            click_through: prefs.overlay_locked,
            pending_move: false,
        }
    }

    pub fn viewport_id(&self) -> egui::ViewportId {
        self.id
    }

    pub fn position(&self) -> (i32, i32) {
        self.last_pos
    }

    pub fn is_click_through(&self) -> bool {
        self.click_through
    }

    /// Apply the lock state. Safe to call repeatedly with the same value.
    pub fn set_click_through(&mut self, ctx: &impl ViewportCtx, locked: bool) {
        self.click_through = locked;
        apply_click_through(ctx, self.id, locked);
    }

    pub fn move_to(&mut self, ctx: &impl ViewportCtx, pos: (i32, i32)) {
        self.last_pos = pos;
        self.pending_move = true;
        apply_position(ctx, self.id, pos);
    }

    /// Record the position reported by the window system. Returns the new
    /// position when it differs from the last one seen.
    ///
    /// The first report after [`move_to`](Self::move_to) is skipped: it was
    /// read before the window system applied the move.
    pub fn track_moved(&mut self, outer: (i32, i32)) -> Option<(i32, i32)> {
        if std::mem::take(&mut self.pending_move) || outer == self.last_pos {
            return None;
        }
        self.last_pos = outer;
        Some(outer)
    }

    /// Render one frame of the overlay viewport.
    pub fn show(&mut self, ctx: &egui::Context, digits: &str, prefs: &Preferences) -> OverlayResponse {
        let builder = egui::ViewportBuilder::default()
            .with_title("Oracle Counter Overlay")
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_resizable(false)
            .with_inner_size([OVERLAY_WIDTH as f32, OVERLAY_HEIGHT as f32])
            .with_position(egui::pos2(self.initial_pos.0 as f32, self.initial_pos.1 as f32))
            .with_mouse_passthrough(self.click_through);

        let text = clamp_display_text(digits);
        let locked = prefs.overlay_locked;
        let digit_color = theme::digit_color(&prefs.overlay_color);

        let (close_requested, outer) = ctx.show_viewport_immediate(self.id, builder, |ctx, _class| {
            draw_overlay(ctx, &text, locked, digit_color);
            ctx.input(|i| {
                let outer = i
                    .viewport()
                    .outer_rect
                    .map(|r| (r.min.x.round() as i32, r.min.y.round() as i32));
                (i.viewport().close_requested(), outer)
            })
        });

        OverlayResponse {
            moved: outer.and_then(|pos| self.track_moved(pos)),
            close_requested,
        }
    }
}

fn draw_overlay(ctx: &egui::Context, text: &str, locked: bool, digit_color: egui::Color32) {
    let mode = overlay_mode(!text.is_empty(), locked);
    let (label, color, size) = match mode {
        OverlayMode::Digits { .. } => (text, digit_color, theme::DIGIT_FONT_SIZE),
        OverlayMode::PositioningHint => (POSITION_HINT, theme::ACCENT, theme::HINT_FONT_SIZE),
        OverlayMode::Transparent => ("", egui::Color32::TRANSPARENT, theme::HINT_FONT_SIZE),
    };
    let (fill, stroke) = if mode.is_decorated() {
        (theme::ACCENT_TINT, egui::Stroke::new(2.0, theme::ACCENT))
    } else {
        (egui::Color32::TRANSPARENT, egui::Stroke::NONE)
    };

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(egui::Color32::TRANSPARENT))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(fill)
                .stroke(stroke)
                .rounding(8.0)
                .inner_margin(egui::Margin::symmetric(16.0, 12.0))
                .show(ui, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(label)
                                .monospace()
                                .strong()
                                .size(size)
                                .color(color),
                        );
                    });
                });

            if !locked {
                let drag = ui.interact(
                    ui.max_rect(),
                    egui::Id::new("oracle_counter_overlay_drag"),
                    egui::Sense::drag(),
                );
                if drag.drag_started() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::StartDrag);
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoration_follows_mode() {
        assert!(OverlayMode::PositioningHint.is_decorated());
        assert!(OverlayMode::Digits { decorated: true }.is_decorated());
        assert!(!OverlayMode::Digits { decorated: false }.is_decorated());
        assert!(!OverlayMode::Transparent.is_decorated());
    }

    #[test]
    fn track_moved_reports_only_changes() {
        let mut overlay = OverlayWindow::open(&Preferences::default(), 1920);
        assert_eq!(overlay.track_moved((720, 30)), None);
        assert_eq!(overlay.track_moved((700, 40)), Some((700, 40)));
        assert_eq!(overlay.track_moved((700, 40)), None);
    }
}
