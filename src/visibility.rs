use eframe::egui;

/// The subset of [`egui::Context`] the overlay needs, so the window logic can
/// be driven by a recording mock in tests.
pub trait ViewportCtx {
    fn send_viewport_cmd_to(&self, id: egui::ViewportId, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd_to(&self, id: egui::ViewportId, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd_to(self, id, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// Switch a viewport between click-through and normal input handling.
pub fn apply_click_through(ctx: &impl ViewportCtx, id: egui::ViewportId, enabled: bool) {
    tracing::debug!(enabled, "applying click-through");
    ctx.send_viewport_cmd_to(id, egui::ViewportCommand::MousePassthrough(enabled));
    ctx.request_repaint();
}

/// Move a viewport to the given outer position in screen points.
pub fn apply_position(ctx: &impl ViewportCtx, id: egui::ViewportId, pos: (i32, i32)) {
    ctx.send_viewport_cmd_to(
        id,
        egui::ViewportCommand::OuterPosition(egui::pos2(pos.0 as f32, pos.1 as f32)),
    );
    ctx.request_repaint();
}
