#![allow(dead_code)]

use eframe::egui;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockCtx {
    pub commands: Arc<Mutex<Vec<(egui::ViewportId, egui::ViewportCommand)>>>,
    pub repaints: Arc<Mutex<usize>>,
}

impl MockCtx {
    pub fn commands_for(&self, id: egui::ViewportId) -> Vec<egui::ViewportCommand> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter(|(target, _)| *target == id)
            .map(|(_, cmd)| cmd.clone())
            .collect()
    }
}

// Implement the trait from the main crate so tests can reuse the overlay logic.
impl oracle_counter::visibility::ViewportCtx for MockCtx {
    fn send_viewport_cmd_to(&self, id: egui::ViewportId, cmd: egui::ViewportCommand) {
        self.commands.lock().unwrap().push((id, cmd));
    }

    fn request_repaint(&self) {
        *self.repaints.lock().unwrap() += 1;
    }
}
