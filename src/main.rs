use oracle_counter::emitter::SendInputEmitter;
use oracle_counter::gui::CounterApp;
use oracle_counter::keyboard_hook::KeyboardHook;
use oracle_counter::logging;
use oracle_counter::preference_store::{resolve_preferences_path, PreferenceStore};
use oracle_counter::preferences::PreferencesHandle;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    logging::init_from_env();

    let store = PreferenceStore::new(resolve_preferences_path());
    tracing::info!(path = %store.path().display(), "loading preferences");
    let prefs = PreferencesHandle::load(store);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Oracle Counter")
            .with_inner_size([500.0, 600.0])
            .with_resizable(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "Oracle Counter",
        native_options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();
            let hook = match KeyboardHook::install(move || ctx.request_repaint()) {
                Ok(hook) => Some(hook),
                Err(e) => {
                    tracing::warn!("keyboard hook unavailable: {e:#}");
                    None
                }
            };
            Box::new(CounterApp::new(prefs, hook, Box::new(SendInputEmitter)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("run gui: {e}"))
}
