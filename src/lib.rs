pub mod digits;
pub mod emitter;
pub mod feedback;
pub mod gui;
pub mod keyboard_hook;
pub mod logging;
pub mod overlay;
pub mod preference_store;
pub mod preferences;
pub mod theme;
pub mod visibility;
