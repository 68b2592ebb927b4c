use crate::preference_store::PreferenceStore;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERLAY_COLOR: &str = "#ffff00";

/// User preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Text color of the digits, as `#rrggbb`.
    #[serde(default = "default_overlay_color")]
    pub overlay_color: String,
    /// Last overlay position. Only used when both coordinates are set.
    #[serde(default)]
    pub overlay_x: Option<i32>,
    #[serde(default)]
    pub overlay_y: Option<i32>,
    /// When true the overlay ignores the mouse and hides its positioning aid.
    #[serde(default)]
    pub overlay_locked: bool,
    /// Keys we do not recognise. Kept so saving does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_overlay_color() -> String {
    DEFAULT_OVERLAY_COLOR.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            overlay_color: default_overlay_color(),
            overlay_x: None,
            overlay_y: None,
            overlay_locked: false,
            extra: serde_json::Map::new(),
        }
    }
}

impl Preferences {
    pub fn overlay_position(&self) -> Option<(i32, i32)> {
        match (self.overlay_x, self.overlay_y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

/// The single owner of the live preferences. Both windows read through it and
/// every mutation is written back to the store immediately.
#[derive(Debug)]
pub struct PreferencesHandle {
    prefs: Preferences,
    store: PreferenceStore,
}

impl PreferencesHandle {
    pub fn load(store: PreferenceStore) -> Self {
        let prefs = store.load();
        Self { prefs, store }
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Write the current record. Returns `false` if the write failed.
    pub fn save(&self) -> bool {
        self.store.save(&self.prefs)
    }

    pub fn set_overlay_color(&mut self, color: impl Into<String>) -> bool {
        self.prefs.overlay_color = color.into();
        self.save()
    }

    pub fn reset_overlay_color(&mut self) -> bool {
        self.set_overlay_color(DEFAULT_OVERLAY_COLOR)
    }

    /// Flip the lock flag, persist it and return the new state.
    pub fn toggle_locked(&mut self) -> bool {
        self.prefs.overlay_locked = !self.prefs.overlay_locked;
        tracing::debug!(locked = self.prefs.overlay_locked, "overlay lock toggled");
        self.save();
        self.prefs.overlay_locked
    }

    /// Record a new overlay position. Unchanged positions are not rewritten.
    pub fn set_overlay_position(&mut self, pos: (i32, i32)) -> bool {
        if self.prefs.overlay_position() == Some(pos) {
            return true;
        }
        self.prefs.overlay_x = Some(pos.0);
        self.prefs.overlay_y = Some(pos.1);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_requires_both_coordinates() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.overlay_position(), None);
        prefs.overlay_x = Some(10);
        assert_eq!(prefs.overlay_position(), None);
        prefs.overlay_y = Some(-5);
        assert_eq!(prefs.overlay_position(), Some((10, -5)));
    }

    #[test]
    fn default_serializes_all_four_keys() {
        let value = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "overlay_color": "#ffff00",
                "overlay_x": null,
                "overlay_y": null,
                "overlay_locked": false
            })
        );
    }
}
