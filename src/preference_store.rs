use crate::preferences::Preferences;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PREFERENCES_FILE_NAME: &str = "config.json";
pub const PREFERENCES_PATH_ENV: &str = "ORACLE_COUNTER_CONFIG";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("preferences file {0} does not exist")]
    NotFound(PathBuf),
    #[error("read or write preferences file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse preferences file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialize preferences")]
    Serialize(#[source] serde_json::Error),
}

/// Preferences file location: `ORACLE_COUNTER_CONFIG` if set, otherwise
/// `config.json` in the working directory.
pub fn resolve_preferences_path() -> PathBuf {
    std::env::var_os(PREFERENCES_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(PREFERENCES_FILE_NAME))
}

/// JSON file backing [`Preferences`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, backfilling missing keys with defaults.
    pub fn try_load(&self) -> Result<Preferences, PreferencesError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PreferencesError::NotFound(self.path.clone())
            } else {
                PreferencesError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        if content.trim().is_empty() {
            return Ok(Preferences::default());
        }

        serde_json::from_str(&content).map_err(|source| PreferencesError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`try_load`](Self::try_load) but any failure yields the defaults.
    pub fn load(&self) -> Preferences {
        match self.try_load() {
            Ok(prefs) => prefs,
            Err(PreferencesError::NotFound(path)) => {
                tracing::debug!(path = %path.display(), "no preferences file, using defaults");
                Preferences::default()
            }
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load preferences, using defaults");
                Preferences::default()
            }
        }
    }

    pub fn try_save(&self, prefs: &Preferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| PreferencesError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(prefs).map_err(PreferencesError::Serialize)?;
        std::fs::write(&self.path, json).map_err(|source| PreferencesError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `prefs`. Returns `false` on failure.
    pub fn save(&self, prefs: &Preferences) -> bool {
        match self.try_save(prefs) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to save preferences");
                false
            }
        }
    }
}
