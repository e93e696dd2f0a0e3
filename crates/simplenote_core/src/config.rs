//! Shared configuration between the app and its extensions.
//!
//! # Responsibility
//! - Resolve the shared storage directory (app-group container).
//! - Persist the small preference set extensions read: login state and the
//!   note list sort mode.
//!
//! # Invariants
//! - `WidgetDefaults::load` never fails; missing or invalid files yield
//!   defaults (logged out, modified-newest).
//! - Extensions only read these values; the app writes them.

use crate::model::query::SortMode;
use crate::service::note_query::QueryContext;
use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const SHARED_STORAGE_ENV: &str = "SIMPLENOTE_SHARED_STORAGE";
const SHARED_STORAGE_FALLBACK_DIR: &str = "simplenote-shared";
const SHARED_DB_FILE_NAME: &str = "simplenote.sqlite3";
const WIDGET_DEFAULTS_FILE_NAME: &str = "widget_defaults.json";

/// Shared storage locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    shared_dir: PathBuf,
}

impl StorageSettings {
    /// Uses an explicit shared directory.
    pub fn new(shared_dir: impl Into<PathBuf>) -> Self {
        Self {
            shared_dir: shared_dir.into(),
        }
    }

    /// Resolves the shared directory from `SIMPLENOTE_SHARED_STORAGE`, falling
    /// back to a child of the system temp dir.
    pub fn from_env() -> Self {
        if let Ok(raw) = std::env::var(SHARED_STORAGE_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Self::new(trimmed);
            }
        }
        Self::new(std::env::temp_dir().join(SHARED_STORAGE_FALLBACK_DIR))
    }

    pub fn shared_storage_dir(&self) -> &Path {
        &self.shared_dir
    }

    /// Path of the shared SQLite store.
    pub fn shared_db_path(&self) -> PathBuf {
        self.shared_dir.join(SHARED_DB_FILE_NAME)
    }

    /// Path of the persisted widget defaults.
    pub fn widget_defaults_path(&self) -> PathBuf {
        self.shared_dir.join(WIDGET_DEFAULTS_FILE_NAME)
    }
}

/// Preferences the app shares with widget and intents extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetDefaults {
    /// Whether a user is authenticated in the main app.
    pub logged_in: bool,
    /// Note list ordering chosen in the main app.
    pub sort_mode: SortMode,
}

impl WidgetDefaults {
    /// Loads defaults from shared storage. Returns `Default` if missing or invalid.
    pub fn load(settings: &StorageSettings) -> Self {
        let path = settings.widget_defaults_path();
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match serde_json::from_str(&raw) {
            Ok(defaults) => defaults,
            Err(err) => {
                warn!(
                    "event=config_load module=config status=error error_code=invalid_json error={}",
                    err
                );
                Self::default()
            }
        }
    }

    /// Persists defaults into shared storage, creating the directory if needed.
    pub fn save(&self, settings: &StorageSettings) -> Result<(), ConfigError> {
        std::fs::create_dir_all(settings.shared_storage_dir()).map_err(ConfigError::Write)?;
        let raw = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(settings.widget_defaults_path(), raw).map_err(ConfigError::Write)
    }

    /// Builds the explicit query context consumed by query services.
    pub fn query_context(&self, is_preview: bool) -> QueryContext {
        QueryContext {
            logged_in: self.logged_in,
            sort_mode: self.sort_mode,
            is_preview,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Serialize(serde_json::Error),
    Write(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize widget defaults: {err}"),
            Self::Write(err) => write!(f, "failed to write widget defaults: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}
