//! Application configuration.
//!
//! Settings come from a TOML file, then environment variables, then
//! command-line flags, each layer overriding the one before it.
//!
//! ```toml
//! api_base_url = "http://127.0.0.1:8000"
//! theme = "dark"
//! session_file = "/home/me/.emergency_alert/session.json"
//! admin_user_id = "admin"
//! admin_password = "admin123"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::{SessionError, SessionStore, StaticCredentials, THEME_KEY};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "EMERGENCY_ALERT_CONFIG";

/// Environment variable overriding the backend base URL.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Session file name used when none is configured.
const DEFAULT_SESSION_FILE: &str = ".emergency_alert_session.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Light or dark presentation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// The mode last saved to `store`, if any. Unrecognised values are
    /// ignored.
    #[must_use]
    pub fn stored(store: &dyn SessionStore) -> Option<Self> {
        store.get(THEME_KEY).and_then(|raw| raw.parse().ok())
    }

    /// Saves this mode to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the store cannot be written.
    pub fn save(self, store: &mut dyn SessionStore) -> Result<(), SessionError> {
        store.set(THEME_KEY, self.as_ref())
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL. `None` means the client default.
    pub api_base_url: Option<String>,
    /// Initial presentation mode.
    pub theme: ThemeMode,
    /// Where the session is persisted.
    pub session_file: PathBuf,
    /// Admin user id accepted at login.
    pub admin_user_id: String,
    /// Admin password accepted at login.
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let demo = StaticCredentials::default();
        Self {
            api_base_url: None,
            theme: ThemeMode::default(),
            session_file: default_session_file(),
            admin_user_id: demo.user_id,
            admin_password: demo.password,
        }
    }
}

impl AppConfig {
    /// Loads settings from `path`, or from the file named by
    /// `EMERGENCY_ALERT_CONFIG`, then applies environment overrides.
    ///
    /// Without either, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a named file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads settings from a TOML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`toml::de::Error`] if the text is not valid config.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::de::from_str(contents)
    }

    /// Applies environment overrides using `lookup` to read variables.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|url| !url.is_empty()) {
            self.api_base_url = Some(url);
        }
    }

    /// The admin account login checks against.
    #[must_use]
    pub fn admin_credentials(&self) -> StaticCredentials {
        StaticCredentials {
            user_id: self.admin_user_id.clone(),
            password: self.admin_password.clone(),
            ..StaticCredentials::default()
        }
    }

    /// The theme to present: a mode saved in `store` wins over the
    /// configured one.
    #[must_use]
    pub fn effective_theme(&self, store: &dyn SessionStore) -> ThemeMode {
        ThemeMode::stored(store).unwrap_or(self.theme)
    }
}

/// `$HOME/.emergency_alert_session.json`, or the working directory when
/// `HOME` is unset.
fn default_session_file() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(PathBuf::new, PathBuf::from)
        .join(DEFAULT_SESSION_FILE)
}
