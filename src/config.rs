//! # Application Settings
//!
//! Settings are layered, later layers winning:
//!
//! 1. `appsettings.json`: the `AppSettings` section (optional)
//! 2. `appsettings.{Mode}.json`: the same section for the active mode (optional)
//! 3. `APPSETTINGS_<KEY>` environment variables, e.g. `APPSETTINGS_APPLICATIONMODE=Test`
//!
//! ```json
//! { "AppSettings": { "ApplicationMode": "Development", "Host": "localhost:5000" } }
//! ```
//!
//! A missing file is not an error. A file that exists but does not parse is.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

pub const SETTINGS_FILE: &str = "appsettings.json";
pub const SETTINGS_SECTION: &str = "AppSettings";
pub const ENV_PREFIX: &str = "APPSETTINGS_";

const KEYS: [&str; 5] = ["ApplicationMode", "Host", "Scheme", "SystemAdmin", "AuthUrl"];

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid settings: {0}")]
    Invalid(serde_json::Error),
    #[error("Unknown application mode: {0}")]
    UnknownMode(String),
}

/// Which pipeline the host assembles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ApplicationMode {
    #[default]
    Production,
    Development,
    Test,
}

impl FromStr for ApplicationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ApplicationMode {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for ApplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Production => "Production",
            Self::Development => "Development",
            Self::Test => "Test",
        };
        f.write_str(s)
    }
}

/// The `AppSettings` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AppSettings {
    pub application_mode: ApplicationMode,
    pub host: String,
    pub scheme: String,
    /// Comma-separated list of administrator emails.
    pub system_admin: String,
    pub auth_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            application_mode: ApplicationMode::default(),
            host: "localhost".to_string(),
            scheme: "http".to_string(),
            system_admin: String::new(),
            auth_url: String::new(),
        }
    }
}

impl AppSettings {
    /// Loads settings from `dir` and the process environment. Variable names match
    /// regardless of case.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        Self::load_with(dir, |key| {
            vars.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.clone())
        })
    }

    /// Loads settings from `dir`, reading environment overrides through `env`.
    pub fn load_with(
        dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut merged = serde_json::Map::new();
        if let Some(base) = read_section(&dir.join(SETTINGS_FILE))? {
            merged.extend(base);
        }

        let mode = match env(&env_key("ApplicationMode")) {
            Some(mode) => mode.parse()?,
            None => match merged.get("ApplicationMode").and_then(|v| v.as_str()) {
                Some(mode) => mode.parse()?,
                None => ApplicationMode::default(),
            },
        };

        let overlay_path = dir.join(format!("appsettings.{mode}.json"));
        if let Some(overlay) = read_section(&overlay_path)? {
            merged.extend(overlay);
        }

        for key in KEYS {
            if let Some(value) = env(&env_key(key)) {
                debug!(key, "Setting overridden from environment");
                merged.insert(key.to_string(), serde_json::Value::String(value));
            }
        }

        let settings: AppSettings =
            serde_json::from_value(serde_json::Value::Object(merged)).map_err(ConfigError::Invalid)?;
        info!(mode = %settings.application_mode, host = %settings.host, "Settings loaded");
        Ok(settings)
    }

    /// True when `email` appears in the administrator list (case-insensitive).
    pub fn is_system_admin(&self, email: &str) -> bool {
        !email.is_empty()
            && self
                .system_admin
                .to_lowercase()
                .contains(&email.to_lowercase())
    }
}

fn env_key(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.to_ascii_uppercase())
}

fn read_section(
    path: &Path,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Settings file absent");
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut root: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    match root.get_mut(SETTINGS_SECTION).map(serde_json::Value::take) {
        Some(serde_json::Value::Object(section)) => Ok(Some(section)),
        _ => Ok(None),
    }
}
