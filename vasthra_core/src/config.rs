//! Service configuration, loaded from a `settings.toml` file in the user's
//! config directory and overridable through the environment.
//!
//! # Examples
//!
//! ```no_run
//! use vasthra_core::config::{self, ServiceConfig};
//!
//! let config = config::load().unwrap_or_default().with_env_overrides();
//! assert!(config.resolve_url("/images/a.png").ends_with("/images/a.png"));
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{VasthraError, VasthraResult};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "vasthra";

/// Environment variable that replaces `base_url`
pub const SERVICE_URL_ENV: &str = "VASTHRA_SERVICE_URL";

/// Default address of the generation service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Endpoint that accepts sketch uploads
pub const GENERATE_PATH: &str = "/generate/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base address every server-relative image path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Where downloaded designs are written; the user's download dir if unset
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            download_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Apply `VASTHRA_SERVICE_URL` if it is set and non-empty
    pub fn with_env_overrides(self) -> Self {
        match env::var(SERVICE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                info!("{SERVICE_URL_ENV} set, using {url}");
                self.with_base_url(url)
            }
            _ => self,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().to_string();
        self
    }

    /// Resolve a server-relative path against the base address
    pub fn resolve_url(&self, path: &str) -> String {
        resolve_url(&self.base_url, path)
    }

    pub fn generate_url(&self) -> String {
        self.resolve_url(GENERATE_PATH)
    }
}

/// `base` with any trailing `/` removed, followed by `path`.
///
/// A leading `/` is added to `path` when it has none.
pub fn resolve_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> VasthraResult<ServiceConfig> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ServiceConfig::default())
}

/// Write to the default settings file
pub fn save(config: &ServiceConfig) -> VasthraResult<()> {
    let path = default_config_path().ok_or_else(|| VasthraError::ConfigError {
        reason: "no config directory on this platform".to_string(),
    })?;
    save_to_path(config, &path)
}

/// Read a config file. Invalid TOML falls back to defaults with a warning.
pub fn load_from_path(path: &Path) -> VasthraResult<ServiceConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        VasthraError::file_error("read config", path.display().to_string(), e.to_string())
    })?;

    Ok(toml::from_str(&content).unwrap_or_else(|e| {
        warn!("Invalid config at {}: {e}; using defaults", path.display());
        ServiceConfig::default()
    }))
}

pub fn save_to_path(config: &ServiceConfig, path: &Path) -> VasthraResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VasthraError::file_error("create config dir", parent.display().to_string(), e.to_string())
        })?;
    }
    let content = to_toml(config)?;
    fs::write(path, content).map_err(|e| {
        VasthraError::file_error("write config", path.display().to_string(), e.to_string())
    })
}

/// Render a config as TOML text
pub fn to_toml(config: &ServiceConfig) -> VasthraResult<String> {
    toml::to_string_pretty(config).map_err(|e| VasthraError::serialization(e.to_string()))
}
