//! # DOPC Configuration
//!
//! Where the venue API lives and what the form starts out filled with.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults         DopcConfig::default()                              │
//! │  2. Config file      --config PATH, else <config dir>/dopc/config.toml  │
//! │  3. Environment      DOPC_API_URL, DOPC_TIMEOUT_SECS, DOPC_VENUE_SLUG   │
//! │  4. Command line     --api-url, --venue-slug, --cart-value, ...         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example config.toml
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/venues"
//! timeout_secs = 5
//!
//! [defaults]
//! venue_slug = "home-assignment-venue-stockholm"
//! cart_value = "25.50"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use dopc_venue::DEFAULT_BASE_URL;

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Settings
// =============================================================================

/// Venue API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Collection URL; venue endpoints are `{base_url}/{slug}/static|dynamic`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Initial form values, kept as the text a user would type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub venue_slug: String,
    pub cart_value: String,
    pub user_latitude: String,
    pub user_longitude: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        FormDefaults {
            venue_slug: "home-assignment-venue-helsinki".to_string(),
            cart_value: "10".to_string(),
            user_latitude: "60.17094".to_string(),
            user_longitude: "24.93087".to_string(),
        }
    }
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DopcConfig {
    pub api: ApiSettings,
    pub defaults: FormDefaults,
}

impl DopcConfig {
    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// An explicit `config_path` must exist; the platform default path is
    /// optional. Command line overrides are applied by the caller, so this
    /// does not validate; call [`DopcConfig::validate`] once they are in.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("DOPC_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("DOPC_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric DOPC_TIMEOUT_SECS"),
            }
        }

        if let Some(slug) = var("DOPC_VENUE_SLUG") {
            self.defaults.venue_slug = slug;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "dopc").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
