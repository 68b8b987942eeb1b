//! Configuration and settings management
//!
//! Loads backend settings from config files and environment variables and
//! defines the paging constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Number of attractions shown on one page.
pub const PAGE_SIZE: usize = 5;

/// Address and description lines in the list view are cut to this many
/// display characters.
pub const LIST_TEXT_MAX_CHARS: usize = 50;

/// Radius passed to the location search when none is configured.
pub const DEFAULT_SEARCH_RADIUS: f64 = 0.01;

/// Timeout for a single backend request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum number of conversations kept in the session store.
pub const DEFAULT_SESSION_CAPACITY: u64 = 100_000;

/// Build the layered configuration shared by all settings structs.
///
/// Sources, later ones overriding earlier ones:
/// `config/default`, `config/{RUN_MODE}`, `config/local`, `APP__*` variables
/// and finally plain environment variables (empty values are ignored).
///
/// # Errors
///
/// Returns a `ConfigError` if a present source cannot be read or parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// Settings for talking to the attraction backend.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendSettings {
    /// Base URL of the attraction API, e.g. `https://example.org/api`.
    pub api_url: String,
    /// Radius sent with location searches.
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Upper bound on conversations held in memory.
    #[serde(default = "default_session_capacity")]
    pub session_capacity: u64,
}

const fn default_search_radius() -> f64 {
    DEFAULT_SEARCH_RADIUS
}

const fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

const fn default_session_capacity() -> u64 {
    DEFAULT_SESSION_CAPACITY
}

impl BackendSettings {
    /// Load backend settings from files and the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or `API_URL` is missing.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize backend settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if required keys are missing or malformed.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Self = config.try_deserialize()?;
        if settings.api_url.trim().is_empty() {
            return Err(ConfigError::Message("api_url must not be empty".to_string()));
        }
        Ok(settings)
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = Config::builder()
            .set_override("api_url", "http://localhost:8000/api/")
            .expect("override")
            .build()
            .expect("config");
        let settings = BackendSettings::from_config(config).expect("settings");

        assert_eq!(settings.api_base(), "http://localhost:8000/api");
        assert!((settings.search_radius - DEFAULT_SEARCH_RADIUS).abs() < f64::EPSILON);
        assert_eq!(settings.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(settings.session_capacity, DEFAULT_SESSION_CAPACITY);
    }

    #[test]
    fn test_string_values_are_parsed() {
        let config = Config::builder()
            .set_override("api_url", "http://backend")
            .expect("override")
            .set_override("search_radius", "2.5")
            .expect("override")
            .set_override("http_timeout_secs", "5")
            .expect("override")
            .build()
            .expect("config");
        let settings = BackendSettings::from_config(config).expect("settings");

        assert!((settings.search_radius - 2.5).abs() < f64::EPSILON);
        assert_eq!(settings.http_timeout_secs, 5);
    }

    #[test]
    fn test_missing_api_url_is_an_error() {
        let config = Config::builder().build().expect("config");
        assert!(BackendSettings::from_config(config).is_err());

        let config = Config::builder()
            .set_override("api_url", "   ")
            .expect("override")
            .build()
            .expect("config");
        assert!(BackendSettings::from_config(config).is_err());
    }
}
