//! Application configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::llm::GeminiConfig;
use crate::quiz::core::kinds::ModelCatalog;
use crate::quiz::session::DEFAULT_MAX_SESSIONS;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the Gemini base URL.
pub const API_URL_ENV: &str = "GEMINI_API_URL";
/// Environment variable capping generated tokens.
pub const MAX_OUTPUT_TOKENS_ENV: &str = "GEMINI_MAX_OUTPUT_TOKENS";
/// Environment variable selecting the default model.
pub const DEFAULT_MODEL_ENV: &str = "QUIZ_DEFAULT_MODEL";
/// Environment variable for the listen port.
pub const PORT_ENV: &str = "QUIZ_PORT";
/// Environment variable for the form assets directory.
pub const STATIC_DIR_ENV: &str = "QUIZ_STATIC_DIR";
/// Environment variable for the generation request timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "QUIZ_HTTP_TIMEOUT_SECS";
/// Environment variable bounding the number of in-memory sessions.
pub const MAX_SESSIONS_ENV: &str = "QUIZ_MAX_SESSIONS";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;
/// Default directory served as the form.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// Base URL parse error.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP server settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Directory holding the form assets.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Generation client settings, including the credential.
    pub gemini: GeminiConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Models offered by the form.
    pub catalog: ModelCatalog,
    /// Upper bound on in-memory sessions.
    pub max_sessions: usize,
}

impl AppConfig {
    /// Default configuration around `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            gemini: GeminiConfig::new(api_key),
            server: ServerConfig::default(),
            catalog: ModelCatalog::default(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV).ok_or(ConfigError::Missing(API_KEY_ENV))?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = get(API_URL_ENV) {
            config.gemini.base_url = base_url;
        }
        if let Some(raw) = get(MAX_OUTPUT_TOKENS_ENV) {
            config.gemini.max_output_tokens = Some(parse_var(MAX_OUTPUT_TOKENS_ENV, &raw)?);
        }
        if let Some(raw) = get(HTTP_TIMEOUT_ENV) {
            config.gemini.request_timeout =
                Duration::from_secs(parse_var(HTTP_TIMEOUT_ENV, &raw)?);
        }
        if let Some(model) = get(DEFAULT_MODEL_ENV) {
            config.catalog.default_model = model.trim().to_string();
        }
        if let Some(raw) = get(PORT_ENV) {
            config.server.port = parse_var(PORT_ENV, &raw)?;
        }
        if let Some(dir) = get(STATIC_DIR_ENV) {
            config.server.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(MAX_SESSIONS_ENV) {
            config.max_sessions = parse_var(MAX_SESSIONS_ENV, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any value is out of range or invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.gemini.api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Missing(API_KEY_ENV));
        }

        Url::parse(&self.gemini.base_url)?;

        if self.gemini.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: HTTP_TIMEOUT_ENV,
                reason: "must be > 0".to_string(),
            });
        }

        if self.gemini.max_output_tokens == Some(0) {
            return Err(ConfigError::Invalid {
                name: MAX_OUTPUT_TOKENS_ENV,
                reason: "must be > 0".to_string(),
            });
        }

        if !self.catalog.contains(&self.catalog.default_model) {
            return Err(ConfigError::Invalid {
                name: DEFAULT_MODEL_ENV,
                reason: format!(
                    "`{}` is not one of the offered models",
                    self.catalog.default_model
                ),
            });
        }

        if self.max_sessions == 0 {
            return Err(ConfigError::Invalid {
                name: MAX_SESSIONS_ENV,
                reason: "must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        name,
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::llm::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
    use crate::quiz::core::kinds::DEFAULT_MODEL;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let Ok(config) = load(&[(API_KEY_ENV, "secret")]) else {
            unreachable!("api key is set");
        };
        assert_eq!(config.gemini.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.gemini.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.gemini.max_output_tokens, None);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.static_dir, PathBuf::from(DEFAULT_STATIC_DIR));
        assert_eq!(config.catalog.default_model, DEFAULT_MODEL);
        assert_eq!(config.max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(load(&[]), Err(ConfigError::Missing(API_KEY_ENV))));
        assert!(matches!(
            load(&[(API_KEY_ENV, "   ")]),
            Err(ConfigError::Missing(API_KEY_ENV))
        ));
    }

    #[test]
    fn test_overrides() {
        let Ok(config) = load(&[
            (API_KEY_ENV, "secret"),
            (API_URL_ENV, "http://localhost:8080"),
            (MAX_OUTPUT_TOKENS_ENV, "150"),
            (HTTP_TIMEOUT_ENV, "30"),
            (DEFAULT_MODEL_ENV, "models/gemini-1.5-pro"),
            (PORT_ENV, "8081"),
            (STATIC_DIR_ENV, "/srv/quiz"),
            (MAX_SESSIONS_ENV, "16"),
        ]) else {
            unreachable!("all overrides are valid");
        };
        assert_eq!(config.gemini.base_url, "http://localhost:8080");
        assert_eq!(config.gemini.max_output_tokens, Some(150));
        assert_eq!(config.gemini.request_timeout, Duration::from_secs(30));
        assert_eq!(config.catalog.default_model, "models/gemini-1.5-pro");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/quiz"));
        assert_eq!(config.max_sessions, 16);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[(API_KEY_ENV, "k"), (PORT_ENV, "http")]),
            Err(ConfigError::Invalid { name: PORT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(API_KEY_ENV, "k"), (API_URL_ENV, "not a url")]),
            Err(ConfigError::Url(_))
        ));
        assert!(matches!(
            load(&[(API_KEY_ENV, "k"), (HTTP_TIMEOUT_ENV, "0")]),
            Err(ConfigError::Invalid { name: HTTP_TIMEOUT_ENV, .. })
        ));
        assert!(matches!(
            load(&[(API_KEY_ENV, "k"), (DEFAULT_MODEL_ENV, "models/unknown")]),
            Err(ConfigError::Invalid { name: DEFAULT_MODEL_ENV, .. })
        ));
        assert!(matches!(
            load(&[(API_KEY_ENV, "k"), (MAX_SESSIONS_ENV, "0")]),
            Err(ConfigError::Invalid { name: MAX_SESSIONS_ENV, .. })
        ));
    }
}
