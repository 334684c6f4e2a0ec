use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "SNOMED CT Entity Extraction CLI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Gemini API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Gemini generative-language endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for extraction.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Request timeout. The single generateContent call is the only network I/O.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "snomed_extract=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
}

/// Connection settings for the Gemini client.
///
/// Threaded explicitly into `GeminiClient::new` so tests can inject a fake
/// credential without touching process environment.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Config with an explicit key and default endpoint, model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the credential from `GEMINI_API_KEY`.
    ///
    /// An unset or blank variable is a hard error; the caller must not reach
    /// the network without a key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let config = GeminiConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    // Single test mutating GEMINI_API_KEY — keeps env handling away from
    // the parallel test runner.
    #[test]
    fn from_env_requires_nonblank_key() {
        std::env::remove_var(API_KEY_VAR);
        assert!(matches!(
            GeminiConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var(API_KEY_VAR, "   ");
        assert!(matches!(
            GeminiConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var(API_KEY_VAR, "abc123");
        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "abc123");

        std::env::remove_var(API_KEY_VAR);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
