use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub backend: BackendConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("CREDSAATHI_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let token = env::var("CREDSAATHI_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let backend = BackendConfig::new(base_url, token)?;

        Ok(Self {
            environment,
            backend,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings describing the scoring backend the console talks to.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl BackendConfig {
    pub fn new(base_url: String, token: Option<String>) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl {
                value: base_url.clone(),
            });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            token,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { value } => {
                write!(
                    f,
                    "CREDSAATHI_API_URL must be an http(s) URL, got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("CREDSAATHI_API_URL");
        env::remove_var("CREDSAATHI_TOKEN");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert!(config.backend.token.is_none());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDSAATHI_API_URL", "https://api.example.test/");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.backend.base_url, "https://api.example.test");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDSAATHI_API_URL", "ftp://nope");
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDSAATHI_TOKEN", "   ");
        let config = AppConfig::load().expect("config loads");
        assert!(config.backend.token.is_none());
    }
}
