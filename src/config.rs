//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Onboarding service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote verification API.
    pub api_base: String,
    /// Port the wizard HTTP server binds to.
    pub port: u16,
    /// Pause between a successful verification and the forward
    /// navigation, so the success indicator gets a beat to render.
    pub success_delay: Duration,
    /// Per-request timeout for calls to the verification API.
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4000/api".to_string(),
            port: 8080,
            success_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Load configuration from `LONG_BIO_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("LONG_BIO_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Ok(port) = std::env::var("LONG_BIO_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LONG_BIO_PORT".to_string(),
                message: format!("not a port number: {port}"),
            })?;
        }
        if let Ok(ms) = std::env::var("LONG_BIO_SUCCESS_DELAY_MS") {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LONG_BIO_SUCCESS_DELAY_MS".to_string(),
                message: format!("not a millisecond count: {ms}"),
            })?;
            config.success_delay = Duration::from_millis(ms);
        }
        if let Ok(secs) = std::env::var("LONG_BIO_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LONG_BIO_REQUEST_TIMEOUT_SECS".to_string(),
                message: format!("not a second count: {secs}"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
