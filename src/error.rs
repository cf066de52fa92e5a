//! Error types for Long-Bio.

/// Top-level error type for the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Verification error: {0}")]
    Verify(#[from] VerifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Transport-level verification client errors.
///
/// None of these reach the user directly; the session folds every
/// variant into a `NetworkError` outcome with a fixed inline message.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Send-code request failed: {reason}")]
    SendFailed { reason: String },

    #[error("Verify-code request failed: {reason}")]
    Transport { reason: String },

    #[error("Unreadable response from verification service: {reason}")]
    InvalidBody { reason: String },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
