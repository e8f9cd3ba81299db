//! Error handling for the lyricsfinder application
//!
//! Errors raised while talking to the lyrics service are typed so the lookup
//! controller can turn them into display text. Everything else (configuration,
//! terminal setup) propagates up to `main`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricsFinderError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Failures of a single request to the lyrics service.
///
/// The `Display` text of each variant is what the user ends up seeing after
/// the "Error: " prefix, so it stays close to the underlying error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: reqwest::StatusCode },

    #[error("Invalid response body: {reason}")]
    InvalidResponse { reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LyricsFinderError>;

impl From<toml::de::Error> for LyricsFinderError {
    fn from(err: toml::de::Error) -> Self {
        LyricsFinderError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::InvalidResponse {
            reason: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for LyricsFinderError {
    fn from(err: tokio::task::JoinError) -> Self {
        LyricsFinderError::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = NetworkError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }

    #[test]
    fn test_json_error_becomes_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: NetworkError = json_err.into();
        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
        assert!(err.to_string().starts_with("Invalid response body: "));
    }
}
