use url::Url;
use crate::error::{Result, LyricsFinderError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| {
            LyricsFinderError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })
    }

    /// Validate that a URL can be used as the base address of an HTTP service
    pub fn validate_http_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Self::validate_url(url, field_name)?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(LyricsFinderError::Validation(format!(
                "{} URL must start with 'http://' or 'https://', got: {}",
                field_name, url
            )));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(LyricsFinderError::Validation(format!(
                "{} URL must not carry a query string or fragment, got: {}",
                field_name, url
            )));
        }

        Ok(())
    }

    /// Validate a header-safe, non-empty string
    pub fn validate_header_value(value: &str, field_name: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(LyricsFinderError::Validation(format!("{} must not be empty", field_name)));
        }

        if value.chars().any(|c| c.is_control()) {
            return Err(LyricsFinderError::Validation(format!(
                "{} must not contain control characters",
                field_name
            )));
        }

        Ok(())
    }
}
