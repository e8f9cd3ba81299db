use std::env;
use crate::error::{Result, LyricsFinderError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const API_BASE_URL: &'static str = "LYRICSFINDER_API_BASE_URL";
    pub const USER_AGENT: &'static str = "LYRICSFINDER_USER_AGENT";

    // Special environment variables
    pub const CI: &'static str = "CI";
    pub const FORCE_LINE_UI: &'static str = "LYRICSFINDER_FORCE_LINE_UI";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(LyricsFinderError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Check if environment variable is present (for boolean flags)
    pub fn is_present(var_name: &str) -> bool {
        env::var(var_name).is_ok()
    }

    /// Get all LYRICSFINDER environment variables for debugging
    pub fn get_all_lyricsfinder_vars() -> Vec<(String, String)> {
        env::vars()
            .filter(|(key, _)| key.starts_with("LYRICSFINDER_"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_string() {
        env::set_var("TEST_LF_STRING", "  https://example.com  ");
        env::set_var("TEST_LF_BLANK", "   ");

        assert_eq!(
            EnvParser::parse_string("TEST_LF_STRING", None).unwrap(),
            Some("https://example.com".to_string())
        );
        assert_eq!(EnvParser::parse_string("TEST_LF_BLANK", None).unwrap(), None);
        assert_eq!(EnvParser::parse_string("TEST_LF_NOT_SET", None).unwrap(), None);

        env::remove_var("TEST_LF_STRING");
        env::remove_var("TEST_LF_BLANK");
    }

    #[test]
    fn test_parse_string_with_validator() {
        env::set_var("TEST_LF_URL_INVALID", "not a url");

        let result = EnvParser::parse_string("TEST_LF_URL_INVALID", Some(|value| {
            crate::config::validation::ConfigValidator::validate_http_url(value, "test")
        }));
        assert!(result.is_err());

        env::remove_var("TEST_LF_URL_INVALID");
    }
}
