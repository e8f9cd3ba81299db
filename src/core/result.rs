//! Mapping service responses to lookup outcomes

use serde::Serialize;

use crate::core::api::LyricsResponse;
use crate::error::NetworkError;

pub const NO_LYRICS_FOUND: &str = "No lyrics found";

/// Outcome of one lookup. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LyricsResult {
    Success { lyrics: String },
    Failure { reason: String },
    Empty,
}

impl LyricsResult {
    /// Presence-based mapping: lyrics win over message, and the `status` tag
    /// is not consulted. `{"status":"success"}` without lyrics is `Empty`.
    pub fn from_response(response: LyricsResponse) -> Self {
        match response {
            LyricsResponse { lyrics: Some(lyrics), .. } => LyricsResult::Success { lyrics },
            LyricsResponse { message: Some(reason), .. } => LyricsResult::Failure { reason },
            _ => LyricsResult::Empty,
        }
    }

    pub fn from_error(error: &NetworkError) -> Self {
        LyricsResult::Failure {
            reason: error.to_string(),
        }
    }

    /// Text rendered in the output area
    pub fn display_text(&self) -> String {
        match self {
            LyricsResult::Success { lyrics } => lyrics.clone(),
            LyricsResult::Failure { reason } => format!("Error: {}", reason),
            LyricsResult::Empty => NO_LYRICS_FOUND.to_string(),
        }
    }
}

impl From<std::result::Result<LyricsResponse, NetworkError>> for LyricsResult {
    fn from(result: std::result::Result<LyricsResponse, NetworkError>) -> Self {
        match result {
            Ok(response) => LyricsResult::from_response(response),
            Err(e) => LyricsResult::from_error(&e),
        }
    }
}
