//! Turning what the user typed into a request against the lyrics service

use std::fmt;

/// Prompt shown when the search is triggered with nothing to look up
pub const BLANK_QUERY_PROMPT: &str = "Please enter a song title or URL";

/// Separator between artist and title in "Artist - Title" queries
const ARTIST_TITLE_SEPARATOR: char = '-';

/// Raw user input that passed the non-blank check.
///
/// The original text is kept untouched; trimming only happens when the query
/// is decomposed into artist and title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Reject blank input. Returns the user-facing prompt on failure.
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        if raw.trim().is_empty() {
            return Err(BLANK_QUERY_PROMPT);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_request(&self) -> LookupRequest {
        LookupRequest::from_query(self)
    }
}

/// The endpoint variant a query resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    /// `get_lyrics?query=...` with the raw query
    FreeText(String),
    /// `get_lyrics?artist=...&title=...`
    ArtistTitle { artist: String, title: String },
}

impl LookupRequest {
    /// Split on '-' and use the artist/title variant only when there are
    /// exactly two parts and neither is empty after trimming. Names that
    /// themselves contain a dash ("Jay-Z - Song") fall back to free text.
    pub fn from_query(query: &Query) -> Self {
        let raw = query.as_str();
        let parts: Vec<&str> = raw.split(ARTIST_TITLE_SEPARATOR).collect();

        if let [artist, title] = parts.as_slice() {
            let artist = artist.trim();
            let title = title.trim();
            if !artist.is_empty() && !title.is_empty() {
                return LookupRequest::ArtistTitle {
                    artist: artist.to_string(),
                    title: title.to_string(),
                };
            }
        }

        LookupRequest::FreeText(raw.to_string())
    }

    /// Query-string parameters for the GET request
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            LookupRequest::FreeText(query) => vec![("query", query.as_str())],
            LookupRequest::ArtistTitle { artist, title } => {
                vec![("artist", artist.as_str()), ("title", title.as_str())]
            }
        }
    }
}

impl fmt::Display for LookupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupRequest::FreeText(query) => write!(f, "query '{}'", query),
            LookupRequest::ArtistTitle { artist, title } => {
                write!(f, "artist '{}', title '{}'", artist, title)
            }
        }
    }
}
