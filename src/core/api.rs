//! HTTP client for the lyrics service
//!
//! The service exposes a single `GET /get_lyrics` endpoint that takes either
//! a `query` parameter or an `artist`/`title` pair. Both successes and the
//! service's own errors come back as the same JSON body; only transport
//! failures and undecodable bodies surface as [`NetworkError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::query::LookupRequest;
use crate::error::{LyricsFinderError, NetworkError, Result};

/// Body returned by `get_lyrics`, for successes and errors alike
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct LyricsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The remote lyrics service
#[async_trait]
pub trait LyricsApi: Send + Sync {
    async fn get_lyrics(&self, request: &LookupRequest) -> std::result::Result<LyricsResponse, NetworkError>;
}

#[derive(Clone)]
pub struct HttpLyricsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLyricsApi {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        // No timeout override: the client's default applies
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| LyricsFinderError::Network(NetworkError::Http(e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/get_lyrics", self.base_url)
    }
}

#[async_trait]
impl LyricsApi for HttpLyricsApi {
    async fn get_lyrics(&self, request: &LookupRequest) -> std::result::Result<LyricsResponse, NetworkError> {
        let url = self.endpoint();
        info!("Requesting lyrics for {}", request);

        let response = self.client
            .get(&url)
            .query(&request.params())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Lyrics service answered {} ({} bytes)", status, body.len());

        // The service reports its own failures (400, 500) with the usual JSON
        // body, so decode first and only fall back to the status code.
        match serde_json::from_str::<LyricsResponse>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    warn!("Lyrics service returned {} with a decodable body", status);
                }
                Ok(parsed)
            }
            Err(_) if !status.is_success() => Err(NetworkError::Status { status }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_with_all_fields() {
        let response: LyricsResponse =
            serde_json::from_str(r#"{"status":"success","lyrics":"La la la"}"#).unwrap();
        assert_eq!(response.status.as_deref(), Some("success"));
        assert_eq!(response.lyrics.as_deref(), Some("La la la"));
        assert_eq!(response.message, None);
    }

    #[test]
    fn test_response_fields_are_optional() {
        let response: LyricsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, LyricsResponse::default());

        let response: LyricsResponse =
            serde_json::from_str(r#"{"status":"error","message":"not found","lyrics":null}"#).unwrap();
        assert_eq!(response.lyrics, None);
        assert_eq!(response.message.as_deref(), Some("not found"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let api = HttpLyricsApi::new("http://127.0.0.1:10000/", "lyricsfinder/test").unwrap();
        assert_eq!(api.base_url(), "http://127.0.0.1:10000");
        assert_eq!(api.endpoint(), "http://127.0.0.1:10000/get_lyrics");
    }

    /// Serve one canned HTTP response on an ephemeral loopback port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    async fn lookup(base_url: &str) -> std::result::Result<LyricsResponse, NetworkError> {
        let api = HttpLyricsApi::new(base_url, "lyricsfinder/test").unwrap();
        api.get_lyrics(&LookupRequest::ArtistTitle {
            artist: "Adele".to_string(),
            title: "Hello".to_string(),
        })
        .await
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let base_url = serve_once("200 OK", r#"{"status":"success","lyrics":"Hello, it's me"}"#).await;

        let response = lookup(&base_url).await.unwrap();
        assert_eq!(response.lyrics.as_deref(), Some("Hello, it's me"));
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_decoded() {
        let base_url = serve_once(
            "400 Bad Request",
            r#"{"status":"error","message":"Missing required parameters"}"#,
        )
        .await;

        let response = lookup(&base_url).await.unwrap();
        assert_eq!(response.status.as_deref(), Some("error"));
        assert_eq!(response.lyrics, None);
        assert_eq!(response.message.as_deref(), Some("Missing required parameters"));
    }

    #[tokio::test]
    async fn test_error_status_with_html_body_is_status_error() {
        let base_url = serve_once("502 Bad Gateway", "<html><body>Bad Gateway</body></html>").await;

        let err = lookup(&base_url).await.unwrap_err();
        assert!(matches!(
            err,
            NetworkError::Status { status } if status == reqwest::StatusCode::BAD_GATEWAY
        ));
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_ok_status_with_undecodable_body_is_invalid_response() {
        let base_url = serve_once("200 OK", "<html>maintenance</html>").await;

        let err = lookup(&base_url).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        // Port 9 (discard) is not expected to be listening on loopback
        let api = HttpLyricsApi::new("http://127.0.0.1:9", "lyricsfinder/test").unwrap();
        let result = api
            .get_lyrics(&LookupRequest::FreeText("Hello".to_string()))
            .await;

        assert!(matches!(result, Err(NetworkError::Http(_))));
    }
}
