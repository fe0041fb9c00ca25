//! `HttpTransport` - blocking HTTP transport backed by `reqwest`.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::instrument;
use url::Url;

use super::Transport;
use super::rate_limiter::RateLimiter;
use crate::error::TransportError;
use crate::views::ErrorStatus;

/// Default `User-Agent` header.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP transport with request pacing.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpTransport {
    /// HTTP client.
    http_client: Client,
    /// Rate limiter shared by every request of this transport.
    rate_limiter: Mutex<RateLimiter>,
}

/// Builder for `HttpTransport`.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct HttpTransportBuilder {
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Sets the User-Agent (default: `cinetree-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets a whole-request timeout (default: none).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] if the `reqwest` client fails to build.
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let rate_limiter = self
            .min_interval
            .map_or_else(RateLimiter::default_interval, RateLimiter::new);

        let mut builder = Client::builder().user_agent(user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(HttpTransport {
            http_client,
            rate_limiter: Mutex::new(rate_limiter),
        })
    }
}

impl HttpTransport {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }
}

impl Transport for HttpTransport {
    #[instrument(skip_all)]
    fn fetch(&self, url: &Url) -> Result<String, TransportError> {
        self.rate_limiter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .wait();

        tracing::debug!(path = url.path(), "TMDB API request");

        let response = self.http_client.get(url.clone()).send()?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(path = url.path(), "TMDB API resource not found");
            return Ok(String::new());
        }

        let body = response.text()?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), path = url.path(), "TMDB API error");
            return Err(status_error(status, &body));
        }

        Ok(body)
    }
}

/// Decodes a TMDB error body, falling back to the raw text.
fn status_error(status: StatusCode, body: &str) -> TransportError {
    let decoded = ErrorStatus::parse(body)
        .and_then(|e| Ok((e.status_code()?, e.status_message()?)))
        .ok();
    let (code, message) = decoded.unwrap_or_else(|| (0, String::from(body)));
    TransportError::Status {
        http: status.as_u16(),
        code,
        message,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use tokio::task::JoinHandle;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Runs a blocking fetch off the async runtime.
    fn fetch_blocking(url: Url) -> JoinHandle<Result<String, TransportError>> {
        tokio::task::spawn_blocking(move || {
            let transport = HttpTransport::builder()
                .user_agent("test/0.0.0")
                .min_interval(Duration::from_millis(0))
                .build()
                .unwrap();
            transport.fetch(&url)
        })
    }

    #[test]
    fn test_builder_defaults_succeed() {
        // Arrange & Act
        let result = HttpTransport::builder().build();

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_status_error_decodes_tmdb_body() {
        // Arrange
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let err = status_error(StatusCode::UNAUTHORIZED, body);

        // Assert
        let text = err.to_string();
        assert!(text.contains("HTTP 401"));
        assert!(text.contains("code=7"));
        assert!(text.contains("Invalid API key"));
    }

    #[test]
    fn test_status_error_keeps_raw_body() {
        // Arrange & Act
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");

        // Assert
        assert!(matches!(
            err,
            TransportError::Status { http: 502, code: 0, ref message } if message == "upstream down"
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_returns_body() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/popular"))
            .and(query_param("api_key", "test-key"))
            .and(header("User-Agent", "test/0.0.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"page":1}"#))
            .expect(1)
            .mount(&mock_server)
            .await;
        let url = Url::parse(&format!("{}/3/tv/popular?api_key=test-key", mock_server.uri())).unwrap();

        // Act
        let body = fetch_blocking(url).await.unwrap().unwrap();

        // Assert
        assert_eq!(body, r#"{"page":1}"#);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_not_found_returns_empty() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#,
            ))
            .mount(&mock_server)
            .await;
        let url = Url::parse(&format!("{}/3/movie/0", mock_server.uri())).unwrap();

        // Act
        let body = fetch_blocking(url).await.unwrap().unwrap();

        // Assert
        assert!(body.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_unauthorized_is_status_error() {
        // Arrange
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
            ))
            .mount(&mock_server)
            .await;
        let url = Url::parse(&format!("{}/3/configuration", mock_server.uri())).unwrap();

        // Act
        let result = fetch_blocking(url).await.unwrap();

        // Assert
        assert!(matches!(
            result,
            Err(TransportError::Status { http: 401, code: 7, .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_connection_failure_is_request_error() {
        // Arrange
        let url = Url::parse("http://127.0.0.1:1/3/configuration").unwrap();

        // Act
        let result = fetch_blocking(url).await.unwrap();

        // Assert
        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
