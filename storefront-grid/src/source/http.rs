//! HTTP data source

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use serde_json::Value;
use url::Url;

use super::DataSource;
use crate::error::SourceError;
use crate::model::Row;

/// Name of the session cookie sent on credentialed requests.
pub const DEFAULT_SESSION_COOKIE: &str = "token";

/// Fetches rows as a JSON array from the storefront API.
///
/// The request path is appended to the base URL, so a base of
/// `http://localhost:3000/api` and a path of `/users` requests
/// `http://localhost:3000/api/users`.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use storefront_grid::source::HttpSource;
///
/// let source = HttpSource::builder()
///     .base_url("http://localhost:3000/api")
///     .session("eyJhbGciOi...")
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
#[derive(Clone)]
pub struct HttpSource {
    base_url: String,
    http_client: Client,
    session: Option<(String, String)>,
    timeout: Option<Duration>,
}

impl HttpSource {
    /// Creates a new builder.
    pub fn builder() -> HttpSourceBuilder<Missing> {
        HttpSourceBuilder::new()
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute request URL for `path`.
    pub fn url_for(&self, path: &str) -> Result<Url, SourceError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", joined, e)))
    }
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .field("has_session", &self.session.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str, credentials: bool) -> Result<Vec<Row>, SourceError> {
        let url = self.url_for(path)?;
        log::debug!("GET {} (credentials: {})", url, credentials);

        let mut request = self
            .http_client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, "no-cache");

        if credentials && let Some((name, value)) = &self.session {
            request = request.header(header::COOKIE, format!("{}={}", name, value));
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if status.is_success() {
            serde_json::from_str::<Vec<Row>>(&body)
                .map_err(|e| SourceError::parse_with_body(e.to_string(), body))
        } else {
            let message = error_message(&body);
            log::warn!("GET {} failed with {}: {}", url, status, message);
            if status == reqwest::StatusCode::UNAUTHORIZED {
                Err(SourceError::Unauthorized(message))
            } else {
                Err(SourceError::http(status.as_u16(), message))
            }
        }
    }
}

impl HttpSource {
    fn map_send_error(&self, error: reqwest::Error) -> SourceError {
        match self.timeout {
            Some(timeout) if error.is_timeout() => SourceError::Timeout(timeout),
            _ => SourceError::Network(error),
        }
    }
}

/// Pulls a readable message out of an error response body.
///
/// The storefront API answers errors as `{"error": "..."}` or
/// `{"message": "..."}`; anything else is reported verbatim.
pub fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    body.trim().to_string()
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`HttpSource`].
///
/// The base URL is required; [`HttpSourceBuilder::build`] only exists once
/// it has been set.
pub struct HttpSourceBuilder<BaseUrl> {
    base_url: BaseUrl,
    session: Option<(String, String)>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl HttpSourceBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            session: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the API base URL.
    pub fn base_url(self, url: impl Into<String>) -> HttpSourceBuilder<Set<String>> {
        HttpSourceBuilder {
            base_url: Set(url.into()),
            session: self.session,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for HttpSourceBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> HttpSourceBuilder<U> {
    /// Sets the session token sent as the `token` cookie on credentialed requests.
    pub fn session(self, token: impl Into<String>) -> Self {
        self.session_cookie(DEFAULT_SESSION_COOKIE, token)
    }

    /// Sets the session cookie name and value.
    pub fn session_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.session = Some((name.into(), value.into()));
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl HttpSourceBuilder<Set<String>> {
    /// Builds the [`HttpSource`].
    ///
    /// Fails only if the default HTTP client cannot be created.
    pub fn build(self) -> Result<HttpSource, SourceError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HttpSource {
            base_url: self.base_url.0,
            http_client,
            session: self.session,
            timeout: self.timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_slashes() {
        let source = HttpSource::builder()
            .base_url("http://localhost:3000/api/")
            .build()
            .unwrap();
        assert_eq!(
            source.url_for("/product/brands").unwrap().as_str(),
            "http://localhost:3000/api/product/brands"
        );
        assert_eq!(
            source.url_for("users").unwrap().as_str(),
            "http://localhost:3000/api/users"
        );
    }

    #[test]
    fn test_url_for_invalid_base() {
        let source = HttpSource::builder().base_url("not a url").build().unwrap();
        assert!(matches!(source.url_for("/users"), Err(SourceError::InvalidUrl(_))));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"error":"Accès refusé: Administrateur requis"}"#),
            "Accès refusé: Administrateur requis"
        );
        assert_eq!(error_message(r#"{"message":"gone"}"#), "gone");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
