//! Transport client.
//!
//! Sends one request, returns one parsed response. Before every send, the
//! stored session is re-read from disk and attached as a bearer credential
//! if present; there is no in-memory token cache, so a logout between two
//! requests takes effect immediately.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::session;

/// Error payload shape used by the backend (`{"message": "..."}`).
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin HTTP client for the polling backend.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    home: PathBuf,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from the loaded config and a home directory (where
    /// the session file lives).
    pub fn new(config: &Config, home: &Path) -> Result<Self> {
        Url::parse(&config.api_url)
            .with_context(|| format!("Invalid api_url: {}", config.api_url))?;

        Ok(Self {
            base_url: config.api_url.clone(),
            home: home.to_path_buf(),
            http: reqwest::Client::new(),
        })
    }

    /// The home directory this client reads its session from.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from GET {path}"))
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from POST {path}"))
    }

    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.send(Method::POST, path, Some(body)).await?;
        Ok(())
    }

    /// Sends one request and fails on non-2xx status.
    ///
    /// The error message prefers the backend's `{"message": ...}` payload and
    /// always carries the HTTP status.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if let Some(session) = session::load(&self.home)? {
            request = request.bearer_auth(session.access_token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!("{method} {url}");
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {method} request to {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            anyhow::bail!("{method} {path} failed (HTTP {status}): {detail}");
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;
    use crate::session::Session;
    use vox_types::User;

    fn client_for(server: &MockServer, home: &Path) -> ApiClient {
        let config = Config {
            api_url: server.uri(),
        };
        ApiClient::new(&config, home).unwrap()
    }

    fn store_session(home: &Path, token: &str) {
        crate::session::save(
            home,
            &Session {
                access_token: token.to_string(),
                user: User {
                    id: 1,
                    username: "ada".to_string(),
                },
            },
        )
        .unwrap();
    }

    /// Matcher: request carries no Authorization header at all.
    struct NoAuthHeader;

    impl wiremock::Match for NoAuthHeader {
        fn matches(&self, request: &Request) -> bool {
            !request.headers.contains_key("authorization")
        }
    }

    /// Test: a stored session is replayed as a bearer header.
    #[tokio::test]
    async fn test_bearer_attached_when_session_exists() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        store_session(temp.path(), "tok-123");

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let _: serde_json::Value = client.get_json("/ping").await.unwrap();
    }

    /// Test: without a session, no Authorization header is sent.
    #[tokio::test]
    async fn test_no_header_without_session() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(NoAuthHeader)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let _: serde_json::Value = client.get_json("/ping").await.unwrap();
    }

    /// Test: logging out between requests drops the header immediately.
    #[tokio::test]
    async fn test_token_reread_per_request() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;
        store_session(temp.path(), "tok-123");

        Mock::given(method("GET"))
            .and(path("/first"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/second"))
            .and(NoAuthHeader)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let _: serde_json::Value = client.get_json("/first").await.unwrap();
        crate::session::clear(temp.path()).unwrap();
        let _: serde_json::Value = client.get_json("/second").await.unwrap();
    }

    /// Test: non-2xx surfaces the backend's message and the status.
    #[tokio::test]
    async fn test_error_includes_backend_message() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/polls/999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Poll not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let err = client
            .get_json::<serde_json::Value>("/polls/999")
            .await
            .unwrap_err();
        let text = format!("{err:#}");
        assert!(text.contains("404"), "missing status in: {text}");
        assert!(text.contains("Poll not found"), "missing message in: {text}");
    }

    /// Test: a bad api_url is rejected at construction.
    #[test]
    fn test_invalid_base_url_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config {
            api_url: "not a url".to_string(),
        };
        assert!(ApiClient::new(&config, temp.path()).is_err());
    }
}
