//! Health Coach REST API Client
//!
//! HTTP client for the Health Coach API. When a token is set it is sent as
//! `Authorization: Bearer <token>` on every request.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::dto::{
    AuthResponse, LoginRequest, ProfileRequest, ProfileSaveResponse, RegisterRequest,
    RootResponse, UserResponse,
};
use crate::client::{ClientError, ClientResult};
use crate::store::HealthProfile;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api";

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// REST client for the Health Coach API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach a bearer token to subsequent requests
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Stop sending a bearer token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Currently attached token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// GET /api/
    pub async fn root(&self) -> ClientResult<RootResponse> {
        let response = self.request(self.client.get(self.url("/"))).await?;
        decode(response).await
    }

    /// POST /api/auth/login
    pub async fn login(&self, req: &LoginRequest) -> ClientResult<AuthResponse> {
        let builder = self.client.post(self.url("/auth/login")).json(req);
        decode(self.request(builder).await?).await
    }

    /// POST /api/auth/register
    pub async fn register(&self, req: &RegisterRequest) -> ClientResult<AuthResponse> {
        let builder = self.client.post(self.url("/auth/register")).json(req);
        decode(self.request(builder).await?).await
    }

    /// GET /api/auth/me
    pub async fn me(&self) -> ClientResult<UserResponse> {
        let builder = self.client.get(self.url("/auth/me"));
        decode(self.request(builder).await?).await
    }

    /// GET /api/profile/health, `None` when no profile was saved yet
    pub async fn get_profile(&self) -> ClientResult<Option<HealthProfile>> {
        let builder = self.client.get(self.url("/profile/health"));
        match self.request(builder).await {
            Ok(response) => decode(response).await.map(Some),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// POST /api/profile/health
    pub async fn save_profile(&self, req: &ProfileRequest) -> ClientResult<ProfileSaveResponse> {
        let builder = self.client.post(self.url("/profile/health")).json(req);
        decode(self.request(builder).await?).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the token, send, and turn non-2xx answers into `ClientError::Api`
    async fn request(&self, builder: RequestBuilder) -> ClientResult<Response> {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let detail = error_detail(response).await;
        tracing::debug!(status = status.as_u16(), detail = ?detail, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pull a `detail` string out of an error body, if the body has one
async fn error_detail(response: Response) -> Option<String> {
    if response.status() == StatusCode::NO_CONTENT {
        return None;
    }
    let body: serde_json::Value = response.json().await.ok()?;
    body.get("detail")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(ClientConfig::new("http://example.test/api/")).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.url("/auth/me"), "http://example.test/api/auth/me");
    }

    #[test]
    fn test_token_attach_and_clear() {
        let mut client = ApiClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.token(), None);

        client.set_token("abc");
        assert_eq!(client.token(), Some("abc"));

        client.clear_token();
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let client = ApiClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap();

        let err = client.me().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(err.user_message(), crate::client::GENERIC_ERROR_MESSAGE);
    }
}
