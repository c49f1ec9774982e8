//! HTTP API Client
//!
//! Functions for communicating with the Health Coach REST API. The access
//! token lives in `localStorage["token"]` and is attached as a bearer header
//! whenever it is present.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/api";

/// Shown when a failure carries no server `detail`
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

const TOKEN_KEY: &str = "token";
const API_URL_KEY: &str = "healthcoach_api_url";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// API base URL: local storage, then the build-time override, then the default
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| {
            option_env!("HEALTHCOACH_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE)
                .to_string()
        });
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
#[allow(dead_code)]
pub fn set_api_base(url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

// ============ Token ============

pub fn stored_token() -> Option<String> {
    local_storage()?.get_item(TOKEN_KEY).ok().flatten()
}

pub fn store_token(token: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(TOKEN_KEY, token).is_err() {
            web_sys::console::warn_1(&"Could not persist access token".into());
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

// ============ Wire Types ============

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[allow(dead_code)]
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthProfile {
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    pub fitness_level: String,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub preferred_exercises: Vec<String>,
    #[serde(default)]
    pub avoid_exercises: Vec<String>,
    #[serde(default)]
    pub available_equipment: Vec<String>,
    pub workout_environment: String,
    pub updated_at: String,
}

impl HealthProfile {
    /// Body mass index, when height is usable
    pub fn bmi(&self) -> Option<f64> {
        if self.height <= 0.0 {
            return None;
        }
        let meters = self.height / 100.0;
        Some(self.weight / (meters * meters))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// The one message shown for a failed request
pub fn error_message(detail: Option<String>) -> String {
    detail
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

/// A failed request: HTTP status (0 for network failures) and user message
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

impl ApiFailure {
    fn network(e: impl std::fmt::Display) -> Self {
        web_sys::console::error_1(&format!("Network error: {}", e).into());
        Self {
            status: 0,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

// ============ API Functions ============

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match stored_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn check(response: Response) -> Result<Response, ApiFailure> {
    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body: ErrorBody = response.json().await.unwrap_or_default();

    Err(ApiFailure {
        status,
        message: error_message(body.detail),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiFailure> {
    response.json().await.map_err(|e| {
        web_sys::console::error_1(&format!("Parse error: {}", e).into());
        ApiFailure {
            status: 0,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    })
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiFailure> {
    let builder = with_auth(Request::get(&format!("{}{}", get_api_base(), path)));
    let response = builder.send().await.map_err(ApiFailure::network)?;
    decode(check(response).await?).await
}

async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiFailure> {
    let request = with_auth(Request::post(&format!("{}{}", get_api_base(), path)))
        .json(body)
        .map_err(ApiFailure::network)?;
    let response = request.send().await.map_err(ApiFailure::network)?;
    decode(check(response).await?).await
}

/// GET /auth/me
pub async fn me() -> Result<User, ApiFailure> {
    get("/auth/me").await
}

/// POST /auth/login
pub async fn login(req: &LoginRequest) -> Result<AuthResponse, ApiFailure> {
    post("/auth/login", req).await
}

/// POST /auth/register
pub async fn register(req: &RegisterRequest) -> Result<AuthResponse, ApiFailure> {
    post("/auth/register", req).await
}

/// GET /profile/health, `None` when nothing was saved yet
pub async fn fetch_health_profile() -> Result<Option<HealthProfile>, ApiFailure> {
    match get("/profile/health").await {
        Ok(profile) => Ok(Some(profile)),
        Err(ApiFailure { status: 404, .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(Some("Invalid email or password".to_string())),
            "Invalid email or password"
        );
        assert_eq!(error_message(None), GENERIC_ERROR_MESSAGE);
        assert_eq!(error_message(Some("  ".to_string())), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_profile_bmi() {
        let profile: HealthProfile = serde_json::from_value(serde_json::json!({
            "user_id": "u1",
            "height": 180.0,
            "weight": 81.0,
            "fitness_level": "beginner",
            "workout_environment": "home",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!((profile.bmi().unwrap() - 25.0).abs() < 1e-9);
        assert!(profile.fitness_goals.is_empty());
    }
}
