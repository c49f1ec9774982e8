//! Health Coach REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Root
//! - `GET /api/` - Service banner
//!
//! ## Auth
//! - `POST /api/auth/register` - Create an account
//! - `POST /api/auth/login` - Log in
//! - `GET /api/auth/me` - Current user (bearer token required)
//!
//! ## Health profile (bearer token required)
//! - `POST /api/profile/health` - Create or update
//! - `GET /api/profile/health` - Fetch
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use healthcoach::api::{serve, ApiConfig, AppState};
//! use healthcoach::auth::TokenIssuer;
//! use healthcoach::store::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open("healthcoach.db")?);
//!     let tokens = TokenIssuer::from_secret_or_random(None, 7);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, tokens, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me))
        // Health profile routes
        .route(
            "/profile/health",
            get(routes::profile::get_health_profile).post(routes::profile::save_health_profile),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/api", get(routes::root::root))
        .route("/api/", get(routes::root::root))
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS: any origin when none are configured, otherwise only the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Health Coach API listening on {}", addr);

    serve_on(listener, state).await
}

/// Serve on an already bound listener until a shutdown signal arrives
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), ApiError> {
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Health Coach API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{AuthResponse, HealthResponse, RootResponse, UserResponse};
    use crate::api::error::ErrorResponse;
    use crate::auth::TokenIssuer;
    use crate::store::{HealthProfile, Store};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(Store::open_in_memory().unwrap());
        let tokens = TokenIssuer::new(b"router-test-secret-0123456789abcdef", chrono::Duration::days(7));
        let config = ApiConfig {
            bcrypt_cost: 4,
            ..ApiConfig::default()
        };

        build_router(AppState::new(store, tokens, config))
    }

    fn json_request(method: &str, uri: &str, body: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const REGISTER_BODY: &str = r#"{"email": "kim@example.com", "password": "pw1234", "name": "Kim", "age": 31, "gender": "female"}"#;

    async fn register(app: &Router) -> AuthResponse {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/register", REGISTER_BODY, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health/live", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_and_full() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/health/ready", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = read_json(response).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.users, Some(0));
    }

    #[tokio::test]
    async fn test_root_banner() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/api/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let root: RootResponse = read_json(response).await;
        assert_eq!(root.message, "AI Health Coach API");
    }

    #[tokio::test]
    async fn test_register_then_me() {
        let app = create_test_app();
        let auth = register(&app).await;

        assert_eq!(auth.token_type, "bearer");
        assert_eq!(auth.user.email, "kim@example.com");

        let response = app
            .oneshot(get_request("/api/auth/me", Some(&auth.access_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let me: UserResponse = read_json(response).await;
        assert_eq!(me, auth.user);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let app = create_test_app();
        register(&app).await;

        let response = app
            .oneshot(json_request("POST", "/api/auth/register", REGISTER_BODY, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.detail, "Email is already registered");
    }

    #[tokio::test]
    async fn test_register_invalid_gender() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                r#"{"email": "a@b.c", "password": "x", "name": "A", "age": 20, "gender": "robot"}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("POST", "/api/auth/register", "not json", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let app = create_test_app();
        register(&app).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                r#"{"email": "kim@example.com", "password": "pw1234"}"#,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let auth: AuthResponse = read_json(response).await;
        assert!(!auth.access_token.is_empty());

        for body in [
            r#"{"email": "kim@example.com", "password": "wrong"}"#,
            r#"{"email": "nobody@example.com", "password": "pw1234"}"#,
        ] {
            let response = app
                .clone()
                .oneshot(json_request("POST", "/api/auth/login", body, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error: ErrorResponse = read_json(response).await;
            assert_eq!(error.detail, "Invalid email or password");
        }
    }

    #[tokio::test]
    async fn test_me_requires_valid_token() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/auth/me", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );

        let response = app
            .clone()
            .oneshot(get_request("/api/auth/me", Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.detail, "Invalid authentication credentials");

        // Well-signed token for a user that does not exist
        let orphan = TokenIssuer::new(b"router-test-secret-0123456789abcdef", chrono::Duration::days(7))
            .issue("no-such-user")
            .unwrap();
        let response = app
            .oneshot(get_request("/api/auth/me", Some(&orphan)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error: ErrorResponse = read_json(response).await;
        assert_eq!(error.detail, "User not found");
    }

    #[tokio::test]
    async fn test_health_profile_flow() {
        let app = create_test_app();
        let auth = register(&app).await;
        let token = auth.access_token.as_str();

        let response = app
            .clone()
            .oneshot(get_request("/api/profile/health", Some(token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = r#"{
            "height": 165.5,
            "weight": 58.0,
            "fitness_level": "beginner",
            "fitness_goals": ["endurance"],
            "workout_environment": "outdoor"
        }"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/profile/health", body, Some(token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved: crate::api::dto::ProfileSaveResponse = read_json(response).await;
        assert_eq!(saved.message, "Health profile created");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/profile/health", body, Some(token)))
            .await
            .unwrap();
        let saved: crate::api::dto::ProfileSaveResponse = read_json(response).await;
        assert_eq!(saved.message, "Health profile updated");

        let response = app
            .oneshot(get_request("/api/profile/health", Some(token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let profile: HealthProfile = read_json(response).await;
        assert_eq!(profile.user_id, auth.user.id);
        assert_eq!(profile.fields.height, 165.5);
        assert_eq!(profile.fields.fitness_goals, vec!["endurance"]);
    }

    #[tokio::test]
    async fn test_profile_requires_auth() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/profile/health",
                r#"{"height": 1, "weight": 1, "fitness_level": "beginner", "workout_environment": "home"}"#,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
