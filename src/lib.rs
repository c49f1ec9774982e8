//! # Health Coach
//!
//! Backend and client core for a personal fitness coaching app.
//!
//! ## Features
//!
//! - **Accounts**: registration and login with bcrypt-hashed passwords
//! - **Bearer tokens**: HS256 JWTs, seven day lifetime by default
//! - **Health profiles**: one fitness profile per user, upserted as a whole
//! - **Session client**: token persistence and the startup identity check
//!
//! ## Modules
//!
//! - [`store`]: SQLite persistence for users and profiles
//! - [`auth`]: password hashing, tokens, the `AuthUser` extractor
//! - [`api`]: REST API server with Axum
//! - [`client`]: typed API client and session state
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthcoach::{build_router, AppState, ApiConfig, Store, TokenIssuer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open("healthcoach_data/healthcoach.db")?);
//!     let tokens = TokenIssuer::from_secret_or_random(Some("a-long-random-secret"), 7);
//!
//!     let router = build_router(AppState::new(store, tokens, ApiConfig::default()));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8001").await?;
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod logging;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    FitnessLevel, Gender, HealthProfile, NewUser, ProfileInput, Store, StoreError, StoreResult,
    User, WorkoutEnvironment,
};

pub use auth::{AuthError, AuthUser, Claims, TokenIssuer};

pub use api::{build_router, serve, serve_on, ApiConfig, ApiError, AppState};

pub use client::{
    ApiClient, AuthForm, AuthState, ClientConfig, ClientError, FileTokenStore, MemoryTokenStore,
    Session, TokenStore,
};

pub use config::{
    AuthConfig, Config, ConfigError, LoggingConfig, ApiConfig as ConfigApiConfig, StorageConfig,
};
