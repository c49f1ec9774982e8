//! Auth Routes
//!
//! - POST /api/auth/register - Create an account, returns a token
//! - POST /api/auth/login - Exchange credentials for a token
//! - GET /api/auth/me - Identity of the bearer token's owner

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::{hash_password, verify_password, AuthUser};
use crate::store::{Gender, NewUser, StoreError, User};

const INVALID_LOGIN: &str = "Invalid email or password";

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (age, gender) = validate_register_request(&req)?;

    let cost = state.config.bcrypt_cost;
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("Hashing task failed: {}", e)))??;

    let new_user = NewUser {
        email: req.email.trim().to_string(),
        password_hash,
        name: req.name.trim().to_string(),
        age,
        gender,
    };

    let user = state.store.create_user(new_user).await.map_err(|e| match e {
        StoreError::DuplicateEmail(_) => {
            ApiError::BadRequest("Email is already registered".to_string())
        }
        other => ApiError::Store(other),
    })?;

    tracing::info!(user_id = %user.id, email = %user.email, "Registered user");

    Ok(Json(auth_response(&state, &user)?))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .store
        .find_user_by_email(req.email.trim())
        .await?
        .ok_or_else(|| ApiError::BadRequest(INVALID_LOGIN.to_string()))?;

    let hash = user.password_hash.clone();
    let password = req.password;
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Verify task failed: {}", e)))?;

    if !matches {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(ApiError::BadRequest(INVALID_LOGIN.to_string()));
    }

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

fn auth_response(state: &AppState, user: &User) -> ApiResult<AuthResponse> {
    Ok(AuthResponse {
        access_token: state.tokens.issue(&user.id)?,
        token_type: "bearer".to_string(),
        user: UserResponse::from(user),
    })
}

/// Validate a registration request, returning the typed age and gender
fn validate_register_request(req: &RegisterRequest) -> ApiResult<(u32, Gender)> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation("A valid email is required".to_string()));
    }

    if email.len() > 254 {
        return Err(ApiError::Validation(
            "Email exceeds maximum length of 254 characters".to_string(),
        ));
    }

    if req.password.is_empty() {
        return Err(ApiError::Validation("Password cannot be empty".to_string()));
    }

    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("Name cannot be empty".to_string()));
    }

    if !(1..=150).contains(&req.age) {
        return Err(ApiError::Validation(
            "Age must be between 1 and 150".to_string(),
        ));
    }

    let gender: Gender = req.gender.parse().map_err(ApiError::Validation)?;

    Ok((req.age as u32, gender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterRequest {
        RegisterRequest {
            email: "kim@example.com".to_string(),
            password: "pw".to_string(),
            name: "Kim".to_string(),
            age: 31,
            gender: "female".to_string(),
        }
    }

    #[test]
    fn test_validate_register_request() {
        let (age, gender) = validate_register_request(&valid()).unwrap();
        assert_eq!(age, 31);
        assert_eq!(gender, Gender::Female);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let bad_email = RegisterRequest {
            email: "no-at-sign".to_string(),
            ..valid()
        };
        assert!(validate_register_request(&bad_email).is_err());

        let blank_name = RegisterRequest {
            name: "   ".to_string(),
            ..valid()
        };
        assert!(validate_register_request(&blank_name).is_err());

        let negative_age = RegisterRequest { age: -3, ..valid() };
        assert!(validate_register_request(&negative_age).is_err());

        let bad_gender = RegisterRequest {
            gender: "robot".to_string(),
            ..valid()
        };
        assert!(matches!(
            validate_register_request(&bad_gender),
            Err(ApiError::Validation(_))
        ));
    }
}
