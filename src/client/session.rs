//! Client Session
//!
//! Authentication state of a client: restoring a persisted token on start,
//! logging in or registering, logging out.
//!
//! Invariant: while a token is stored, the API client sends it as a bearer
//! header; once it is gone, the session is anonymous.

use crate::api::dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::client::{ApiClient, ClientResult, TokenStore};

/// Who the session belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// No usable token, show login/register
    Anonymous,
    /// Token accepted by the server
    Authenticated(UserResponse),
}

impl AuthState {
    pub fn user(&self) -> Option<&UserResponse> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Credentials collected by a login or register form
#[derive(Debug, Clone)]
pub enum AuthForm {
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        name: String,
        age: i64,
        gender: String,
    },
}

/// A client's authentication session over a token store
pub struct Session<S: TokenStore> {
    client: ApiClient,
    tokens: S,
    state: AuthState,
}

impl<S: TokenStore> Session<S> {
    /// Create an anonymous session. Call [`Session::restore`] to pick up a stored token.
    pub fn new(mut client: ApiClient, tokens: S) -> Self {
        client.clear_token();
        Self {
            client,
            tokens,
            state: AuthState::Anonymous,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserResponse> {
        self.state.user()
    }

    /// The API client, carrying the bearer token when authenticated
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn token_store(&self) -> &S {
        &self.tokens
    }

    /// Startup identity check.
    ///
    /// Without a stored token no request is made. With one, `GET /auth/me`
    /// decides: success authenticates, any failure discards the token.
    pub async fn restore(&mut self) -> &AuthState {
        let token = match self.tokens.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token");
                None
            }
        };

        let Some(token) = token else {
            self.client.clear_token();
            self.state = AuthState::Anonymous;
            return &self.state;
        };

        self.client.set_token(token);

        match self.client.me().await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Restored session");
                self.state = AuthState::Authenticated(user);
            }
            Err(e) => {
                tracing::info!(error = %e, "Stored token rejected, logging out");
                self.forget_token();
                self.state = AuthState::Anonymous;
            }
        }

        &self.state
    }

    /// Submit a login or register form.
    ///
    /// On success the token is stored and attached and the session becomes
    /// authenticated. On failure the session is left as it was; show
    /// [`crate::client::ClientError::user_message`] to the user.
    pub async fn submit(&mut self, form: AuthForm) -> ClientResult<UserResponse> {
        let auth = match form {
            AuthForm::Login { email, password } => {
                self.client.login(&LoginRequest { email, password }).await?
            }
            AuthForm::Register {
                email,
                password,
                name,
                age,
                gender,
            } => {
                self.client
                    .register(&RegisterRequest {
                        email,
                        password,
                        name,
                        age,
                        gender,
                    })
                    .await?
            }
        };

        self.tokens.save(&auth.access_token)?;
        self.client.set_token(auth.access_token);

        tracing::debug!(user_id = %auth.user.id, "Authenticated");
        self.state = AuthState::Authenticated(auth.user.clone());

        Ok(auth.user)
    }

    /// Drop the token and return to the anonymous state
    pub fn logout(&mut self) {
        self.forget_token();
        self.state = AuthState::Anonymous;
    }

    fn forget_token(&mut self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!(error = %e, "Could not remove stored token");
        }
        self.client.clear_token();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientConfig, MemoryTokenStore};

    fn offline_client() -> ApiClient {
        ApiClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_ms: 2_000,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_restore_without_token_is_anonymous() {
        let mut session = Session::new(offline_client(), MemoryTokenStore::new());

        assert_eq!(session.restore().await, &AuthState::Anonymous);
        assert_eq!(session.client().token(), None);
    }

    #[tokio::test]
    async fn test_failed_identity_check_discards_token() {
        let mut session = Session::new(offline_client(), MemoryTokenStore::with_token("stale"));

        assert_eq!(session.restore().await, &AuthState::Anonymous);
        assert_eq!(session.token_store().load().unwrap(), None);
        assert_eq!(session.client().token(), None);
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_state() {
        let mut session = Session::new(offline_client(), MemoryTokenStore::new());

        let err = session
            .submit(AuthForm::Login {
                email: "a@b.c".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), crate::client::GENERIC_ERROR_MESSAGE);
        assert!(!session.state().is_authenticated());
        assert_eq!(session.token_store().load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_restore_with_emptied_store_drops_client_token() {
        let tokens = MemoryTokenStore::with_token("old");
        let mut session = Session::new(offline_client(), tokens.clone());
        session.client.set_token("old");
        session.state = AuthState::Authenticated(sample_user());

        // Token removed behind the session's back
        tokens.clear().unwrap();

        assert_eq!(session.restore().await, &AuthState::Anonymous);
        assert_eq!(session.client().token(), None);
    }

    fn sample_user() -> UserResponse {
        UserResponse {
            id: "u-1".to_string(),
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            age: 30,
            gender: crate::store::Gender::Male,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_logout_clears_token() {
        let mut session = Session::new(offline_client(), MemoryTokenStore::with_token("t"));
        session.client.set_token("t");

        session.logout();

        assert_eq!(session.state(), &AuthState::Anonymous);
        assert_eq!(session.client().token(), None);
        assert_eq!(session.token_store().load().unwrap(), None);
    }
}
