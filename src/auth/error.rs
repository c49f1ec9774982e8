//! Authentication error types

use thiserror::Error;

/// Errors from password hashing and token handling
#[derive(Error, Debug)]
pub enum AuthError {
    /// bcrypt failed to hash or verify
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token could not be signed
    #[error("Token encoding error: {0}")]
    Encode(String),

    /// Token is malformed, has a bad signature, or is missing claims
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token signature is fine but `exp` is in the past
    #[error("Token expired")]
    Expired,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::InvalidToken(err.to_string()),
        }
    }
}

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;
