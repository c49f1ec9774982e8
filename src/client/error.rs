//! Client error types

use thiserror::Error;

/// Shown when a failure carries no server-provided message
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Errors from talking to the Health Coach API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failed, timed out, or the request could not be built
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: u16,
        detail: Option<String>,
    },

    /// Server answered 2xx but the body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Reading or writing the persisted token failed
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ClientError {
    /// The single message shown to a user: the server's `detail` when there
    /// is one, the generic message otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ClientError::Api {
            status: 400,
            detail: Some("Invalid email or password".to_string()),
        };
        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ClientError::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let err = ClientError::Decode("eof".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }
}
