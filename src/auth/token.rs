//! JWT access tokens
//!
//! HS256 tokens carrying the user id as `sub` and an `exp` timestamp.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, AuthResult};

/// Default token lifetime
pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims embedded in every access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiry as a unix timestamp (seconds)
    pub exp: i64,
}

/// Signs and verifies access tokens with a shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer from a secret and token lifetime
    pub fn new(secret: &[u8], expiry: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            expiry,
        }
    }

    /// Create an issuer from an optional configured secret.
    ///
    /// Without a secret a random one is generated, so tokens do not
    /// survive a restart.
    pub fn from_secret_or_random(secret: Option<&str>, expiry_days: i64) -> Self {
        let secret = match secret {
            Some(s) if !s.is_empty() => {
                if s.len() < 32 {
                    tracing::warn!("JWT secret is shorter than 32 characters");
                }
                s.as_bytes().to_vec()
            }
            _ => {
                tracing::warn!(
                    "No JWT secret configured, generating a random one. Tokens won't persist across restarts."
                );
                let mut rng = rand::thread_rng();
                (0..64).map(|_| rng.gen::<u8>()).collect()
            }
        };

        Self::new(&secret, Duration::days(expiry_days))
    }

    /// Token lifetime
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Issue a token for a user id
    pub fn issue(&self, user_id: &str) -> AuthResult<String> {
        let exp = (Utc::now() + self.expiry).timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Encode(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_string()));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret-that-is-long-enough-32b", Duration::days(7))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let token = issuer.issue("user-123").unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.sub, "user-123");
        let six_days = (Utc::now() + Duration::days(6)).timestamp();
        assert!(claims.exp > six_days);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer().issue("user-123").unwrap();
        let other = TokenIssuer::new(b"a-completely-different-secret-value", Duration::days(7));

        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let expired = TokenIssuer::new(b"test-secret-that-is-long-enough-32b", Duration::hours(-2));
        let token = expired.issue("user-123").unwrap();

        assert!(matches!(issuer().verify(&token), Err(AuthError::Expired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(issuer().verify("not.a.jwt").is_err());
    }

    #[test]
    fn test_random_secret_issuers_disagree() {
        let a = TokenIssuer::from_secret_or_random(None, 7);
        let b = TokenIssuer::from_secret_or_random(None, 7);
        let token = a.issue("u").unwrap();

        assert!(a.verify(&token).is_ok());
        assert!(b.verify(&token).is_err());
    }
}
