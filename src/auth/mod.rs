//! Authentication
//!
//! - [`password`]: bcrypt hashing
//! - [`token`]: JWT issue/verify
//! - [`extractor`]: `AuthUser`, the axum extractor guarding protected routes

pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use error::{AuthError, AuthResult};
pub use extractor::AuthUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer, DEFAULT_TOKEN_EXPIRY_DAYS};
