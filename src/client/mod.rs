//! Health Coach Client
//!
//! Native client for the Health Coach API, used by the CLI and tests.
//!
//! - [`ApiClient`]: typed REST calls, bearer header when a token is set
//! - [`TokenStore`]: where the token lives between runs
//! - [`Session`]: restore / submit / logout over both
//!
//! # Example
//!
//! ```rust,no_run
//! use healthcoach::client::{ApiClient, AuthForm, ClientConfig, FileTokenStore, Session};
//!
//! # async fn demo() -> Result<(), healthcoach::client::ClientError> {
//! let client = ApiClient::new(ClientConfig::new("http://localhost:8001/api"))?;
//! let mut session = Session::new(client, FileTokenStore::default_location());
//!
//! if !session.restore().await.is_authenticated() {
//!     session
//!         .submit(AuthForm::Login {
//!             email: "kim@example.com".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//! }
//! println!("hello {}", session.user().map(|u| u.name.as_str()).unwrap_or("?"));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod session;
pub mod token_store;

pub use api::{ApiClient, ClientConfig, DEFAULT_API_BASE};
pub use error::{ClientError, ClientResult, GENERIC_ERROR_MESSAGE};
pub use session::{AuthForm, AuthState, Session};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
