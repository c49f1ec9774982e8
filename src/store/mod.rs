//! Health Coach Store
//!
//! SQLite persistence for user accounts and health profiles.
//!
//! # Tables
//!
//! - `users`: one row per account, unique email
//! - `health_profiles`: at most one row per user, upserted as a whole
//!
//! # Example
//!
//! ```rust,no_run
//! use healthcoach::store::{Gender, NewUser, Store};
//!
//! # async fn demo() -> Result<(), healthcoach::store::StoreError> {
//! let store = Store::open("healthcoach_data/healthcoach.db")?;
//! let user = store
//!     .create_user(NewUser {
//!         email: "kim@example.com".into(),
//!         password_hash: "$2b$12$...".into(),
//!         name: "Kim".into(),
//!         age: 31,
//!         gender: Gender::Female,
//!     })
//!     .await?;
//! println!("registered {}", user.id);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod error;
pub mod types;

pub use db::Store;
pub use error::{StoreError, StoreResult};
pub use types::{
    FitnessLevel, Gender, HealthProfile, NewUser, ProfileInput, UpsertAction, User,
    WorkoutEnvironment,
};
