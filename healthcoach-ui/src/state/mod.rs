//! State Management
//!
//! Global application state and the auth form model.

pub mod form;
pub mod global;

pub use form::{AuthFormData, AuthSubmission};
pub use global::{provide_global_state, AuthMode, GlobalState, View};
