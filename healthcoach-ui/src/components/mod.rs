//! UI Components
//!
//! Reusable Leptos components for the app shell and views.

pub mod auth_panel;
pub mod coming_soon;
pub mod loading;
pub mod nav;
pub mod stat_card;

pub use auth_panel::AuthPanel;
pub use coming_soon::ComingSoon;
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use stat_card::StatCard;
