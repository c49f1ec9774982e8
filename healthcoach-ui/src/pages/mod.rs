//! Pages
//!
//! One component per main view.

pub mod chat;
pub mod dashboard;
pub mod nutrition;
pub mod profile;
pub mod workout;

pub use chat::Chat;
pub use dashboard::Dashboard;
pub use nutrition::Nutrition;
pub use profile::Profile;
pub use workout::Workout;
