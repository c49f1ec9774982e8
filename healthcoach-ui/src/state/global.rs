//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::{self, User};

/// Main content views reachable from the nav bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Dashboard,
    Workout,
    Nutrition,
    Chat,
    Profile,
}

impl View {
    /// Nav bar order
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Workout,
        View::Nutrition,
        View::Chat,
        View::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Workout => "Workout",
            View::Nutrition => "Nutrition",
            View::Chat => "AI Coach",
            View::Profile => "Profile",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            View::Dashboard => "📊",
            View::Workout => "🏃",
            View::Nutrition => "🥗",
            View::Chat => "💬",
            View::Profile => "👤",
        }
    }
}

/// Which form the auth panel shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::Register => "Sign up",
        }
    }

    /// Register asks for name, age and gender as well
    pub fn shows_profile_fields(self) -> bool {
        self == AuthMode::Register
    }
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in user, `None` shows the auth panel
    pub user: RwSignal<Option<User>>,
    /// Selected main view
    pub current_view: RwSignal<View>,
    /// Login or register form
    pub auth_mode: RwSignal<AuthMode>,
    /// True until the startup identity check finishes
    pub checking_auth: RwSignal<bool>,
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        user: create_rw_signal(None),
        current_view: create_rw_signal(View::default()),
        auth_mode: create_rw_signal(AuthMode::default()),
        checking_auth: create_rw_signal(true),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Startup identity check.
    ///
    /// Without a stored token no request is made. With one, `/auth/me`
    /// decides: success signs the user in, any failure drops the token.
    pub fn check_auth(self) {
        if api::stored_token().is_none() {
            self.checking_auth.set(false);
            return;
        }

        spawn_local(async move {
            match api::me().await {
                Ok(user) => self.user.set(Some(user)),
                Err(e) => {
                    web_sys::console::log_1(
                        &format!("Stored token rejected ({}), signing out", e.status).into(),
                    );
                    api::clear_token();
                }
            }
            self.checking_auth.set(false);
        });
    }

    /// Persist the token and sign the user in
    pub fn sign_in(self, token: &str, user: User) {
        api::store_token(token);
        self.user.set(Some(user));
    }

    /// Drop the token, clear the user, return to the dashboard
    pub fn logout(self) {
        api::clear_token();
        self.user.set(None);
        self.current_view.set(View::Dashboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_dashboard() {
        assert_eq!(View::default(), View::Dashboard);
        assert_eq!(View::ALL[0], View::Dashboard);
    }

    #[test]
    fn test_views_have_distinct_labels() {
        let mut labels: Vec<_> = View::ALL.iter().map(|v| v.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn test_auth_mode() {
        assert_eq!(AuthMode::default(), AuthMode::Login);
        assert!(!AuthMode::Login.shows_profile_fields());
        assert!(AuthMode::Register.shows_profile_fields());
    }
}
