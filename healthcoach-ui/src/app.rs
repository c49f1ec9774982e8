//! App Root Component
//!
//! Global providers, the startup auth check, and view switching.

use leptos::*;

use crate::components::{AuthPanel, Loading, Nav};
use crate::pages::{Chat, Dashboard, Nutrition, Profile, Workout};
use crate::state::{provide_global_state, GlobalState, View};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Identity check against the stored token, once on mount
    state.check_auth();

    move || {
        if state.checking_auth.get() {
            view! { <Loading /> }.into_view()
        } else if state.user.with(Option::is_none) {
            view! { <AuthPanel /> }.into_view()
        } else {
            view! { <Shell /> }.into_view()
        }
    }
}

/// Signed-in layout: nav bar over the selected view
#[component]
fn Shell() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="min-h-screen bg-gray-50">
            <Nav />
            <main class="max-w-7xl mx-auto px-4 py-8">
                {move || match state.current_view.get() {
                    View::Dashboard => view! { <Dashboard /> }.into_view(),
                    View::Workout => view! { <Workout /> }.into_view(),
                    View::Nutrition => view! { <Nutrition /> }.into_view(),
                    View::Chat => view! { <Chat /> }.into_view(),
                    View::Profile => view! { <Profile /> }.into_view(),
                }}
            </main>
        </div>
    }
}
