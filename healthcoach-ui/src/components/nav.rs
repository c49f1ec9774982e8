//! Navigation Component
//!
//! Header bar with brand, view buttons, greeting and logout.

use leptos::*;

use crate::state::{GlobalState, View};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let greeting = move || {
        state
            .user
            .with(|user| user.as_ref().map(|u| format!("Hi, {}!", u.name)))
            .unwrap_or_default()
    };

    view! {
        <nav class="bg-white shadow-lg border-b">
            <div class="max-w-7xl mx-auto px-4">
                <div class="flex justify-between items-center h-16">
                    // Brand
                    <div class="flex items-center space-x-2">
                        <span class="text-2xl">"❤️"</span>
                        <span class="text-xl font-bold text-gray-900">"AI Health Coach"</span>
                    </div>

                    // View switcher
                    <div class="hidden md:flex items-center space-x-2">
                        {View::ALL
                            .into_iter()
                            .map(|view| view! { <NavButton view=view /> })
                            .collect_view()}
                    </div>

                    <div class="flex items-center space-x-4">
                        <span class="text-gray-700">{greeting}</span>
                        <button
                            on:click=move |_| state.logout()
                            class="bg-gray-200 text-gray-700 px-4 py-2 rounded-lg hover:bg-gray-300 transition-colors"
                        >
                            "Log out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Button selecting one view, highlighted while active
#[component]
fn NavButton(view: View) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <button
            on:click=move |_| state.current_view.set(view)
            class=move || {
                let base = "flex items-center space-x-2 px-4 py-2 rounded-lg transition-colors";
                if state.current_view.get() == view {
                    format!("{} bg-indigo-100 text-indigo-700", base)
                } else {
                    format!("{} text-gray-600 hover:text-gray-900 hover:bg-gray-100", base)
                }
            }
        >
            <span>{view.icon()}</span>
            <span class="font-medium">{view.label()}</span>
        </button>
    }
}
