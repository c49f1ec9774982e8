//! Dashboard Page
//!
//! Today's figures and shortcuts into the other views.

use leptos::*;

use crate::components::StatCard;
use crate::state::{GlobalState, View};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let today = chrono::Local::now().format("%B %-d, %Y").to_string();

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold text-gray-900">"Dashboard"</h1>
                <div class="text-sm text-gray-500">{today}</div>
            </div>

            // Tracking is not wired up yet, figures are starting values
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                <StatCard icon="🏃" title="Today's workout" value="0 min" subtitle="Goal: 60 min" tint="bg-blue-50" />
                <StatCard icon="🔥" title="Calories" value="0 kcal" subtitle="Goal: 2000 kcal" tint="bg-green-50" />
                <StatCard icon="⚖️" title="Weight" value="-" subtitle="Set a goal" tint="bg-purple-50" />
                <StatCard icon="📈" title="Progress" value="0%" subtitle="This week" tint="bg-orange-50" />
            </div>

            <section class="bg-white rounded-xl shadow-md p-6">
                <h2 class="text-xl font-semibold mb-4">"Get started"</h2>
                <div class="space-y-4">
                    <QuickAction
                        icon="👤"
                        label="Set up your health profile"
                        button="Set up"
                        color="bg-indigo-600 hover:bg-indigo-700"
                        target=View::Profile
                    />
                    <QuickAction
                        icon="🎯"
                        label="Plan your first workout"
                        button="Start"
                        color="bg-green-600 hover:bg-green-700"
                        target=View::Workout
                    />
                    <QuickAction
                        icon="💬"
                        label="Talk to your AI coach"
                        button="Chat"
                        color="bg-blue-600 hover:bg-blue-700"
                        target=View::Chat
                    />
                </div>
            </section>
        </div>
    }
}

/// Shortcut row switching to another view
#[component]
fn QuickAction(
    icon: &'static str,
    label: &'static str,
    button: &'static str,
    color: &'static str,
    target: View,
) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="flex items-center justify-between p-4 bg-gray-50 rounded-lg">
            <div class="flex items-center space-x-3">
                <span class="text-2xl">{icon}</span>
                <span class="font-medium">{label}</span>
            </div>
            <button
                on:click=move |_| state.current_view.set(target)
                class=format!("text-white px-4 py-2 rounded-lg transition-colors {}", color)
            >
                {button}
            </button>
        </div>
    }
}
