//! Placeholder for views that are not built yet

use leptos::*;

#[component]
pub fn ComingSoon(
    title: &'static str,
    icon: &'static str,
    heading: &'static str,
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-gray-900">{title}</h1>
            <div class="bg-white rounded-xl shadow-md p-8 text-center">
                <div class="text-6xl mb-4 opacity-50">{icon}</div>
                <h2 class="text-xl font-semibold text-gray-700 mb-2">{heading}</h2>
                <p class="text-gray-500">{message}</p>
            </div>
        </div>
    }
}
