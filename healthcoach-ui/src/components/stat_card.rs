//! Stat Card Component

use leptos::*;

/// Single figure with an icon and a caption
#[component]
pub fn StatCard(
    icon: &'static str,
    title: &'static str,
    #[prop(into)]
    value: String,
    #[prop(into)]
    subtitle: String,
    /// Tailwind background class for the icon badge
    #[prop(default = "bg-indigo-50")]
    tint: &'static str,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-md p-6">
            <div class=format!("inline-flex p-3 rounded-lg text-2xl mb-4 {}", tint)>
                {icon}
            </div>
            <div class="space-y-2">
                <p class="text-sm font-medium text-gray-600">{title}</p>
                <p class="text-2xl font-bold text-gray-900">{value}</p>
                <p class="text-xs text-gray-500">{subtitle}</p>
            </div>
        </div>
    }
}
