use leptos::*;

use crate::components::ComingSoon;

#[component]
pub fn Nutrition() -> impl IntoView {
    view! {
        <ComingSoon
            title="Nutrition"
            icon="🥗"
            heading="Nutrition tracking is on the way"
            message="AI-based meal analysis is coming soon!"
        />
    }
}
