use leptos::*;

use crate::components::ComingSoon;

#[component]
pub fn Workout() -> impl IntoView {
    view! {
        <ComingSoon
            title="Workout"
            icon="🏃"
            heading="Workouts are on the way"
            message="Personalised workout routines are coming soon!"
        />
    }
}
