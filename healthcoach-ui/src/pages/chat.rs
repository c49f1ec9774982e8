use leptos::*;

use crate::components::ComingSoon;

#[component]
pub fn Chat() -> impl IntoView {
    view! {
        <ComingSoon
            title="AI Coach"
            icon="💬"
            heading="Your AI coach is getting ready"
            message="Soon you can talk to a 24/7 AI personal trainer!"
        />
    }
}
