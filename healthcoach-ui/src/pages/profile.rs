//! Profile Page
//!
//! Account details and the saved health profile.

use leptos::*;

use crate::api::{self, HealthProfile};
use crate::components::Loading;
use crate::state::GlobalState;

/// Profile page component
#[component]
pub fn Profile() -> impl IntoView {
    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold text-gray-900">"Profile"</h1>
            <AccountInfo />
            <HealthProfileSection />
        </div>
    }
}

#[component]
fn AccountInfo() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <section class="bg-white rounded-xl shadow-md p-6">
            <h2 class="text-xl font-semibold mb-6">"Account"</h2>
            {move || state.user.get().map(|user| {
                let gender = match user.gender.as_str() {
                    "female" => "Female",
                    _ => "Male",
                };
                let joined = chrono::DateTime::parse_from_rfc3339(&user.created_at)
                    .map(|dt| dt.format("%B %-d, %Y").to_string())
                    .unwrap_or_else(|_| user.created_at.clone());
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                        <Field label="Name" value=user.name />
                        <Field label="Email" value=user.email />
                        <Field label="Age" value=format!("{} years", user.age) />
                        <Field label="Gender" value=gender />
                        <Field label="Member since" value=joined />
                    </div>
                }
            })}
        </section>
    }
}

#[derive(Clone, PartialEq)]
enum ProfileLoad {
    Loading,
    Missing,
    Loaded(HealthProfile),
    Failed(String),
}

#[component]
fn HealthProfileSection() -> impl IntoView {
    let (status, set_status) = create_signal(ProfileLoad::Loading);

    // Fetch once on mount
    create_effect(move |_| {
        spawn_local(async move {
            let next = match api::fetch_health_profile().await {
                Ok(Some(profile)) => ProfileLoad::Loaded(profile),
                Ok(None) => ProfileLoad::Missing,
                Err(e) => ProfileLoad::Failed(e.message),
            };
            set_status.set(next);
        });
    });

    view! {
        <section class="bg-white rounded-xl shadow-md p-6">
            <h2 class="text-xl font-semibold mb-4">"Health profile"</h2>
            {move || match status.get() {
                ProfileLoad::Loading => view! { <Loading /> }.into_view(),
                ProfileLoad::Missing => view! {
                    <div class="text-center py-8">
                        <div class="text-6xl mb-4 opacity-50">"👤"</div>
                        <p class="text-gray-500">
                            "Set up a health profile to get coaching tailored to you"
                        </p>
                    </div>
                }.into_view(),
                ProfileLoad::Failed(message) => view! {
                    <div class="bg-red-50 text-red-600 p-3 rounded-lg text-sm">{message}</div>
                }.into_view(),
                ProfileLoad::Loaded(profile) => view! { <ProfileDetails profile=profile /> }.into_view(),
            }}
        </section>
    }
}

#[component]
fn ProfileDetails(profile: HealthProfile) -> impl IntoView {
    let bmi = profile
        .bmi()
        .map(|b| format!("{:.1}", b))
        .unwrap_or_else(|| "-".to_string());
    let body_fat = profile
        .body_fat_percentage
        .map(|b| format!("{:.1} %", b))
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <Field label="Height" value=format!("{:.1} cm", profile.height) />
            <Field label="Weight" value=format!("{:.1} kg", profile.weight) />
            <Field label="BMI" value=bmi />
            <Field label="Body fat" value=body_fat />
            <Field label="Fitness level" value=profile.fitness_level.clone() />
            <Field label="Environment" value=profile.workout_environment.clone() />
        </div>
        <div class="grid grid-cols-1 md:grid-cols-2 gap-6 mt-6">
            <ListField label="Goals" items=profile.fitness_goals.clone() />
            <ListField label="Preferred exercises" items=profile.preferred_exercises.clone() />
            <ListField label="Exercises to avoid" items=profile.avoid_exercises.clone() />
            <ListField label="Equipment" items=profile.available_equipment.clone() />
            <ListField label="Health conditions" items=profile.health_conditions.clone() />
            <ListField label="Medications" items=profile.medications.clone() />
        </div>
    }
}

#[component]
fn Field(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-gray-700 mb-2">{label}</label>
            <div class="bg-gray-50 p-3 rounded-lg">{value}</div>
        </div>
    }
}

#[component]
fn ListField(label: &'static str, items: Vec<String>) -> impl IntoView {
    let text = if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    };

    view! { <Field label=label value=text /> }
}
