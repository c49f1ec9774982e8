//! Auth Panel Component
//!
//! Login and registration form shown while nobody is signed in.

use leptos::*;

use crate::api;
use crate::components::InlineLoading;
use crate::state::{AuthFormData, AuthMode, AuthSubmission, GlobalState};

const INPUT_CLASS: &str = "w-full px-4 py-3 border border-gray-300 rounded-lg \
                           focus:ring-2 focus:ring-indigo-500 focus:border-transparent";

/// Login/register panel
#[component]
pub fn AuthPanel() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let form = create_rw_signal(AuthFormData::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);

        let mode = state.auth_mode.get_untracked();
        let submission = match form.with_untracked(|f| f.submission(mode)) {
            Ok(submission) => submission,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };

        set_submitting.set(true);

        spawn_local(async move {
            let result = match submission {
                AuthSubmission::Login(req) => api::login(&req).await,
                AuthSubmission::Register(req) => api::register(&req).await,
            };

            // Cleared before sign-in unmounts this panel
            set_submitting.set(false);

            match result {
                Ok(auth) => state.sign_in(&auth.access_token, auth.user),
                Err(failure) => set_error.set(Some(failure.message)),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-gradient-to-br from-blue-50 to-indigo-100 flex items-center justify-center px-4">
            <div class="max-w-md w-full">
                <div class="bg-white rounded-xl shadow-lg p-8">
                    <div class="text-center mb-8">
                        <div class="text-5xl mb-4">"❤️"</div>
                        <h1 class="text-2xl font-bold text-gray-900">"AI Health Coach"</h1>
                        <p class="text-gray-600 mt-2">"Your own AI personal trainer"</p>
                    </div>

                    // Mode toggle
                    <div class="flex mb-6 bg-gray-100 rounded-lg">
                        <ModeButton mode=AuthMode::Login />
                        <ModeButton mode=AuthMode::Register />
                    </div>

                    <form on:submit=on_submit class="space-y-4">
                        <input
                            type="email"
                            placeholder="Email"
                            required
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                            class=INPUT_CLASS
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            required
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                            class=INPUT_CLASS
                        />

                        {move || {
                            if state.auth_mode.get().shows_profile_fields() {
                                view! { <RegisterFields form=form /> }.into_view()
                            } else {
                                view! {}.into_view()
                            }
                        }}

                        {move || error.get().map(|message| view! {
                            <div class="bg-red-50 text-red-600 p-3 rounded-lg text-sm">{message}</div>
                        })}

                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full bg-indigo-600 text-white py-3 rounded-lg font-medium
                                   hover:bg-indigo-700 transition-colors disabled:opacity-50
                                   flex items-center justify-center space-x-2"
                        >
                            {move || if submitting.get() {
                                view! {
                                    <InlineLoading />
                                    <span>"Working..."</span>
                                }.into_view()
                            } else {
                                view! {
                                    <span>{state.auth_mode.get().label()}</span>
                                }.into_view()
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ModeButton(mode: AuthMode) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <button
            type="button"
            on:click=move |_| state.auth_mode.set(mode)
            class=move || {
                let base = "flex-1 py-2 px-4 rounded-lg font-medium transition-colors";
                if state.auth_mode.get() == mode {
                    format!("{} bg-indigo-600 text-white", base)
                } else {
                    format!("{} text-gray-600", base)
                }
            }
        >
            {mode.label()}
        </button>
    }
}

/// Name, age and gender, register only
#[component]
fn RegisterFields(form: RwSignal<AuthFormData>) -> impl IntoView {
    view! {
        <input
            type="text"
            placeholder="Name"
            required
            prop:value=move || form.with(|f| f.name.clone())
            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
            class=INPUT_CLASS
        />
        <div class="flex space-x-4">
            <input
                type="number"
                placeholder="Age"
                required
                prop:value=move || form.with(|f| f.age.clone())
                on:input=move |ev| form.update(|f| f.age = event_target_value(&ev))
                class=format!("flex-1 {}", INPUT_CLASS)
            />
            <select
                prop:value=move || form.with(|f| f.gender.clone())
                on:change=move |ev| form.update(|f| f.gender = event_target_value(&ev))
                class=format!("flex-1 {}", INPUT_CLASS)
            >
                <option value="male">"Male"</option>
                <option value="female">"Female"</option>
            </select>
        </div>
    }
}
