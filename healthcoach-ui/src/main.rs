//! AI Health Coach
//!
//! Single-page client for the Health Coach API, built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration
//! - Persisted bearer token with a startup identity check
//! - Dashboard, workout, nutrition, coach chat and profile views
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Views are switched through global state rather than URL routes.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
