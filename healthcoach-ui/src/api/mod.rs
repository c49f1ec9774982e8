//! API Layer
//!
//! HTTP access to the Health Coach REST API and the locally stored token.

pub mod client;

pub use client::*;
