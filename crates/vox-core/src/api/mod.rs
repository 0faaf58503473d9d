//! HTTP gateways against the polling backend.
//!
//! One thin transport client plus two gateway surfaces (auth, polls), each a
//! direct request/response mapping with no caching, retry, or backoff.

mod auth;
mod client;
mod polls;

pub use client::ApiClient;
