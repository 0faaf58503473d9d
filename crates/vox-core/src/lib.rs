//! Core client plumbing for Vox: configuration, session storage, and the
//! HTTP gateways against the polling backend.

pub mod api;
pub mod config;
pub mod session;
