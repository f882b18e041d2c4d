//! VideoHub HTTP API.
//!
//! Exposed as a library so integration tests can build the router against
//! their own database pool and storage backend.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
