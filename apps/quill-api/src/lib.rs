//! # Quill API Server
//!
//! Actix-web HTTP layer: configuration, shared state, the identity
//! extractor, error-to-envelope mapping, and the route handlers.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
