//! # Callback API Module
//!
//! Handlers for the short-lived local HTTP server that receives the OAuth
//! redirect during `collagefm auth`. Two routes only: the `/callback`
//! redirect target and a `/health` probe.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
