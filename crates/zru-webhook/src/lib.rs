//! ZRU webhook receiver: verifies notification signatures at the HTTP edge.
//!
//! Notifications whose signature does not match the account secret are
//! rejected with 401 before anything else looks at them. Verified ones are
//! acknowledged with a short classification so the platform sees a 200.
//!
//! # Modules
//!
//! - [`config`]: Environment configuration ([`WebhookConfig`](config::WebhookConfig))
//! - [`routes`]: HTTP endpoints (health, metrics, notifications)
//! - [`state`]: Shared [`AppState`](state::AppState)
//! - [`error`]: Rejection responses
//! - [`metrics`]: Prometheus counters for intake and signature failures

pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod state;
