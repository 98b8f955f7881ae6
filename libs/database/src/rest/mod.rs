//! Hosted PostgreSQL over PostgREST
//!
//! The service exposes each table at `{url}/rest/v1/{table}` and accepts
//! filters as query parameters (`active=eq.true`), exact counts through the
//! `Prefer: count=exact` header, and embedded one-to-one relations in the
//! `select` projection.

mod client;
mod config;
mod health;

pub use client::{RestClient, RestQuery, parse_content_range};
pub use config::RestConfig;
pub use health::check_health;
