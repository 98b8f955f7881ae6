//! Database library providing connectors for the catalog's backing store
//!
//! Two backends are supported:
//!
//! - `postgres` (default) - direct PostgreSQL access through SeaORM
//! - `rest` (default) - a hosted PostgreSQL service exposed over PostgREST
//! - `config` - `core_config::FromEnv` implementations for both configs
//! - `all` - every feature
//!
//! # Examples
//!
//! ## PostgreSQL
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config(PostgresConfig::new("postgresql://localhost/shop")).await?;
//! postgres::check_health(&db).await?;
//! ```
//!
//! ## Hosted REST service
//!
//! ```ignore
//! use database::rest::{RestClient, RestConfig};
//!
//! let client = RestClient::new(&RestConfig::new("https://xyz.supabase.co", "anon-key"))?;
//! let total = client.from("products").eq("active", true).count().await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "rest")]
pub mod rest;

pub use common::DatabaseError;
