//! Custom extractors for Axum handlers.
//!
//! Rejections from these extractors render through [`crate::AppError`], so
//! malformed input produces the same error envelope as handler failures.

pub mod query;
pub mod uuid_path;

pub use query::ValidatedQuery;
pub use uuid_path::UuidPath;
