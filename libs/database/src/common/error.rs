/// Unified error type for every backend
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// PostgreSQL errors (SeaORM)
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Transport-level failure talking to the REST service
    #[cfg(feature = "rest")]
    #[error("REST transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The REST service answered with a non-success status
    #[error("REST service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A response could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
