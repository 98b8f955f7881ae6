use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Brand not found: {0}")]
    BrandNotFound(String),

    /// The store failed a count or data query
    #[error("Upstream query failed: {0}")]
    Upstream(String),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<DatabaseError> for CatalogError {
    fn from(err: DatabaseError) -> Self {
        CatalogError::Upstream(err.to_string())
    }
}

impl From<DbErr> for CatalogError {
    fn from(err: DbErr) -> Self {
        DatabaseError::from(err).into()
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::BrandNotFound(name) => {
                AppError::NotFound(format!("Brand '{}' not found", name))
            }
            CatalogError::Upstream(detail) => AppError::Upstream(detail),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
