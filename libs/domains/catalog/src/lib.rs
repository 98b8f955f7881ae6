//! Catalog Domain
//!
//! Read-only product and seller catalog: listings, product detail with color
//! variants, and top-selling rankings grouped by brand.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestrators: count + fetch + normalize + paginate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Store access (trait + PostgREST / PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Rows, DTOs, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, repository::InMemoryCatalogRepository, service::CatalogService};
//!
//! let repository = InMemoryCatalogRepository::new();
//! let service = CatalogService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod brand;
pub mod dto;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod join;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod rest;
pub mod service;

// Re-export commonly used types
pub use brand::BrandToken;
pub use error::{CatalogError, CatalogResult};
pub use join::Embedded;
pub use models::{
    Brand, BrandRef, ProductDetail, ProductFilter, ProductOrder, ProductRow, ProductTag,
    ProductVariant, SellerListItem, SellerRef, SimplifiedProduct, VariantRow,
};
pub use pagination::{Page, PageParams, PageRequest};
pub use postgres::PgCatalogRepository;
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use rest::RestCatalogRepository;
pub use service::{CatalogService, TopSelling};
