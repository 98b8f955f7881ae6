use axum::Router;
use domain_catalog::{handlers, CatalogService, PgCatalogRepository, RestCatalogRepository};

use crate::state::{AppState, Store};

pub fn router(state: &AppState) -> Router {
    match &state.store {
        Store::Rest(client) => {
            let repository = RestCatalogRepository::new(client.clone());
            handlers::router(CatalogService::new(repository))
        }
        Store::Postgres(db) => {
            let repository = PgCatalogRepository::new(db.clone());
            handlers::router(CatalogService::new(repository))
        }
    }
}
