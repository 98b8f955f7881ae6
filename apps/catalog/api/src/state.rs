//! Application state management.
//!
//! The state holds the configuration and the connected catalog store. It is
//! cloned into the readiness router; both store handles clone cheaply.

use database::common::{retry_with_backoff, RetryConfig};
use database::postgres::DatabaseConnection;
use database::rest::RestClient;
use tracing::info;

use crate::config::{Config, StoreConfig};

/// A connected catalog store
#[derive(Clone)]
pub enum Store {
    Rest(RestClient),
    Postgres(DatabaseConnection),
}

impl Store {
    /// Connect to the configured backend, retrying with backoff until it answers.
    pub async fn connect(config: &StoreConfig) -> eyre::Result<Self> {
        match config {
            StoreConfig::Rest(rest) => {
                info!(url = %rest.url, "Connecting to hosted catalog store");
                let client = RestClient::new(rest)?;
                retry_with_backoff(
                    || database::rest::check_health(&client),
                    RetryConfig::default(),
                )
                .await
                .map_err(|e| eyre::eyre!("REST store unreachable: {}", e))?;
                Ok(Store::Rest(client))
            }
            StoreConfig::Postgres(postgres) => {
                let db = database::postgres::connect_from_config_with_retry(postgres.clone(), None)
                    .await
                    .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
                Ok(Store::Postgres(db))
            }
        }
    }

    pub async fn check_health(&self) -> Result<(), String> {
        let result = match self {
            Store::Rest(client) => database::rest::check_health(client).await,
            Store::Postgres(db) => database::postgres::check_health(db).await,
        };
        result.map_err(|e| e.to_string())
    }

    /// Release pooled connections
    pub async fn close(self) {
        match self {
            Store::Rest(_) => info!("REST client released"),
            Store::Postgres(db) => match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            },
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub store: Store,
}
