use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};

// Import database configs from the database library
use database::postgres::PostgresConfig;
use database::rest::RestConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Which backend serves the catalog
#[derive(Clone, Debug)]
pub enum StoreConfig {
    /// Hosted database over PostgREST, selected when `SUPABASE_URL` is set
    Rest(RestConfig),
    /// Direct PostgreSQL through `DATABASE_URL`
    Postgres(PostgresConfig),
}

impl FromEnv for StoreConfig {
    fn from_env() -> Result<Self, core_config::ConfigError> {
        if std::env::var_os("SUPABASE_URL").is_some() {
            Ok(StoreConfig::Rest(RestConfig::from_env()?))
        } else {
            Ok(StoreConfig::Postgres(PostgresConfig::from_env()?))
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let store = StoreConfig::from_env()?; // Requires SUPABASE_URL + SUPABASE_KEY or DATABASE_URL
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            store,
            server,
            environment,
        })
    }
}
