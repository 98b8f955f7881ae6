use tracing::debug;

use super::RestClient;
use crate::common::DatabaseError;

/// Request the REST root, which answers 200 while the service is reachable.
pub async fn check_health(client: &RestClient) -> Result<(), DatabaseError> {
    debug!("Running REST service health check");

    client
        .ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("REST health check failed: {}", e)))
}
