use tracing::debug;

const HEALTHY: &str = "Healthy";

/// Handler for GET /v1/health
///
/// Liveness only: storage connectivity is reported per request instead.
pub async fn health_handler() -> &'static str {
    debug!("Health check requested");
    HEALTHY
}
