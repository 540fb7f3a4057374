use crate::handler::health::health_handler;
use crate::handler::ingest::ingest_handler;
use crate::pipeline::IngestPipeline;
use axum::Router;
use axum::routing::{get, post};

/// Build the service router (health + log ingest).
pub fn main_router(pipeline: IngestPipeline) -> Router {
    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let logs_router = Router::new()
        .route("/logs", post(ingest_handler))
        .with_state(pipeline);

    Router::new().merge(v1_health_router).merge(logs_router)
}
