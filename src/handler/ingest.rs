use crate::pipeline::IngestPipeline;
use crate::response::ResponseBody;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::info;

/// Handler for POST /logs
///
/// Always answers with `{"status", "message"}`; the HTTP status mirrors the
/// pipeline outcome, including delivery failures.
pub async fn ingest_handler(
    State(pipeline): State<IngestPipeline>,
    body: Bytes,
) -> impl IntoResponse {
    info!("POST request received at '/logs' with body length: {}", body.len());

    let response = pipeline.process(Some(&body)).await;

    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json::<ResponseBody>(response.body()))
}
