use log_ingest::error::IngestError;

#[tokio::main]
async fn main() -> Result<(), IngestError> {
    log_ingest::app::run().await
}
