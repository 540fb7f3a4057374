use log_ingest::app::main_router;
use log_ingest::domain::{LogEvent, Severity};
use log_ingest::pipeline::IngestPipeline;
use log_ingest::simulator::{Device, SimulatorArgs, run};
use log_ingest::test_support::MockTransport;
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

#[tokio::test]
async fn test_simulated_devices_reach_ingest_service() {
    let transport = Arc::new(MockTransport::new());
    let app = main_router(IngestPipeline::new(transport.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let args = SimulatorArgs {
        target: format!("http://127.0.0.1:{port}/logs"),
        devices: 3,
        interval_secs: 1,
        max_start_delay_secs: Some(0),
        events_per_device: Some(1),
    };
    let accepted = run(args, CancellationToken::new()).await.unwrap();

    assert_eq!(accepted, 3);
    assert_eq!(transport.delivered_payloads().len(), 3);

    server.abort();
}

#[tokio::test]
async fn test_cancelled_simulation_sends_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let args = SimulatorArgs {
        target: format!("{}/logs", mock_server.uri()),
        devices: 2,
        interval_secs: 1,
        max_start_delay_secs: Some(5),
        events_per_device: None,
    };

    assert_eq!(run(args, shutdown).await.unwrap(), 0);
}

#[tokio::test]
async fn test_device_posts_event_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logs"))
        .and(body_partial_json(json!({
            "deviceId": 4,
            "timeStamp": 1_700_000_000_000_i64,
            "eventType": "INFORMATION",
            "eventMessage": "Device booted"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "message": "Message from device:4 successfully processed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let device = Device::new(4, reqwest::Client::new(), format!("{}/logs", mock_server.uri()));
    let event = LogEvent {
        device_id: 4,
        timestamp_ms: 1_700_000_000_000,
        severity: Severity::Information,
        message: "Device booted".into(),
    };

    let body = device.transmit(&event).await.unwrap();
    assert_eq!(body.message, "Message from device:4 successfully processed");
}

#[tokio::test]
async fn test_device_reports_rejected_event() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "ERROR",
            "message": "Request message could not be parsed: missing required field `eventMessage`"
        })))
        .mount(&mock_server)
        .await;

    let device = Device::new(5, reqwest::Client::new(), format!("{}/logs", mock_server.uri()));
    let event = LogEvent {
        device_id: 5,
        timestamp_ms: 0,
        severity: Severity::Error,
        message: String::new(),
    };

    let err = device.transmit(&event).await.unwrap_err();
    assert!(err.to_string().contains("400"), "{err}");
}
