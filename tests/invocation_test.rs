use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log_ingest::domain::SensorLogMessage;
use log_ingest::invocation::{handle_invocation, run_invocation};
use log_ingest::pipeline::IngestPipeline;
use log_ingest::response::{GatewayResponse, ResponseBody, ResponseStatus};
use log_ingest::test_support::MockTransport;
use prost::Message;
use serde_json::json;
use std::sync::Arc;

const EVENT_BODY: &str =
    r#"{"deviceId":12,"timeStamp":1700000000123,"eventType":"WARNING","eventMessage":"fan speed low"}"#;

fn pipeline_with(transport: &Arc<MockTransport>) -> IngestPipeline {
    IngestPipeline::new(transport.clone())
}

fn body_of(response: &GatewayResponse) -> ResponseBody {
    serde_json::from_str(&response.body).unwrap()
}

#[tokio::test]
async fn test_invocation_delivers_plain_body() {
    let transport = Arc::new(MockTransport::new());
    let pipeline = pipeline_with(&transport);
    let event = json!({ "body": EVENT_BODY, "isBase64Encoded": false }).to_string();

    let response = handle_invocation(event.as_bytes(), &pipeline).await;

    assert_eq!(response.status_code, 200);
    assert!(!response.is_base64_encoded);
    let body = body_of(&response);
    assert_eq!(body.status, ResponseStatus::Success);
    assert_eq!(body.message, "Message from device:12 successfully processed");

    let payloads = transport.delivered_payloads();
    assert_eq!(payloads.len(), 1);
    let record = SensorLogMessage::decode(payloads[0].clone()).unwrap();
    let ts = record.time_stamp.as_ref().unwrap();
    assert_eq!((ts.seconds, ts.nanos), (1_700_000_000, 123_000_000));
    assert_eq!(record.event_message, "fan speed low");
}

#[tokio::test]
async fn test_invocation_accepts_base64_body() {
    let transport = Arc::new(MockTransport::new());
    let pipeline = pipeline_with(&transport);
    let event = json!({ "body": STANDARD.encode(EVENT_BODY), "isBase64Encoded": true }).to_string();

    let response = handle_invocation(event.as_bytes(), &pipeline).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(transport.delivered_payloads().len(), 1);
}

#[tokio::test]
async fn test_invocation_without_body_is_rejected() {
    let transport = Arc::new(MockTransport::new());
    let pipeline = pipeline_with(&transport);

    for event in [json!({}), json!({ "body": null }), json!({ "body": "" })] {
        let response = handle_invocation(event.to_string().as_bytes(), &pipeline).await;

        assert_eq!(response.status_code, 400, "event: {event}");
        let body = body_of(&response);
        assert_eq!(body.status, ResponseStatus::Error);
        assert_eq!(body.message, "There was no body provided with the request");
    }
    assert_eq!(transport.attempts(), 0);
}

#[tokio::test]
async fn test_invocation_rejects_unparseable_event() {
    let transport = Arc::new(MockTransport::new());
    let pipeline = pipeline_with(&transport);

    let response = handle_invocation(b"not an event", &pipeline).await;

    assert_eq!(response.status_code, 400);
    assert!(
        body_of(&response)
            .message
            .starts_with("Request message could not be parsed")
    );
    assert_eq!(transport.attempts(), 0);
}

#[tokio::test]
async fn test_run_invocation_reads_event_and_writes_response() {
    let transport = Arc::new(MockTransport::new());
    let pipeline = pipeline_with(&transport);
    let event = json!({ "body": EVENT_BODY }).to_string();
    let mut output = Vec::new();

    let response = run_invocation(event.as_bytes(), &mut output, &pipeline)
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    let written: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(written["statusCode"], 200);
    assert_eq!(written["isBase64Encoded"], false);
    assert!(written["body"].as_str().unwrap().contains("SUCCESS"));
}
