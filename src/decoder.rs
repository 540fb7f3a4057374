//! Request body → `LogEvent`.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{LogEvent, Severity};
use crate::error::DecodeError;

/// Loosely-typed view of the request body; every field is optional so that
/// missing and `null` values can be reported by name.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawLogEvent {
    device_id: Option<i32>,
    time_stamp: Option<i64>,
    event_type: Option<String>,
    event_message: Option<String>,
}

/// Decode a raw request body into a validated `LogEvent`.
///
/// `None`, empty and whitespace-only bodies (and a bare JSON `null`) are
/// reported as [`DecodeError::EmptyBody`]. Event types are matched
/// case-sensitively and unknown values are rejected.
pub fn decode(raw_body: Option<&[u8]>) -> Result<LogEvent, DecodeError> {
    let body = match raw_body {
        Some(body) if !body.trim_ascii().is_empty() => body,
        _ => return Err(DecodeError::EmptyBody),
    };

    let value: Value = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Request body is not valid JSON");
        DecodeError::Malformed(e.to_string())
    })?;

    let raw = match value {
        Value::Null => return Err(DecodeError::EmptyBody),
        Value::Object(_) => RawLogEvent::deserialize(value).map_err(|e| {
            debug!(error = %e, "Request body is not a valid log event");
            DecodeError::Malformed(e.to_string())
        })?,
        _ => return Err(DecodeError::Malformed("expected a JSON object".into())),
    };

    let device_id = raw.device_id.ok_or(DecodeError::MissingField("deviceId"))?;
    let timestamp_ms = raw.time_stamp.ok_or(DecodeError::MissingField("timeStamp"))?;
    let event_type = raw
        .event_type
        .ok_or(DecodeError::MissingField("eventType"))?;
    let message = raw
        .event_message
        .ok_or(DecodeError::MissingField("eventMessage"))?;

    let severity =
        Severity::from_literal(&event_type).ok_or(DecodeError::UnknownSeverity(event_type))?;

    Ok(LogEvent {
        device_id,
        timestamp_ms,
        severity,
        message,
    })
}
