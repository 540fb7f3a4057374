//! `LogEvent` → canonical binary record.

use prost::Message;
use prost_types::Timestamp;

use crate::domain::{EventType, LogEvent, SensorLogMessage, Severity};

const MILLIS_PER_SECOND: i64 = 1_000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// Map a `LogEvent` to its canonical record.
///
/// Timestamps are split with floor semantics so that `nanos` always lands
/// in `[0, 999_999_999]`, including for pre-epoch events.
pub fn encode(event: &LogEvent) -> SensorLogMessage {
    SensorLogMessage {
        sensor_id: event.device_id,
        time_stamp: Some(split_millis(event.timestamp_ms)),
        event_type: event_type(event.severity) as i32,
        event_message: event.message.clone(),
    }
}

/// Encode and serialize in one step. Identical events produce identical bytes.
pub fn encode_to_vec(event: &LogEvent) -> Vec<u8> {
    encode(event).encode_to_vec()
}

pub fn split_millis(timestamp_ms: i64) -> Timestamp {
    let seconds = timestamp_ms.div_euclid(MILLIS_PER_SECOND);
    // rem_euclid is in [0, 999], so the product always fits in i32
    let nanos = (timestamp_ms.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLI) as i32;
    Timestamp { seconds, nanos }
}

pub fn event_type(severity: Severity) -> EventType {
    match severity {
        Severity::Error => EventType::Error,
        Severity::Information => EventType::Information,
        Severity::Warning => EventType::Warning,
    }
}
