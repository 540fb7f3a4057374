//! Random device events.

use crate::domain::{LogEvent, Severity};
use rand::Rng;
use rand::seq::IndexedRandom;

const ERROR_MESSAGES: &[&str] = &[
    "Sensor read failure",
    "Storage write failed: disk full",
    "Cellular modem not responding",
];

const INFORMATION_MESSAGES: &[&str] = &[
    "Device boot complete",
    "Firmware update check finished",
    "Scheduled measurement recorded",
];

const WARNING_MESSAGES: &[&str] = &[
    "Battery level below 20%",
    "Signal strength degraded",
    "Internal temperature above threshold",
];

pub fn sample_messages(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::Error => ERROR_MESSAGES,
        Severity::Information => INFORMATION_MESSAGES,
        Severity::Warning => WARNING_MESSAGES,
    }
}

/// Pick a random severity and a matching sample message.
pub fn random_event<R: Rng + ?Sized>(device_id: i32, timestamp_ms: i64, rng: &mut R) -> LogEvent {
    let severity = Severity::ALL[rng.random_range(0..Severity::ALL.len())];
    let message = sample_messages(severity)
        .choose(rng)
        .copied()
        .unwrap_or_default();

    LogEvent {
        device_id,
        timestamp_ms,
        severity,
        message: message.to_string(),
    }
}
