use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity reported by a device.
///
/// The JSON spelling is the upper-case literal and matching is case-sensitive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Information,
    Warning,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Information, Severity::Warning];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Information => "INFORMATION",
            Severity::Warning => "WARNING",
        }
    }

    /// Exact, case-sensitive lookup of a wire literal.
    pub fn from_literal(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded device log event.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub device_id: i32,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "timeStamp")]
    pub timestamp_ms: i64,
    #[serde(rename = "eventType")]
    pub severity: Severity,
    #[serde(rename = "eventMessage")]
    pub message: String,
}
