//! Binary schema for records handed to the storage service.
//!
//! Field tags and enum values are part of the wire contract with the
//! storage side and must not be renumbered.

use prost_types::Timestamp;

/// Canonical binary record.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SensorLogMessage {
    #[prost(int32, tag = "1")]
    pub sensor_id: i32,
    #[prost(message, optional, tag = "2")]
    pub time_stamp: Option<Timestamp>,
    #[prost(enumeration = "EventType", tag = "3")]
    pub event_type: i32,
    #[prost(string, tag = "4")]
    pub event_message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EventType {
    Error = 0,
    Information = 1,
    Warning = 2,
}
