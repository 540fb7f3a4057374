pub mod log_event;
pub mod sensor_log;

pub use log_event::{LogEvent, Severity};
pub use sensor_log::{EventType, SensorLogMessage};
