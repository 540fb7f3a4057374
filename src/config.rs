use std::env;

use crate::error::IngestError;

const DEFAULT_HTTP_PORT: &str = "4567";
const DEFAULT_STORAGE_SERVICE_ADDRESS: &str = "ws://localhost:7890";
const DEFAULT_QUEUE_ENDPOINT: &str = "http://localhost:9324";

#[derive(Debug, Clone)]
pub struct Settings {
    /// HTTP port of the long-running service (`POST /logs`, `GET /v1/health`)
    pub http_port: u16,
    /// WebSocket address of the storage service
    pub storage_service_address: String,
    /// Work queue used by the event-triggered entry point
    pub queue_name: Option<String>,
    /// SQS-compatible endpoint hosting `queue_name`
    pub queue_endpoint: String,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), IngestError> {
        validate_port(self.http_port)?;
        validate_url(
            &self.storage_service_address,
            &["ws", "wss"],
            "STORAGE_SERVICE_ADDRESS",
        )?;
        validate_url(&self.queue_endpoint, &["http", "https"], "QUEUE_ENDPOINT")?;
        if let Some(queue_name) = &self.queue_name {
            if queue_name.trim().is_empty() {
                return Err(IngestError::Config("Queue name cannot be empty".into()));
            }
        }
        Ok(())
    }

    /// Queue name, required by the event-triggered entry point.
    pub fn require_queue_name(&self) -> Result<&str, IngestError> {
        self.queue_name.as_deref().ok_or_else(|| {
            IngestError::Config("Missing required environment variable: QUEUE_NAME".into())
        })
    }
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), IngestError> {
    if port == 0 {
        return Err(IngestError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

/// Validates that `url` uses one of `schemes` and names a host.
fn validate_url(url: &str, schemes: &[&str], name: &str) -> Result<(), IngestError> {
    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(IngestError::Config(format!("{name} must be an absolute URL")));
    };
    if !schemes.contains(&scheme) {
        return Err(IngestError::Config(format!(
            "{name} must use one of {schemes:?}, got {scheme:?}"
        )));
    }
    let host = rest.split(['/', ':']).next().unwrap_or_default();
    if host.trim().is_empty() {
        return Err(IngestError::Config(format!("{name} has no host")));
    }
    Ok(())
}

pub fn get_configuration() -> Result<Settings, Box<dyn std::error::Error>> {
    let http_port = env::var("HTTP_PORT")
        .unwrap_or_else(|_| DEFAULT_HTTP_PORT.to_string())
        .parse::<u16>()?;
    let storage_service_address = env::var("STORAGE_SERVICE_ADDRESS")
        .unwrap_or_else(|_| DEFAULT_STORAGE_SERVICE_ADDRESS.to_string());
    let queue_name = env::var("QUEUE_NAME").ok();
    let queue_endpoint =
        env::var("QUEUE_ENDPOINT").unwrap_or_else(|_| DEFAULT_QUEUE_ENDPOINT.to_string());

    let settings = Settings {
        http_port,
        storage_service_address,
        queue_name,
        queue_endpoint,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            http_port: 4567,
            storage_service_address: "ws://localhost:7890".into(),
            queue_name: Some("device-logs".into()),
            queue_endpoint: "http://localhost:9324".into(),
        }
    }

    #[test]
    fn test_validate_port_valid() {
        assert!(validate_port(80).is_ok());
        assert!(validate_port(4567).is_ok());
        assert!(validate_port(65535).is_ok());
        assert!(validate_port(1).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let result = validate_port(0);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("ws://localhost:7890", &["ws", "wss"], "X").is_ok());
        assert!(validate_url("wss://storage.example.com/logs", &["ws", "wss"], "X").is_ok());
        assert!(validate_url("http://localhost:7890", &["ws", "wss"], "X").is_err());
        assert!(validate_url("localhost:7890", &["ws", "wss"], "X").is_err());
        assert!(validate_url("ws://:7890", &["ws", "wss"], "X").is_err());
    }

    #[test]
    fn test_settings_validate_success() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_settings_validate_without_queue_name() {
        let settings = Settings {
            queue_name: None,
            ..settings()
        };
        assert!(settings.validate().is_ok());
        assert!(settings.require_queue_name().is_err());
    }

    #[test]
    fn test_settings_validate_blank_queue_name_fails() {
        let settings = Settings {
            queue_name: Some("  ".into()),
            ..settings()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("Queue name cannot be empty"));
    }

    #[test]
    fn test_settings_validate_zero_http_port_fails() {
        let settings = Settings {
            http_port: 0,
            ..settings()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_validate_bad_storage_address_fails() {
        let settings = Settings {
            storage_service_address: "tcp://localhost:7890".into(),
            ..settings()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("STORAGE_SERVICE_ADDRESS"));
    }
}
