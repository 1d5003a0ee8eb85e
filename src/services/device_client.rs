use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::errors::FetchError;
use crate::models::{Channel, Reading};

/// Terminal attribute payload inside the device status tree.
#[derive(Debug, Deserialize)]
struct AttributePayload {
    value: f64,
    timestamp: String,
    unit: Option<String>,
}

#[async_trait]
pub trait ReadingFetcher {
    async fn fetch_channel(&self, channel: &Channel) -> Result<Reading, FetchError>;
}

/// Sole consumer of the device status API: one authenticated round trip
/// per channel per tick.
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DeviceClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl ReadingFetcher for DeviceClient {
    async fn fetch_channel(&self, channel: &Channel) -> Result<Reading, FetchError> {
        let url = format!("{}/devices/{}/status", self.base_url, channel.device_id);

        let status: Value = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        extract_reading(&status, channel)
    }
}

/// Walk `components.<component>.<capability>.<attribute>` through the
/// untyped status payload and decode the terminal value into a reading.
/// Fails naming the first hop that is missing, null, or not an object.
pub fn extract_reading(status: &Value, channel: &Channel) -> Result<Reading, FetchError> {
    let segments = [
        "components",
        channel.component.as_str(),
        channel.capability.as_str(),
        channel.attribute.as_str(),
    ];

    let mut current = status;
    let mut path = String::new();

    for segment in segments {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(segment);

        current = current
            .as_object()
            .and_then(|object| object.get(segment))
            .filter(|value| !value.is_null())
            .ok_or_else(|| FetchError::UnexpectedShape { path: path.clone() })?;
    }

    let payload: AttributePayload = serde_json::from_value(current.clone())
        .map_err(|_| FetchError::UnexpectedShape { path })?;

    let timestamp = OffsetDateTime::parse(&payload.timestamp, &Rfc3339).map_err(|source| {
        FetchError::MalformedTimestamp {
            raw: payload.timestamp.clone(),
            source,
        }
    })?;

    Ok(Reading {
        value: payload.value,
        unit: payload.unit,
        timestamp,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    fn temperature_channel() -> Channel {
        Channel {
            name: String::from("temperature"),
            device_id: String::from("device-1"),
            component: String::from("main"),
            capability: String::from("temperatureMeasurement"),
            attribute: String::from("temperature"),
            file: String::from("temperature.json"),
        }
    }

    #[test]
    fn test_extract_reading() {
        let status = json!({
            "components": {
                "main": {
                    "temperatureMeasurement": {
                        "temperature": {
                            "value": 21.5,
                            "unit": "C",
                            "timestamp": "2024-03-01T12:00:00.000Z"
                        }
                    }
                }
            }
        });

        let reading = extract_reading(&status, &temperature_channel()).unwrap();

        assert_eq!(reading.value, 21.5);
        assert_eq!(reading.unit.as_deref(), Some("C"));
        assert_eq!(reading.timestamp, datetime!(2024-03-01 12:00:00 UTC));
    }

    #[test]
    fn test_extract_reading_without_unit() {
        let status = json!({
            "components": {
                "main": {
                    "temperatureMeasurement": {
                        "temperature": {
                            "value": 21,
                            "timestamp": "2024-03-01T12:00:00Z"
                        }
                    }
                }
            }
        });

        let reading = extract_reading(&status, &temperature_channel()).unwrap();

        assert_eq!(reading.value, 21.0);
        assert_eq!(reading.unit, None);
    }

    #[test]
    fn test_missing_capability_names_failed_hop() {
        let status = json!({
            "components": {
                "main": {
                    "relativeHumidityMeasurement": {}
                }
            }
        });

        let result = extract_reading(&status, &temperature_channel());

        match result {
            Err(FetchError::UnexpectedShape { path }) => {
                assert_eq!(path, "components.main.temperatureMeasurement");
            }
            other => panic!("Expected UnexpectedShape, got {:?}", other),
        }
    }

    #[test]
    fn test_null_hop_is_rejected() {
        let status = json!({
            "components": { "main": null }
        });

        let result = extract_reading(&status, &temperature_channel());

        assert!(matches!(
            result,
            Err(FetchError::UnexpectedShape { path }) if path == "components.main"
        ));
    }

    #[test]
    fn test_mistyped_terminal_value_is_rejected() {
        let status = json!({
            "components": {
                "main": {
                    "temperatureMeasurement": {
                        "temperature": {
                            "value": "warm",
                            "timestamp": "2024-03-01T12:00:00Z"
                        }
                    }
                }
            }
        });

        let result = extract_reading(&status, &temperature_channel());

        assert!(matches!(result, Err(FetchError::UnexpectedShape { .. })));
    }

    #[test]
    fn test_malformed_timestamp_is_a_hard_error() {
        let status = json!({
            "components": {
                "main": {
                    "temperatureMeasurement": {
                        "temperature": {
                            "value": 21.5,
                            "timestamp": "last tuesday"
                        }
                    }
                }
            }
        });

        let result = extract_reading(&status, &temperature_channel());

        assert!(matches!(
            result,
            Err(FetchError::MalformedTimestamp { raw, .. }) if raw == "last tuesday"
        ));
    }
}
