use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One timestamped sensor observation. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// The time the device reported the observation
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
