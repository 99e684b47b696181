// Measurement data domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One of the four logged quantities. The lowercase name doubles as the
/// dataset and axis id in chart configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temp,
    Humi,
    Power,
    Energy,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Temp, Metric::Humi, Metric::Power, Metric::Energy];

    pub fn id(&self) -> &'static str {
        match self {
            Metric::Temp => "temp",
            Metric::Humi => "humi",
            Metric::Power => "power",
            Metric::Energy => "energy",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single logged sample. Sensors that were not attached when the sample
/// was taken leave their metric empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementRecord {
    #[serde(rename = "dt", deserialize_with = "epoch_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "t", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "h", default)]
    pub humidity: Option<f64>,
    #[serde(rename = "p", default)]
    pub power: Option<f64>,
    #[serde(rename = "e", default)]
    pub energy: Option<f64>,
}

impl MeasurementRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temp => self.temperature,
            Metric::Humi => self.humidity,
            Metric::Power => self.power,
            Metric::Energy => self.energy,
        }
    }
}

/// Server-reported existence of data outside the requested window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageAvailability {
    pub has_previous: bool,
    pub has_more: bool,
}

/// Response body of `measurements/{start},{end}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementPage {
    pub data: Vec<MeasurementRecord>,
    pub has_prev: bool,
    pub has_more: bool,
}

impl MeasurementPage {
    pub fn availability(&self) -> PageAvailability {
        PageAvailability {
            has_previous: self.has_prev,
            has_more: self.has_more,
        }
    }
}

// Timestamps are stored as floating point seconds; keep millisecond precision.
fn epoch_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f64::deserialize(deserializer)?;
    let millis = (seconds * 1000.0).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "timestamp {} out of range",
            seconds
        )));
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or_else(|| {
        serde::de::Error::custom(format!("timestamp {} out of range", seconds))
    })
}
