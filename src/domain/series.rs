// Per-metric series bound to chart datasets
use super::measurement::Metric;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A chart point. `y` is `None` where the record lacked the metric, which
/// the chart draws as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub x: DateTime<Utc>,
    pub y: Option<f64>,
}

impl SeriesPoint {
    pub fn new(x: DateTime<Utc>, y: Option<f64>) -> Self {
        Self { x, y }
    }
}

/// The four series produced by one refresh, each in record order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundSeries {
    pub temp: Vec<SeriesPoint>,
    pub humi: Vec<SeriesPoint>,
    pub power: Vec<SeriesPoint>,
    pub energy: Vec<SeriesPoint>,
}

impl BoundSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            temp: Vec::with_capacity(capacity),
            humi: Vec::with_capacity(capacity),
            power: Vec::with_capacity(capacity),
            energy: Vec::with_capacity(capacity),
        }
    }

    pub fn points(&self, metric: Metric) -> &[SeriesPoint] {
        match metric {
            Metric::Temp => &self.temp,
            Metric::Humi => &self.humi,
            Metric::Power => &self.power,
            Metric::Energy => &self.energy,
        }
    }

    pub fn points_mut(&mut self, metric: Metric) -> &mut Vec<SeriesPoint> {
        match metric {
            Metric::Temp => &mut self.temp,
            Metric::Humi => &mut self.humi,
            Metric::Power => &mut self.power,
            Metric::Energy => &mut self.energy,
        }
    }
}
