// Series binder - Reshapes records into per-metric series
use crate::domain::measurement::{MeasurementRecord, Metric};
use crate::domain::series::{BoundSeries, SeriesPoint};

/// Builds fresh series from `records`, keeping their order. Every series has
/// exactly one point per record.
pub fn bind_series(records: &[MeasurementRecord]) -> BoundSeries {
    let mut series = BoundSeries::with_capacity(records.len());
    for record in records {
        for metric in Metric::ALL {
            series
                .points_mut(metric)
                .push(SeriesPoint::new(record.timestamp, record.value(metric)));
        }
    }
    series
}
