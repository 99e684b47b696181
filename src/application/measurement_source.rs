// Source trait for windowed measurement data
use crate::domain::measurement::MeasurementPage;
use crate::domain::window::TimeWindow;
use crate::error::FetchResult;
use async_trait::async_trait;

#[async_trait]
pub trait MeasurementSource: Send + Sync {
    /// Fetch every record in the window together with the page
    /// availability flags. Failures are returned as-is, never retried.
    async fn fetch(&self, window: TimeWindow) -> FetchResult<MeasurementPage>;
}
