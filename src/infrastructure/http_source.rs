// HTTP measurement source implementation
use crate::application::measurement_source::MeasurementSource;
use crate::domain::measurement::MeasurementPage;
use crate::domain::window::TimeWindow;
use crate::error::{FetchError, FetchResult};
use crate::infrastructure::config::ServiceSettings;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpMeasurementSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMeasurementSource {
    pub fn new(settings: &ServiceSettings) -> FetchResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn range_url(&self, window: TimeWindow) -> String {
        format!(
            "{}/measurements/{},{}",
            self.base_url,
            window.start(),
            window.end()
        )
    }
}

#[async_trait]
impl MeasurementSource for HttpMeasurementSource {
    async fn fetch(&self, window: TimeWindow) -> FetchResult<MeasurementPage> {
        let url = self.range_url(window);
        tracing::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let page: MeasurementPage = serde_json::from_slice(&body)?;
        tracing::debug!("Received {} records from {}", page.data.len(), url);
        Ok(page)
    }
}
