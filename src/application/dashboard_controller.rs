// Dashboard controller - Window paging and chart binding
use crate::application::measurement_source::MeasurementSource;
use crate::application::render_surface::RenderSurface;
use crate::application::resize::fit_to_width;
use crate::application::series_binder::bind_series;
use crate::domain::chart::{ChartConfig, GraphSpec};
use crate::domain::measurement::{MeasurementPage, PageAvailability};
use crate::domain::series::BoundSeries;
use crate::domain::window::TimeWindow;
use crate::error::{DashboardError, FetchResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Enabled state of the previous/next controls. The "current" control is
/// always enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl From<PageAvailability> for NavigationState {
    fn from(availability: PageAvailability) -> Self {
        Self {
            previous_enabled: availability.has_previous,
            next_enabled: availability.has_more,
        }
    }
}

/// A request that has been issued but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRefresh {
    token: u64,
    window: TimeWindow,
}

impl PendingRefresh {
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Applied(PageAvailability),
    /// A newer request was applied first, or the request was issued
    /// before the last teardown.
    Discarded,
}

struct Chart<S> {
    spec: GraphSpec,
    config: ChartConfig,
    surface: S,
}

impl<S: RenderSurface> Chart<S> {
    fn rebind(&mut self, series: &BoundSeries) {
        for (dataset, line) in self.config.data.datasets.iter_mut().zip(&self.spec.lines) {
            dataset.data = series.points(line.id).to_vec();
        }
        self.surface.update(&self.config);
    }
}

pub struct DashboardController<S> {
    source: Arc<dyn MeasurementSource>,
    graphs: Vec<GraphSpec>,
    x_axis_label: String,
    interval: i64,
    charts: Option<Vec<Chart<S>>>,
    window: Option<TimeWindow>,
    navigation: NavigationState,
    next_token: u64,
    applied_token: Option<u64>,
    // Tokens below this were issued before the last teardown.
    lifecycle_floor: u64,
}

impl<S: RenderSurface> DashboardController<S> {
    pub fn new(
        source: Arc<dyn MeasurementSource>,
        graphs: Vec<GraphSpec>,
        interval: i64,
        x_axis_label: impl Into<String>,
    ) -> Self {
        Self {
            source,
            graphs,
            x_axis_label: x_axis_label.into(),
            interval,
            charts: None,
            window: None,
            navigation: NavigationState::default(),
            next_token: 0,
            applied_token: None,
            lifecycle_floor: 0,
        }
    }

    /// Mounts one chart per configured graph on the container registered
    /// under the graph's name. Containers without a graph are ignored.
    pub fn initialize<I>(&mut self, containers: I) -> Result<(), DashboardError>
    where
        I: IntoIterator<Item = (String, S)>,
    {
        if self.charts.is_some() {
            self.teardown();
        }

        let mut containers: HashMap<String, S> = containers.into_iter().collect();
        let mut charts = Vec::with_capacity(self.graphs.len());
        for spec in &self.graphs {
            let mut surface = containers
                .remove(&spec.name)
                .ok_or_else(|| DashboardError::MissingContainer(spec.name.clone()))?;

            let config = ChartConfig::line_chart(&self.x_axis_label, &spec.lines);
            surface.mount(&config);
            let height = fit_to_width(&mut surface);
            tracing::debug!("Mounted chart {} with height {}", spec.name, height);

            charts.push(Chart {
                spec: spec.clone(),
                config,
                surface,
            });
        }

        for name in containers.keys() {
            tracing::debug!("Ignoring container {} with no configured graph", name);
        }

        tracing::info!("Dashboard initialized with {} charts", charts.len());
        self.charts = Some(charts);
        Ok(())
    }

    /// Releases the containers and forgets the window and navigation state.
    /// Requests still in flight are discarded when they complete.
    pub fn teardown(&mut self) -> Vec<(String, S)> {
        self.window = None;
        self.navigation = NavigationState::default();
        self.applied_token = None;
        self.lifecycle_floor = self.next_token;
        self.charts
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(|chart| (chart.spec.name, chart.surface))
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.charts.is_some()
    }

    /// The most recently applied window.
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    pub fn navigation(&self) -> NavigationState {
        self.navigation
    }

    pub fn surface(&self, graph: &str) -> Option<&S> {
        self.surfaces().find(|(name, _)| *name == graph).map(|(_, s)| s)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (&str, &S)> {
        self.charts
            .iter()
            .flatten()
            .map(|chart| (chart.spec.name.as_str(), &chart.surface))
    }

    pub fn surface_mut(&mut self, graph: &str) -> Option<&mut S> {
        self.charts
            .iter_mut()
            .flatten()
            .find(|chart| chart.spec.name == graph)
            .map(|chart| &mut chart.surface)
    }

    /// Re-derives the container height of one chart from its current width.
    pub fn resize(&mut self, graph: &str) -> Result<u32, DashboardError> {
        let charts = self.charts.as_mut().ok_or(DashboardError::NotInitialized)?;
        let chart = charts
            .iter_mut()
            .find(|chart| chart.spec.name == graph)
            .ok_or_else(|| DashboardError::UnknownGraph(graph.to_string()))?;
        Ok(fit_to_width(&mut chart.surface))
    }

    /// Issues a request token for `[start, end]` without fetching.
    pub fn begin_range(&mut self, start: i64, end: i64) -> Result<PendingRefresh, DashboardError> {
        if self.charts.is_none() {
            return Err(DashboardError::NotInitialized);
        }
        let window = TimeWindow::new(start, end)?;
        let token = self.next_token;
        self.next_token += 1;
        Ok(PendingRefresh { token, window })
    }

    /// Applies a finished request. Failures leave charts, window and
    /// navigation state as they were.
    pub fn complete(
        &mut self,
        pending: PendingRefresh,
        result: FetchResult<MeasurementPage>,
    ) -> Result<Refresh, DashboardError> {
        if pending.token < self.lifecycle_floor {
            tracing::debug!(
                "Discarding response for {}..{} issued before teardown",
                pending.window.start(),
                pending.window.end()
            );
            return Ok(Refresh::Discarded);
        }

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(
                    "Refresh of {}..{} failed: {}",
                    pending.window.start(),
                    pending.window.end(),
                    e
                );
                return Err(e.into());
            }
        };

        if self.applied_token.is_some_and(|applied| applied > pending.token) {
            tracing::debug!(
                "Discarding stale response for {}..{}",
                pending.window.start(),
                pending.window.end()
            );
            return Ok(Refresh::Discarded);
        }

        let charts = self.charts.as_mut().ok_or(DashboardError::NotInitialized)?;
        let series = bind_series(&page.data);
        for chart in charts.iter_mut() {
            chart.rebind(&series);
        }

        let availability = page.availability();
        self.window = Some(pending.window);
        self.navigation = availability.into();
        self.applied_token = Some(pending.token);

        tracing::debug!(
            "Applied {} records for {}..{} (has_prev={}, has_more={})",
            page.data.len(),
            pending.window.start(),
            pending.window.end(),
            availability.has_previous,
            availability.has_more
        );
        Ok(Refresh::Applied(availability))
    }

    pub async fn show_range(&mut self, start: i64, end: i64) -> Result<Refresh, DashboardError> {
        let pending = self.begin_range(start, end)?;
        let result = self.source.fetch(pending.window).await;
        self.complete(pending, result)
    }

    pub async fn show_ending_at(&mut self, now: i64) -> Result<Refresh, DashboardError> {
        let window = TimeWindow::ending_at(now, self.interval)?;
        self.show_range(window.start(), window.end()).await
    }

    pub async fn show_now(&mut self) -> Result<Refresh, DashboardError> {
        self.show_ending_at(chrono::Utc::now().timestamp()).await
    }

    pub async fn next(&mut self) -> Result<Refresh, DashboardError> {
        self.shift(self.interval).await
    }

    pub async fn previous(&mut self) -> Result<Refresh, DashboardError> {
        self.shift(-self.interval).await
    }

    async fn shift(&mut self, delta: i64) -> Result<Refresh, DashboardError> {
        let window = self.window.ok_or(DashboardError::NoActiveWindow)?.shifted(delta)?;
        self.show_range(window.start(), window.end()).await
    }
}
