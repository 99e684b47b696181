use crate::domain::chart::{default_graphs, GraphSpec};
use crate::domain::window::DEFAULT_INTERVAL_SECS;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_WIDTH: u32 = 100;
const DEFAULT_X_AXIS_LABEL: &str = "Time";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub service: ServiceSettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default = "default_graphs")]
    pub graphs: Vec<GraphSpec>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WindowSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: i64,
}

fn default_interval_secs() -> i64 {
    DEFAULT_INTERVAL_SECS
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_x_axis_label")]
    pub x_axis_label: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            x_axis_label: DEFAULT_X_AXIS_LABEL.to_string(),
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_x_axis_label() -> String {
    DEFAULT_X_AXIS_LABEL.to_string()
}

/// Reads `config/dashboard.*` if present, overlaid by `TEMPHUMI__*`
/// environment variables (e.g. `TEMPHUMI__SERVICE__BASE_URL`).
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    build_config(config::File::with_name("config/dashboard").required(false))
}

fn build_config<S>(file: S) -> anyhow::Result<DashboardConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("service.base_url", DEFAULT_BASE_URL)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("TEMPHUMI")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    anyhow::ensure!(
        config.window.interval_secs > 0,
        "window.interval_secs must be positive, got {}",
        config.window.interval_secs
    );
    Ok(config)
}
