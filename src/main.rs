// Main entry point - Dependency injection and console loop
use std::sync::Arc;

use temphumi_dashboard::application::dashboard_controller::DashboardController;
use temphumi_dashboard::infrastructure::config::load_dashboard_config;
use temphumi_dashboard::infrastructure::http_source::HttpMeasurementSource;
use temphumi_dashboard::presentation::console;
use temphumi_dashboard::presentation::text_chart::TextChart;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with chart frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = load_dashboard_config()?;
    tracing::info!(
        "Using measurement service at {} with {}s windows",
        config.service.base_url,
        config.window.interval_secs
    );

    // Source (infrastructure layer)
    let source = Arc::new(HttpMeasurementSource::new(&config.service)?);

    // Controller (application layer)
    let mut controller = DashboardController::new(
        source,
        config.graphs.clone(),
        config.window.interval_secs,
        config.display.x_axis_label.clone(),
    );

    // One text container per graph (presentation layer)
    let containers = config
        .graphs
        .iter()
        .map(|graph| (graph.name.clone(), TextChart::new(&graph.name, config.display.width)));
    controller.initialize(containers)?;

    let mut stdout = std::io::stdout();
    console::run(&mut controller, BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    controller.teardown();
    Ok(())
}
