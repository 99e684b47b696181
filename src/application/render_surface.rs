// Render collaborator seam
use crate::domain::chart::ChartConfig;

/// One chart container of the rendering backend.
pub trait RenderSurface {
    /// Current container width in pixels (or cells, for text backends).
    fn container_width(&self) -> u32;

    fn set_container_height(&mut self, height: u32);

    /// Create the chart from its configuration. Called once per lifecycle.
    fn mount(&mut self, config: &ChartConfig);

    /// Repaint from the datasets currently held in `config`.
    fn update(&mut self, config: &ChartConfig);
}
