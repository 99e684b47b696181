// Text chart - Renders chart configurations as terminal frames
use crate::application::render_surface::RenderSurface;
use crate::domain::chart::{ChartConfig, Dataset};
use std::fmt::Write;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const LABEL_WIDTH: usize = 22;

/// A chart container drawn as text. Width and height are in character cells.
#[derive(Debug, Clone)]
pub struct TextChart {
    name: String,
    width: u32,
    height: u32,
    config: Option<ChartConfig>,
    has_data: bool,
    frame: String,
}

impl TextChart {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height: 0,
            config: None,
            has_data: false,
            frame: String::new(),
        }
    }

    /// The last painted frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// Takes effect once the container height is re-derived.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    // Redraws whatever was last shown at the current size.
    fn repaint(&mut self) {
        let frame = match &self.config {
            Some(config) if self.has_data => self.render(config),
            Some(config) => self.placeholder(config),
            None => return,
        };
        self.frame = frame;
    }

    fn placeholder(&self, config: &ChartConfig) -> String {
        let labels: Vec<&str> = config
            .data
            .datasets
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        format!("{}\n  {} (no data yet)\n", self.header(), labels.join(", "))
    }

    fn header(&self) -> String {
        format!("== {} ({}x{}) ==", self.name, self.width, self.height)
    }

    fn render(&self, config: &ChartConfig) -> String {
        let mut frame = self.header();
        frame.push('\n');
        let columns = (self.width as usize).saturating_sub(2).max(1);
        for dataset in &config.data.datasets {
            render_dataset(&mut frame, dataset, columns);
        }
        frame
    }
}

impl RenderSurface for TextChart {
    fn container_width(&self) -> u32 {
        self.width
    }

    fn set_container_height(&mut self, height: u32) {
        self.height = height;
        self.repaint();
    }

    fn mount(&mut self, config: &ChartConfig) {
        self.config = Some(config.clone());
        self.has_data = false;
        self.repaint();
    }

    fn update(&mut self, config: &ChartConfig) {
        if self.config.is_none() {
            tracing::warn!("Chart {} updated before mount", self.name);
        }
        self.config = Some(config.clone());
        self.has_data = true;
        self.repaint();
    }
}

fn render_dataset(frame: &mut String, dataset: &Dataset, columns: usize) {
    let values: Vec<f64> = dataset.data.iter().filter_map(|p| p.y).collect();
    let (Some(first), Some(last)) = (dataset.data.first(), dataset.data.last()) else {
        let _ = writeln!(frame, "{:<width$} (no data)", dataset.label, width = LABEL_WIDTH);
        return;
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let latest = dataset.data.iter().rev().find_map(|p| p.y);

    let _ = write!(
        frame,
        "{:<width$} {} .. {}  n={}",
        dataset.label,
        first.x.format("%m-%d %H:%M"),
        last.x.format("%m-%d %H:%M"),
        dataset.data.len(),
        width = LABEL_WIDTH
    );
    if let Some(latest) = latest {
        let _ = write!(frame, "  min={:.2} max={:.2} last={:.2}", min, max, latest);
    }
    frame.push('\n');

    let samples: Vec<Option<f64>> = dataset.data.iter().map(|p| p.y).collect();
    let _ = writeln!(frame, "  {}", sparkline(&samples, columns, min, max));
}

/// One character per bucket; buckets with no values stay blank.
fn sparkline(samples: &[Option<f64>], columns: usize, min: f64, max: f64) -> String {
    downsample(samples, columns)
        .into_iter()
        .map(|bucket| match bucket {
            Some(value) => {
                let span = max - min;
                let level = if span > 0.0 {
                    (((value - min) / span) * (BARS.len() - 1) as f64).round() as usize
                } else {
                    BARS.len() / 2
                };
                BARS[level.min(BARS.len() - 1)]
            }
            None => ' ',
        })
        .collect()
}

/// Bucket averaging down to at most `max_points` buckets.
fn downsample(samples: &[Option<f64>], max_points: usize) -> Vec<Option<f64>> {
    if samples.len() <= max_points {
        return samples.to_vec();
    }

    let bucket_size = (samples.len() as f64 / max_points as f64).ceil() as usize;
    samples
        .chunks(bucket_size)
        .map(|chunk| {
            let present: Vec<f64> = chunk.iter().flatten().copied().collect();
            if present.is_empty() {
                None
            } else {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::default_graphs;
    use crate::domain::series::SeriesPoint;
    use chrono::DateTime;

    fn points(values: &[Option<f64>]) -> Vec<SeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, y)| SeriesPoint::new(DateTime::from_timestamp(i as i64 * 60, 0).unwrap(), *y))
            .collect()
    }

    #[test]
    fn test_mount_then_update() {
        let mut chart = TextChart::new("temp", 40);
        chart.set_container_height(40);
        let mut config = ChartConfig::line_chart("Time", &default_graphs()[1].lines);

        chart.mount(&config);
        assert!(chart.frame().starts_with("== temp (40x40) =="));
        assert!(chart.frame().contains("Temperature [deg C], Humidity [%] (no data yet)"));

        config.data.datasets[0].data = points(&[Some(20.0), Some(22.0), None, Some(21.0)]);
        chart.update(&config);

        let frame = chart.frame();
        assert!(frame.contains("n=4  min=20.00 max=22.00 last=21.00"));
        assert!(frame.contains("  ▁█ ▅"));
        assert!(frame.contains("Humidity [%]"));
        assert!(frame.contains("(no data)"));
    }

    #[test]
    fn test_resize_repaints_last_frame() {
        let mut chart = TextChart::new("temp", 40);
        let mut config = ChartConfig::line_chart("Time", &default_graphs()[1].lines);
        chart.mount(&config);
        chart.set_container_height(40);
        assert!(chart.frame().starts_with("== temp (40x40) =="));

        config.data.datasets[0].data = points(&[Some(1.0), Some(2.0)]);
        chart.update(&config);
        chart.set_width(600);
        chart.set_container_height(300);

        assert!(chart.frame().starts_with("== temp (600x300) =="));
        assert!(chart.frame().contains("n=2"));
    }

    #[test]
    fn test_all_gaps_has_no_stats() {
        let mut chart = TextChart::new("power", 20);
        let mut config = ChartConfig::line_chart("Time", &default_graphs()[0].lines);
        config.data.datasets[0].data = points(&[None, None]);
        chart.mount(&config);
        chart.update(&config);

        assert!(chart.frame().contains("n=2\n"));
        assert!(!chart.frame().contains("min="));
    }

    #[test]
    fn test_downsample_buckets() {
        let samples: Vec<Option<f64>> = (0..10).map(|v| Some(v as f64)).collect();
        let buckets = downsample(&samples, 5);
        assert_eq!(buckets, vec![Some(0.5), Some(2.5), Some(4.5), Some(6.5), Some(8.5)]);

        let gappy = vec![None, None, Some(4.0), Some(6.0)];
        assert_eq!(downsample(&gappy, 2), vec![None, Some(5.0)]);
    }

    #[test]
    fn test_flat_series_uses_middle_bar() {
        assert_eq!(sparkline(&[Some(3.0), Some(3.0)], 10, 3.0, 3.0), "▅▅");
    }
}
