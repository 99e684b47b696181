// Chart configuration domain model
use super::measurement::Metric;
use super::series::SeriesPoint;
use serde::{Deserialize, Serialize};

const DATASET_BACKGROUND: &str = "#000000";
const TIME_UNIT: &str = "hour";
const HOUR_DISPLAY_FORMAT: &str = "M-DD H";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Left,
    Right,
}

/// One plotted line and its y-axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineDescriptor {
    pub id: Metric,
    pub label: String,
    pub color: String,
    pub position: AxisPosition,
}

impl LineDescriptor {
    pub fn new(id: Metric, label: &str, color: &str, position: AxisPosition) -> Self {
        Self {
            id,
            label: label.to_string(),
            color: color.to_string(),
            position,
        }
    }
}

/// A named chart. The name identifies the container the chart is drawn in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphSpec {
    pub name: String,
    pub lines: Vec<LineDescriptor>,
}

/// Power/energy and temperature/humidity charts.
pub fn default_graphs() -> Vec<GraphSpec> {
    vec![
        GraphSpec {
            name: "power".to_string(),
            lines: vec![
                LineDescriptor::new(Metric::Power, "Power [W]", "#ff0000", AxisPosition::Left),
                LineDescriptor::new(Metric::Energy, "Energy [kWh]", "#11cc11", AxisPosition::Right),
            ],
        },
        GraphSpec {
            name: "temp".to_string(),
            lines: vec![
                LineDescriptor::new(Metric::Temp, "Temperature [deg C]", "#ff0000", AxisPosition::Left),
                LineDescriptor::new(Metric::Humi, "Humidity [%]", "#111177", AxisPosition::Right),
            ],
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
}

/// Declarative configuration handed to the render collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(rename = "yAxisID")]
    pub y_axis_id: Metric,
    pub background_color: String,
    pub border_color: String,
    pub data: Vec<SeriesPoint>,
    pub fill: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub tooltips: Interaction,
    pub hover: Interaction,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: String,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<TimeAxis>,
    pub y_axes: Vec<ValueAxis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    #[serde(rename = "type")]
    pub kind: String,
    pub scale_label: ScaleLabel,
    pub time: TimeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub unit: String,
    pub display_formats: DisplayFormats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFormats {
    pub hour: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAxis {
    pub id: Metric,
    pub scale_label: ScaleLabel,
    pub position: AxisPosition,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleLabel {
    pub display: bool,
    pub label_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub font_color: String,
}

impl ChartConfig {
    /// Line chart with one empty dataset and one y-axis per line, all sharing
    /// a single time axis.
    pub fn line_chart(x_axis_label: &str, lines: &[LineDescriptor]) -> Self {
        let datasets = lines
            .iter()
            .map(|line| Dataset {
                label: line.label.clone(),
                y_axis_id: line.id,
                background_color: DATASET_BACKGROUND.to_string(),
                border_color: line.color.clone(),
                data: Vec::new(),
                fill: false,
            })
            .collect();

        let y_axes = lines
            .iter()
            .map(|line| ValueAxis {
                id: line.id,
                scale_label: ScaleLabel {
                    display: true,
                    label_string: line.label.clone(),
                },
                position: line.position,
                ticks: Ticks {
                    font_color: line.color.clone(),
                },
            })
            .collect();

        Self {
            kind: ChartType::Line,
            data: ChartData {
                labels: Vec::new(),
                datasets,
            },
            options: ChartOptions {
                responsive: true,
                maintain_aspect_ratio: false,
                tooltips: Interaction {
                    mode: "index".to_string(),
                    intersect: false,
                },
                hover: Interaction {
                    mode: "nearest".to_string(),
                    intersect: true,
                },
                scales: Scales {
                    x_axes: vec![TimeAxis {
                        kind: "time".to_string(),
                        scale_label: ScaleLabel {
                            display: true,
                            label_string: x_axis_label.to_string(),
                        },
                        time: TimeOptions {
                            unit: TIME_UNIT.to_string(),
                            display_formats: DisplayFormats {
                                hour: HOUR_DISPLAY_FORMAT.to_string(),
                            },
                        },
                    }],
                    y_axes,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_dataset_and_axis_per_line() {
        let graphs = default_graphs();
        let config = ChartConfig::line_chart("Time", &graphs[0].lines);

        assert_eq!(config.data.datasets.len(), 2);
        assert_eq!(config.options.scales.y_axes.len(), 2);
        assert_eq!(config.options.scales.x_axes.len(), 1);
        assert!(config.data.datasets.iter().all(|d| d.data.is_empty()));
        assert_eq!(config.data.datasets[1].y_axis_id, Metric::Energy);
        assert_eq!(config.options.scales.y_axes[1].position, AxisPosition::Right);
    }

    #[test]
    fn test_serialized_shape() {
        let lines = vec![LineDescriptor::new(
            Metric::Temp,
            "Temperature [deg C]",
            "#ff0000",
            AxisPosition::Left,
        )];
        let value = serde_json::to_value(ChartConfig::line_chart("Time", &lines)).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "line",
                "data": {
                    "labels": [],
                    "datasets": [{
                        "label": "Temperature [deg C]",
                        "yAxisID": "temp",
                        "backgroundColor": "#000000",
                        "borderColor": "#ff0000",
                        "data": [],
                        "fill": false
                    }]
                },
                "options": {
                    "responsive": true,
                    "maintainAspectRatio": false,
                    "tooltips": {"mode": "index", "intersect": false},
                    "hover": {"mode": "nearest", "intersect": true},
                    "scales": {
                        "xAxes": [{
                            "type": "time",
                            "scaleLabel": {"display": true, "labelString": "Time"},
                            "time": {"unit": "hour", "displayFormats": {"hour": "M-DD H"}}
                        }],
                        "yAxes": [{
                            "id": "temp",
                            "scaleLabel": {"display": true, "labelString": "Temperature [deg C]"},
                            "position": "left",
                            "ticks": {"fontColor": "#ff0000"}
                        }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_empty_lines_give_empty_chart() {
        let config = ChartConfig::line_chart("Time", &[]);
        assert!(config.data.datasets.is_empty());
        assert!(config.options.scales.y_axes.is_empty());
    }
}
