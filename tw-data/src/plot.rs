//! Declarative Plotly figures.
//!
//! The renderer is a sink: it receives `{ data, layout }` as JSON and hands
//! it to `Plotly.newPlot`. Nothing here knows about the DOM.

use crate::daily::{DailyAverage, DayOverDay};
use crate::forecast::ForecastPivot;
use crate::series::LineSeries;
use serde::Serialize;

/// Timestamp format Plotly reads as a date axis value.
const PLOTLY_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter {
        name: String,
        mode: String,
        x: Vec<String>,
        y: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        yaxis: Option<String>,
    },
    Indicator {
        mode: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        delta: Option<Delta>,
        title: Title,
        domain: Domain,
    },
    Heatmap {
        x: Vec<String>,
        y: Vec<String>,
        z: Vec<Vec<f64>>,
        colorscale: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub reference: f64,
    pub valueformat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub row: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub rows: u32,
    pub columns: u32,
    pub pattern: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
}

fn title(text: &str) -> Title {
    Title {
        text: text.to_string(),
    }
}

fn scatter(series: &LineSeries, yaxis: Option<&str>) -> Trace {
    Trace::Scatter {
        name: series.name.clone(),
        mode: "lines".to_string(),
        x: series
            .points
            .iter()
            .map(|p| p.x.format(PLOTLY_DATETIME).to_string())
            .collect(),
        y: series.points.iter().map(|p| p.y).collect(),
        yaxis: yaxis.map(str::to_string),
    }
}

/// Two series on one time axis, the second against a right-hand y axis.
pub fn line_figure(
    chart_title: &str,
    primary: &LineSeries,
    primary_unit: &str,
    secondary: &LineSeries,
    secondary_unit: &str,
) -> Figure {
    Figure {
        data: vec![scatter(primary, None), scatter(secondary, Some("y2"))],
        layout: Layout {
            title: Some(title(chart_title)),
            yaxis: Some(Axis {
                title: Some(title(primary_unit)),
                ..Axis::default()
            }),
            yaxis2: Some(Axis {
                title: Some(title(secondary_unit)),
                overlaying: Some("y".to_string()),
                side: Some("right".to_string()),
            }),
            ..Layout::default()
        },
    }
}

/// One indicator: today's average against yesterday's as the delta reference.
///
/// A missing today leaves the number blank; a missing yesterday drops the delta.
fn indicator(label: &str, column: u32, today: Option<f64>, yesterday: Option<f64>) -> Trace {
    Trace::Indicator {
        mode: "number+delta".to_string(),
        value: today,
        delta: yesterday.map(|reference| Delta {
            reference,
            valueformat: ".1f".to_string(),
        }),
        title: title(label),
        domain: Domain { row: 0, column },
    }
}

fn metric(avg: &Option<DailyAverage>) -> Option<f64> {
    avg.as_ref().and_then(|a| a.avg_metric)
}

fn secondary(avg: &Option<DailyAverage>) -> Option<f64> {
    avg.as_ref().and_then(|a| a.avg_secondary)
}

/// The four day-over-day indicators: indoor/outdoor temperature and humidity.
pub fn summary_figure(indoor: &DayOverDay, outdoor: &DayOverDay) -> Figure {
    let data = vec![
        indicator("Indoor °C", 0, metric(&indoor.today), metric(&indoor.yesterday)),
        indicator("Indoor %RH", 1, secondary(&indoor.today), secondary(&indoor.yesterday)),
        indicator("Outdoor °C", 2, metric(&outdoor.today), metric(&outdoor.yesterday)),
        indicator("Outdoor %RH", 3, secondary(&outdoor.today), secondary(&outdoor.yesterday)),
    ];
    Figure {
        data,
        layout: Layout {
            grid: Some(Grid {
                rows: 1,
                columns: 4,
                pattern: "independent".to_string(),
            }),
            ..Layout::default()
        },
    }
}

/// Heatmap of a forecast pivot: spots down, run hours across.
pub fn heatmap_figure(chart_title: &str, pivot: &ForecastPivot) -> Figure {
    Figure {
        data: vec![Trace::Heatmap {
            x: pivot.columns.clone(),
            y: pivot.rows.clone(),
            z: pivot.matrix.clone(),
            colorscale: "YlGnBu".to_string(),
        }],
        layout: Layout {
            title: Some(title(chart_title)),
            xaxis: Some(Axis {
                title: Some(title("Hour")),
                ..Axis::default()
            }),
            ..Layout::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::DayLabel;
    use crate::series::{line_series, Channel};
    use serde_json::json;
    use tw_core::time::parse_timestamp;
    use tw_core::Sample;

    #[test]
    fn line_figure_serializes_for_plotly() {
        let samples = vec![Sample {
            timestamp: parse_timestamp("2025-01-09T14:00:00").unwrap(),
            metric_value: Some(20.5),
            secondary_value: Some(41.0),
        }];
        let fig = line_figure(
            "Indoor",
            &line_series(&samples, Channel::Metric, "Temperature"),
            "°C",
            &line_series(&samples, Channel::Secondary, "Humidity"),
            "%",
        );
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(v["data"][0]["type"], json!("scatter"));
        assert_eq!(v["data"][0]["x"][0], json!("2025-01-09 14:00:00"));
        assert!(v["data"][0].get("yaxis").is_none());
        assert_eq!(v["data"][1]["yaxis"], json!("y2"));
        assert_eq!(v["layout"]["yaxis2"]["overlaying"], json!("y"));
        assert!(v["layout"].get("grid").is_none());
    }

    #[test]
    fn summary_has_four_indicators_with_deltas() {
        let indoor = DayOverDay {
            reference: None,
            today: Some(DailyAverage {
                label: DayLabel::Today,
                avg_metric: Some(21.0),
                avg_secondary: None,
            }),
            yesterday: Some(DailyAverage {
                label: DayLabel::Yesterday,
                avg_metric: Some(19.5),
                avg_secondary: Some(44.0),
            }),
        };
        let fig = summary_figure(&indoor, &DayOverDay::default());
        assert_eq!(fig.data.len(), 4);

        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(v["data"][0]["type"], json!("indicator"));
        assert_eq!(v["data"][0]["value"], json!(21.0));
        assert_eq!(v["data"][0]["delta"]["reference"], json!(19.5));
        // humidity has a reference but no value for today
        assert!(v["data"][1].get("value").is_none());
        assert_eq!(v["data"][1]["delta"]["reference"], json!(44.0));
        // outdoor has nothing at all
        assert!(v["data"][2].get("delta").is_none());
        assert_eq!(v["data"][3]["domain"]["column"], json!(3));
        assert_eq!(v["layout"]["grid"]["columns"], json!(4));
    }

    #[test]
    fn heatmap_carries_pivot_axes() {
        let pivot = ForecastPivot {
            rows: vec!["Pacifica".to_string()],
            columns: vec!["06:00".to_string(), "09:00".to_string()],
            matrix: vec![vec![1.0, 0.0]],
        };
        let v = serde_json::to_value(heatmap_figure("Tomorrow", &pivot)).unwrap();
        assert_eq!(v["data"][0]["type"], json!("heatmap"));
        assert_eq!(v["data"][0]["y"], json!(["Pacifica"]));
        assert_eq!(v["data"][0]["z"], json!([[1.0, 0.0]]));
        assert_eq!(v["layout"]["title"]["text"], json!("Tomorrow"));
    }
}
