//! The full preparation pass from a snapshot to chart-ready views.
//!
//! Each chart degrades on its own: a series whose records cannot be
//! normalized is logged and left out, and the remaining charts still render.

use crate::daily::{aggregate_day_over_day, DayOverDay};
use crate::forecast::{forecast_horizons, ForecastHorizons, ForecastPivot};
use crate::normalize::normalize;
use crate::plot::{heatmap_figure, line_figure, summary_figure, Figure};
use crate::series::{line_series, Channel, LineSeries};
use serde::{Deserialize, Serialize};
use tw_core::{RawRecord, SeriesFields, Snapshot, SurfRow};

/// DOM ids of every chart [`DashboardView::figures`] can produce, in page order.
pub const CHART_IDS: [&str; 5] = [
    "indoor-chart",
    "outdoor-chart",
    "summary-chart",
    "surf-first-chart",
    "surf-second-chart",
];

/// Surf rows ranked at or above this are not shown.
pub const DEFAULT_RANK_LIMIT: i64 = 5;

/// Per-series field selectors and the surf rank cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub indoor: SeriesFields,
    pub outdoor: SeriesFields,
    /// Keep surf rows with `rank < rank_limit`.
    pub rank_limit: i64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            indoor: SeriesFields::indoor(),
            outdoor: SeriesFields::outdoor(),
            rank_limit: DEFAULT_RANK_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub primary: LineSeries,
    pub secondary: LineSeries,
    pub day_over_day: DayOverDay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfView {
    pub horizons: ForecastHorizons,
    pub first_pivot: ForecastPivot,
    pub second_pivot: ForecastPivot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub indoor: Option<SeriesView>,
    pub outdoor: Option<SeriesView>,
    pub surf: Option<SurfView>,
}

/// Run every transform over a snapshot.
pub fn prepare_dashboard(snapshot: &Snapshot, config: &DashboardConfig) -> DashboardView {
    let view = DashboardView {
        indoor: prepare_series("indoor", &snapshot.metrics, &config.indoor),
        outdoor: prepare_series("outdoor", &snapshot.weather, &config.outdoor),
        surf: prepare_surf(&snapshot.surf, config.rank_limit),
    };
    log::info!(
        "dashboard: prepared from {} metrics, {} weather, {} surf records",
        snapshot.metrics.len(),
        snapshot.weather.len(),
        snapshot.surf.len()
    );
    view
}

fn prepare_series(name: &str, records: &[RawRecord], fields: &SeriesFields) -> Option<SeriesView> {
    let samples = match normalize(records, fields) {
        Ok(samples) => samples,
        Err(e) => {
            log::warn!("dashboard: skipping {} series: {}", name, e);
            return None;
        }
    };
    Some(SeriesView {
        primary: line_series(&samples, Channel::Metric, fields.primary()),
        secondary: line_series(&samples, Channel::Secondary, fields.secondary()),
        day_over_day: aggregate_day_over_day(&samples),
    })
}

fn prepare_surf(rows: &[SurfRow], rank_limit: i64) -> Option<SurfView> {
    let ranked: Vec<SurfRow> = rows.iter().filter(|r| r.rank < rank_limit).cloned().collect();
    let horizons = match forecast_horizons(&ranked) {
        Ok(h) => h,
        Err(e) => {
            log::warn!("dashboard: skipping surf forecast: {}", e);
            return None;
        }
    };
    Some(SurfView {
        first_pivot: ForecastPivot::from_cells(&horizons.first),
        second_pivot: ForecastPivot::from_cells(&horizons.second),
        horizons,
    })
}

impl DashboardView {
    /// Figures keyed by the DOM id of the container they render into.
    ///
    /// Charts with no data are left out rather than drawn empty.
    pub fn figures(&self) -> Vec<(&'static str, Figure)> {
        let mut figures = Vec::new();
        if let Some(indoor) = &self.indoor {
            figures.push((
                "indoor-chart",
                line_figure("Indoor", &indoor.primary, "°C", &indoor.secondary, "%RH"),
            ));
        }
        if let Some(outdoor) = &self.outdoor {
            figures.push((
                "outdoor-chart",
                line_figure("Outdoor", &outdoor.primary, "°C", &outdoor.secondary, "%RH"),
            ));
        }
        if self.indoor.is_some() || self.outdoor.is_some() {
            let empty = DayOverDay::default();
            let indoor = self.indoor.as_ref().map_or(&empty, |s| &s.day_over_day);
            let outdoor = self.outdoor.as_ref().map_or(&empty, |s| &s.day_over_day);
            figures.push(("summary-chart", summary_figure(indoor, outdoor)));
        }
        if let Some(surf) = &self.surf {
            let dated = |date: Option<chrono::NaiveDate>| {
                date.map(|d| format!("Surf {}", tw_core::time::format_date(&d)))
                    .unwrap_or_else(|| "Surf".to_string())
            };
            if !surf.first_pivot.is_empty() {
                figures.push((
                    "surf-first-chart",
                    heatmap_figure(&dated(surf.horizons.first_date), &surf.first_pivot),
                ));
            }
            if !surf.second_pivot.is_empty() {
                figures.push((
                    "surf-second-chart",
                    heatmap_figure(&dated(surf.horizons.second_date), &surf.second_pivot),
                ));
            }
        }
        figures
    }
}
