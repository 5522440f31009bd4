//! Data preparation for the Tidewatch dashboard.
//!
//! This crate turns a fetched [`Snapshot`](tw_core::Snapshot) into forms
//! suitable for charting:
//! - `normalize`: raw documents into typed [`Sample`](tw_core::Sample)s
//! - `daily`: same-hour averages for today and yesterday
//! - `forecast`: the two latest forecast-run dates and their spot x hour pivots
//! - `series`: named line series for the time-series charts
//! - `plot`: declarative Plotly figures handed to the renderer
//! - `dashboard`: the whole pipeline in one call

pub mod daily;
pub mod dashboard;
pub mod forecast;
pub mod normalize;
pub mod plot;
pub mod series;

pub use daily::{aggregate_day_over_day, DailyAverage, DayLabel, DayOverDay, ReferenceHour};
pub use dashboard::{prepare_dashboard, CHART_IDS, DashboardConfig, DashboardView, SeriesView, SurfView};
pub use forecast::{forecast_horizons, ForecastCell, ForecastHorizons, ForecastPivot};
pub use normalize::normalize;
pub use series::{line_series, Channel, LinePoint, LineSeries};
