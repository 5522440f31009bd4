//! Tidewatch dashboard
//!
//! Indoor and outdoor readings as line charts, a same-hour comparison with
//! yesterday, and surf forecast heatmaps for the two latest run dates.
//!
//! Data flow:
//! 1. On mount (and whenever the lookback changes): fetch the snapshot JSON.
//! 2. Run `tw_data::prepare_dashboard` over it; a series with bad records
//!    drops only its own chart.
//! 3. Render each prepared figure into its container via Plotly.
//!
//! A failed fetch is logged and nothing is drawn. A response that arrives
//! after the lookback changed again is discarded.

use chrono::NaiveDate;
use dioxus::prelude::*;
use tw_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, LookbackSelector,
};
use tw_chart_ui::state::AppState;
use tw_chart_ui::{fetch, js_bridge};
use tw_core::time::format_date;
use tw_data::{prepare_dashboard, DashboardConfig, DashboardView, CHART_IDS};

/// Snapshot endpoint, overridable at build time.
const SNAPSHOT_ENDPOINT: &str = match option_env!("TIDEWATCH_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8080/api/snapshot",
};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("tidewatch-root"))
        .launch(App);
}

/// Header title and note for each chart container that has a figure.
fn sections(view: &DashboardView) -> Vec<(&'static str, String, String)> {
    let surf_date = |date: Option<NaiveDate>| {
        date.map(|d| format!("Forecast for {}", format_date(&d)))
            .unwrap_or_default()
    };
    view.figures()
        .into_iter()
        .map(|(id, _)| {
            let (title, note) = match id {
                "indoor-chart" => ("Indoor", "Temperature (°C) and relative humidity (%)".to_string()),
                "outdoor-chart" => ("Outdoor", "Temperature (°C) and relative humidity (%)".to_string()),
                "summary-chart" => ("Now vs. yesterday", "Averages for the current hour".to_string()),
                "surf-first-chart" => (
                    "Surf",
                    surf_date(view.surf.as_ref().and_then(|s| s.horizons.first_date)),
                ),
                _ => (
                    "Surf",
                    surf_date(view.surf.as_ref().and_then(|s| s.horizons.second_date)),
                ),
            };
            (id, title.to_string(), note)
        })
        .collect()
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(|| js_bridge::init_plotly());

    // ─── Effect 1: fetch and prepare, re-run when the lookback changes ───
    use_effect(move || {
        let hours = (state.lookback_hours)();
        let ticket = state.tickets.write().issue();
        // containers unmount while loading; release the old plots first
        for id in CHART_IDS {
            js_bridge::destroy_chart(id);
        }
        state.loading.set(true);
        spawn(async move {
            let url = fetch::snapshot_url(SNAPSHOT_ENDPOINT, hours);
            let result = fetch::fetch_snapshot(&url).await;
            if !state.tickets.peek().is_latest(ticket) {
                log::debug!("dropping superseded {} hour snapshot", hours);
                return;
            }
            match result {
                Ok(snapshot) => {
                    let view = prepare_dashboard(&snapshot, &DashboardConfig::default());
                    state.error_msg.set(None);
                    state.view.set(Some(view));
                }
                Err(e) => {
                    log::error!("snapshot fetch failed: {}", e);
                    state.error_msg.set(Some(e.to_string()));
                    state.view.set(None);
                }
            }
            state.loading.set(false);
        });
    });

    // ─── Effect 2: draw every figure once its container is mounted ───
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let figures = state
            .view
            .read()
            .as_ref()
            .map(DashboardView::figures)
            .unwrap_or_default();
        for id in CHART_IDS {
            if !figures.iter().any(|(drawn, _)| *drawn == id) {
                js_bridge::destroy_chart(id);
            }
        }
        for (id, figure) in &figures {
            js_bridge::render_figure(id, figure);
        }
    });

    let chart_sections = state
        .view
        .read()
        .as_ref()
        .map(sections)
        .unwrap_or_default();

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h2 { style: "margin: 8px 0;", "Tidewatch" }
            LookbackSelector {}

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                for (id, title, note) in chart_sections {
                    div {
                        key: "{id}",
                        ChartHeader { title, note }
                        ChartContainer { id: id.to_string() }
                    }
                }
            }
        }
    }
}
