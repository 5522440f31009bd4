//! Fetch a live snapshot and print what the dashboard would show.
//!
//! Useful for checking the endpoint and the preparation pass from a
//! terminal, without a browser.

use log::info;
use std::collections::BTreeMap;
use std::path::Path;
use tw_core::{Snapshot, TidewatchError};
use tw_data::{prepare_dashboard, DailyAverage, DashboardConfig, DashboardView, DayOverDay};

async fn fetch_snapshot(url: &str) -> Result<Snapshot, TidewatchError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()
        .map_err(|e| TidewatchError::FetchFailure(e.to_string()))?;
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TidewatchError::FetchFailure(e.to_string()))?;
    if !response.status().is_success() {
        return Err(TidewatchError::FetchFailure(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }
    let body = response
        .text()
        .await
        .map_err(|e| TidewatchError::FetchFailure(e.to_string()))?;
    Snapshot::from_json(&body)
}

fn format_value(v: Option<f64>) -> String {
    v.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn format_average(avg: &Option<DailyAverage>) -> String {
    match avg {
        Some(a) => format!("{} / {}", format_value(a.avg_metric), format_value(a.avg_secondary)),
        None => "no data".to_string(),
    }
}

fn format_day_over_day(name: &str, dod: &DayOverDay) -> String {
    match &dod.reference {
        Some(r) => format!(
            "{:<8} {:02}:00  today ({}) {}  yesterday ({}) {}",
            name,
            r.current_hour,
            r.max_date,
            format_average(&dod.today),
            r.prev_date,
            format_average(&dod.yesterday)
        ),
        None => format!("{:<8} no readings", name),
    }
}

/// Render the prepared view as the lines printed by `report`.
pub fn summary_lines(view: &DashboardView) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, series) in [("indoor", &view.indoor), ("outdoor", &view.outdoor)] {
        match series {
            Some(s) => lines.push(format_day_over_day(name, &s.day_over_day)),
            None => lines.push(format!("{:<8} unavailable (malformed records)", name)),
        }
    }
    match &view.surf {
        Some(surf) => {
            for (date, pivot) in [
                (surf.horizons.first_date, &surf.first_pivot),
                (surf.horizons.second_date, &surf.second_pivot),
            ] {
                let Some(date) = date else {
                    lines.push("surf     no forecast for this horizon".to_string());
                    continue;
                };
                lines.push(format!(
                    "surf     {}  {} spots x {} hours",
                    date,
                    pivot.rows.len(),
                    pivot.columns.len()
                ));
            }
        }
        None => lines.push("surf     unavailable (malformed records)".to_string()),
    }
    lines
}

pub async fn run_report(url: &str, rank_limit: i64, figures: Option<&Path>) -> anyhow::Result<()> {
    info!("Fetching snapshot from {}", url);
    let snapshot = match fetch_snapshot(url).await {
        Ok(s) => s,
        Err(e) => {
            // nothing to render without a snapshot
            log::error!("{}", e);
            return Err(e.into());
        }
    };

    let config = DashboardConfig {
        rank_limit,
        ..DashboardConfig::default()
    };
    let view = prepare_dashboard(&snapshot, &config);
    for line in summary_lines(&view) {
        println!("{}", line);
    }

    if let Some(path) = figures {
        let figures: BTreeMap<&str, _> = view.figures().into_iter().collect();
        std::fs::write(path, serde_json::to_string_pretty(&figures)?)?;
        info!("Wrote {} figures to {}", figures.len(), path.display());
    }
    Ok(())
}
