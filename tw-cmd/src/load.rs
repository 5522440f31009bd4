//! Load CSV exports into the store.

use log::info;
use std::path::Path;
use tw_db::Database;

/// Load whichever CSV files were given. At least one is required.
pub fn run_load(
    db_path: &Path,
    metrics: Option<&Path>,
    weather: Option<&Path>,
    surf: Option<&Path>,
) -> anyhow::Result<()> {
    if metrics.is_none() && weather.is_none() && surf.is_none() {
        anyhow::bail!("nothing to load: pass --metrics, --weather or --surf");
    }

    let db = Database::open(db_path)?;
    if let Some(path) = metrics {
        info!("Loading metrics from {}", path.display());
        db.load_metrics(&std::fs::read_to_string(path)?)?;
    }
    if let Some(path) = weather {
        info!("Loading weather from {}", path.display());
        db.load_weather(&std::fs::read_to_string(path)?)?;
    }
    if let Some(path) = surf {
        info!("Loading surf forecasts from {}", path.display());
        db.load_surf(&std::fs::read_to_string(path)?)?;
    }
    info!("Load complete. Store: {}", db_path.display());
    Ok(())
}
