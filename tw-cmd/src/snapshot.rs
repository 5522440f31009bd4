//! Dump the snapshot document without starting the server.

use log::info;
use std::path::Path;
use tw_db::Database;

pub fn run_snapshot(db_path: &Path, hours: i64, output: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = Database::open(db_path)?.query_snapshot(hours)?;
    let body = serde_json::to_string_pretty(&snapshot)?;
    match output {
        Some(path) => {
            std::fs::write(path, body)?;
            info!(
                "Wrote snapshot ({} metrics, {} weather, {} surf) to {}",
                snapshot.metrics.len(),
                snapshot.weather.len(),
                snapshot.surf.len(),
                path.display()
            );
        }
        None => println!("{}", body),
    }
    Ok(())
}
