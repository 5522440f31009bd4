//! Command implementations for the Tidewatch CLI.
//!
//! Provides subcommands for loading readings into the store, serving the
//! snapshot endpoint, dumping a snapshot, and running the dashboard
//! preparation against a live endpoint.

use clap::Subcommand;
use std::path::PathBuf;

pub mod load;
pub mod report;
pub mod serve;
pub mod snapshot;

/// Metrics and weather lookback used when a request does not name one.
pub const DEFAULT_LOOKBACK_HOURS: i64 = 48;

/// Longest lookback accepted from the command line or the endpoint (100 years).
pub const MAX_LOOKBACK_HOURS: i64 = 24 * 366 * 100;

#[derive(Subcommand)]
pub enum Command {
    /// Serve the snapshot JSON endpoint
    Serve {
        /// Path to the SQLite store
        #[arg(short, long, env = "TIDEWATCH_DB", default_value = "tidewatch.db")]
        db: PathBuf,

        /// Address to listen on
        #[arg(short, long, env = "TIDEWATCH_ADDR", default_value = "127.0.0.1:8080")]
        addr: String,
    },

    /// Load CSV readings into the store (upserting existing rows)
    Load {
        /// Path to the SQLite store
        #[arg(short, long, env = "TIDEWATCH_DB", default_value = "tidewatch.db")]
        db: PathBuf,

        /// Indoor metrics CSV: timestamp,temperature_c,humidity
        #[arg(short, long)]
        metrics: Option<PathBuf>,

        /// Outdoor weather CSV: timestamp,temperature,humidity,wind_speed,pressure
        #[arg(short, long)]
        weather: Option<PathBuf>,

        /// Surf forecast CSV: spot_name,duration_hours,weighted_sum,rank,collected_at
        #[arg(short, long)]
        surf: Option<PathBuf>,
    },

    /// Print the snapshot JSON the endpoint would serve
    Snapshot {
        /// Path to the SQLite store
        #[arg(short, long, env = "TIDEWATCH_DB", default_value = "tidewatch.db")]
        db: PathBuf,

        /// Hours of metrics and weather to include, counted back from the newest reading
        #[arg(
            long,
            default_value_t = DEFAULT_LOOKBACK_HOURS,
            value_parser = clap::value_parser!(i64).range(1..=MAX_LOOKBACK_HOURS)
        )]
        hours: i64,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a snapshot over HTTP and print the prepared dashboard summary
    Report {
        /// Snapshot endpoint URL
        #[arg(short, long, env = "TIDEWATCH_URL", default_value = "http://127.0.0.1:8080/api/snapshot")]
        url: String,

        /// Surf rows with rank at or above this are dropped
        #[arg(long, default_value_t = tw_data::dashboard::DEFAULT_RANK_LIMIT)]
        rank_limit: i64,

        /// Also write the Plotly figures as JSON to this file
        #[arg(short, long)]
        figures: Option<PathBuf>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve { db, addr } => serve::run_serve(db, &addr).await,
        Command::Load {
            db,
            metrics,
            weather,
            surf,
        } => load::run_load(&db, metrics.as_deref(), weather.as_deref(), surf.as_deref()),
        Command::Snapshot { db, hours, output } => {
            snapshot::run_snapshot(&db, hours, output.as_deref())
        }
        Command::Report {
            url,
            rank_limit,
            figures,
        } => report::run_report(&url, rank_limit, figures.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    fn snapshot_hours(args: &[&str]) -> Result<i64, clap::Error> {
        let cli = Cli::try_parse_from(args)?;
        match cli.command {
            Command::Snapshot { hours, .. } => Ok(hours),
            _ => panic!("expected the snapshot command"),
        }
    }

    #[test]
    fn snapshot_hours_defaults_to_lookback() {
        assert_eq!(
            snapshot_hours(&["tidewatch", "snapshot"]).unwrap(),
            DEFAULT_LOOKBACK_HOURS
        );
        assert_eq!(snapshot_hours(&["tidewatch", "snapshot", "--hours", "12"]).unwrap(), 12);
    }

    #[test]
    fn snapshot_hours_rejects_out_of_range() {
        assert!(snapshot_hours(&["tidewatch", "snapshot", "--hours", "0"]).is_err());
        assert!(snapshot_hours(&["tidewatch", "snapshot", "--hours", "-6"]).is_err());
        assert!(snapshot_hours(&["tidewatch", "snapshot", "--hours", "10000000000"]).is_err());
    }
}
