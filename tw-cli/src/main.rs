//! Tidewatch CLI - load readings, serve snapshots, preview the dashboard.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tidewatch",
    version,
    about = "Personal weather and surf dashboard toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: tw_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("tidewatch {}", env!("CARGO_PKG_VERSION"));
    tw_cmd::run(cli.command).await
}
