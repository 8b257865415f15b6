mod aggregator;
mod client;
mod config;
mod error;
mod models;
mod report;
mod window;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::aggregator::{window_total, VipQuotaTable};
use crate::config::QuotaArgs;
use crate::report::WindowReport;
use crate::window::Window;

/// A command line tool for rybit quota calculation
#[derive(Parser)]
#[command(name = "rqt", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// calculate quota in 24 hours and 30 days according your vip level
    Quota(QuotaArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    // before the subscriber, so RUST_LOG from .env applies
    config::load_dotenv();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Cli { cmd } = Cli::parse();
    let Command::Quota(args) = cmd;

    quota(args).await
}

async fn quota(args: QuotaArgs) -> eyre::Result<()> {
    let table = VipQuotaTable::default();
    let cfg = config::load(args, &table)?;

    let records = client::fetch_deposits(&cfg.api_url, &cfg.authorization).await?;

    let now = Utc::now();
    let classified = window::classify(&records, now, &cfg.target_asset);

    for window in Window::ALL {
        let in_window = classified.records(window);
        info!(
            "{} window: {} deposits, total {}",
            window.label(),
            in_window.len(),
            window_total(in_window)?
        );

        let report = WindowReport::build(window, &classified, &cfg.ceilings, &cfg.timezone)?;
        print!("{}", report.render());
    }

    Ok(())
}
