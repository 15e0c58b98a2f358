//! admin-bulk - bulk action service for the NGO administration back-end
//!
//! `serve` runs the HTTP API, `worker` consumes the Redis job queue and `migrate`
//! prepares the database.

#![allow(missing_docs)]

use admin_bulk::config::Config;
use admin_bulk::storage::database::Database;
use admin_bulk::utils::logging::init_logging;
use admin_bulk::{run_server, run_worker};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "admin-bulk", version, about = "Bulk action service for the admin back-end")]
struct Cli {
    /// Path to the YAML configuration file; environment defaults apply when it is missing
    #[arg(long, short, env = "ADMIN_CONFIG", default_value = "config/admin.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Run a standalone worker against the Redis queue
    Worker,
    /// Apply pending database migrations and exit
    Migrate,
}

async fn load_config(path: &Path) -> anyhow::Result<Config> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))
    } else {
        Config::from_env().context("loading configuration from environment")
    }
}

async fn migrate(config: &Config) -> anyhow::Result<()> {
    let db = Database::new(&config.storage().database)
        .await
        .context("connecting to database")?;
    db.migrate().await.context("running migrations")?;
    info!("Migrations applied");
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config).await?;
    init_logging(config.logging())?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config).await?,
        Command::Worker => run_worker(config).await?,
        Command::Migrate => migrate(&config).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            // Logging may not be initialized yet
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
