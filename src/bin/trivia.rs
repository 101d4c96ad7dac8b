use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use trivia_api::config::Settings;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the trivia API (default)
    Serve,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv to a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Cannot load settings")?;
    let pool = connect(&settings).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            run_server(pool, &settings.address(), settings.questions_per_page).await?
        }
        Commands::Import { path } => {
            import_data(&pool, &path).await?;
            pool.close().await;
        }
        Commands::Export { path } => {
            export_data(&pool, &path).await?;
            pool.close().await;
        }
    }
    Ok(())
}

async fn connect(settings: &Settings) -> anyhow::Result<SqlitePool> {
    let pool = establish_connection(
        settings.database_url.expose_secret(),
        settings.max_connections,
    )
    .await
    .context("Cannot connect to DB")?;
    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;
    Ok(pool)
}
