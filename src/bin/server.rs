use anyhow::Context;
use secrecy::ExposeSecret;
use trivia_api::config::Settings;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::{server::app::run_server, telemetry::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Cannot load settings")?;
    let pool = establish_connection(
        settings.database_url.expose_secret(),
        settings.max_connections,
    )
    .await
    .context("Cannot connect to DB")?;
    run_migrations(&pool).await?;
    run_server(pool, &settings.address(), settings.questions_per_page).await
}
