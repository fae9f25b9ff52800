use anyhow::{Context, Result};
use shop_backend::config::{AppConfig, DatabaseBackend};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to read configuration")?;

    match config.database_backend {
        DatabaseBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .context("failed to connect to PostgreSQL")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run migrations")?;

            println!("Migrations applied successfully");
        }
        DatabaseBackend::Memory => {
            println!("In-memory backend requires no migrations");
        }
    }

    Ok(())
}
