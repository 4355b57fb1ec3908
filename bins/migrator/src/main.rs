//! Posts table setup for Postagram.
//!
//! Usage:
//!   migrator         - Create the configured posts table if missing
//!   migrator print   - Print the DDL without connecting

use anyhow::Context;
use postagram_db::schema::create_posts_table_sql;
use postagram_db::{connect, ensure_posts_table};
use postagram_shared::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "postagram=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let table = &config.record_store.table;

    if std::env::args().nth(1).as_deref() == Some("print") {
        println!("{}", create_posts_table_sql(table)?);
        return Ok(());
    }

    let url = config
        .record_store
        .database_url
        .as_deref()
        .context("record_store.database_url is required to run migrations")?;
    let db = connect(url, 1).await?;
    ensure_posts_table(&db, table).await?;

    Ok(())
}
