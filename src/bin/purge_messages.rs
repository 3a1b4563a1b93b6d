// Deletes every chat message. No confirmation, no dry run.
//
// Usage: purge-messages [ENV_FILE]   (default: .env.local)

use std::sync::Arc;

use anyhow::Context;
use mydouble_backend::{
    app_config,
    db::{create_diesel_pool, mask_connection_string, DieselDatabaseConfig, PgStore, Store},
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| app_config::LOCAL_ENV_FILE.to_string());

    app_config::load_env_file(&env_file).with_context(|| format!("Failed to read {}", env_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mydouble_backend=info".into()),
        )
        .init();

    let config = app_config::config()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    info!("Connecting to {}", mask_connection_string(&config.database.url));

    let pool = create_diesel_pool(DieselDatabaseConfig::from_app_config(config))
        .await
        .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    let deleted = store
        .delete_all_messages()
        .await
        .context("Failed to delete messages")?;

    println!("{} messages supprimés.", deleted);
    Ok(())
}
