// Migration orchestrator for the MyDouble backend
// Embedded in the application binary for distroless container compatibility

pub mod diesel;

use crate::app_config::AppConfig;
use std::error::Error;
use tracing::{error, info};

pub use self::diesel::{check_migration_status, MigrationStatus};

/// Check if migrations should run based on configuration
pub fn should_run_migrations(config: &AppConfig) -> bool {
    !config.features.disable_embedded_migrations
}

/// Runs the embedded PostgreSQL migrations against the configured database
pub async fn run_all_migrations(config: &AppConfig) -> Result<usize, Box<dyn Error + Send + Sync>> {
    info!(
        "[MIGRATIONS] Starting migration process for environment: {}",
        config.server.environment
    );

    match diesel::run_migrations(&config.database.url).await {
        Ok(0) => {
            info!("[MIGRATIONS] ✓ Diesel migrations up to date");
            Ok(0)
        },
        Ok(applied_count) => {
            info!("[MIGRATIONS] ✓ Applied {} Diesel migrations", applied_count);
            Ok(applied_count)
        },
        Err(e) => {
            error!("[MIGRATIONS] ✗ Diesel migration failed: {}", e);
            Err(format!("Diesel migration failed: {}", e).into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_run_migrations_flag() {
        let mut config = AppConfig::for_tests();
        config.features.disable_embedded_migrations = true;
        assert!(!should_run_migrations(&config));

        config.features.disable_embedded_migrations = false;
        assert!(should_run_migrations(&config));
    }
}
