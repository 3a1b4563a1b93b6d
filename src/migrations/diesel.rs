// Diesel migration runner for PostgreSQL
// Uses embedded migrations from diesel_migrations crate
// Note: diesel_migrations requires sync connections, not async

use crate::db::MIGRATIONS;
use diesel::Connection;
use diesel::PgConnection;
use diesel_migrations::MigrationHarness;
use std::error::Error;
use tracing::{debug, info};

/// Run all pending Diesel migrations
/// Returns the number of migrations applied
pub async fn run_migrations(database_url: &str) -> Result<usize, Box<dyn Error + Send + Sync>> {
    info!("[DIESEL] Starting Diesel migration process...");

    let database_url = database_url.to_string();

    // MigrationHarness is sync
    let applied_migrations =
        tokio::task::spawn_blocking(move || -> Result<usize, Box<dyn Error + Send + Sync>> {
            debug!("[DIESEL] Establishing sync connection for migrations...");

            let mut conn = PgConnection::establish(&database_url)
                .map_err(|e| format!("Failed to establish sync connection: {}", e))?;

            let pending_count = conn
                .pending_migrations(MIGRATIONS)
                .map_err(|e| format!("Failed to check pending migrations: {}", e))?
                .len();

            if pending_count == 0 {
                debug!("[DIESEL] No pending migrations found");
                return Ok(0);
            }

            info!("[DIESEL] Found {} pending migrations", pending_count);

            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| format!("Failed to run migrations: {}", e))?;

            for migration in &applied {
                debug!("[DIESEL] Applied migration: {}", migration);
            }

            Ok(applied.len())
        })
        .await
        .map_err(|e| format!("Migration task panicked: {}", e))??;

    info!("[DIESEL] Diesel migration process completed successfully");
    Ok(applied_migrations)
}

/// Applied and pending migrations, without applying anything
pub async fn check_migration_status(
    database_url: &str,
) -> Result<MigrationStatus, Box<dyn Error + Send + Sync>> {
    let database_url = database_url.to_string();

    let status = tokio::task::spawn_blocking(
        move || -> Result<MigrationStatus, Box<dyn Error + Send + Sync>> {
            let mut conn = PgConnection::establish(&database_url)
                .map_err(|e| format!("Failed to establish sync connection: {}", e))?;

            let applied = conn
                .applied_migrations()
                .map_err(|e| format!("Failed to get applied migrations: {}", e))?;

            let pending = conn
                .pending_migrations(MIGRATIONS)
                .map_err(|e| format!("Failed to get pending migrations: {}", e))?;

            Ok(MigrationStatus {
                applied_migrations: applied.iter().map(|m| m.to_string()).collect(),
                pending_migrations: pending.iter().map(|m| m.name().to_string()).collect(),
            })
        },
    )
    .await
    .map_err(|e| format!("Status check task panicked: {}", e))??;

    Ok(status)
}

/// Migration status information
#[derive(Debug, Default)]
pub struct MigrationStatus {
    pub applied_migrations: Vec<String>,
    pub pending_migrations: Vec<String>,
}

impl MigrationStatus {
    pub fn is_up_to_date(&self) -> bool {
        self.pending_migrations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_up_to_date() {
        let mut status = MigrationStatus::default();
        assert!(status.is_up_to_date());

        status
            .pending_migrations
            .push("2025-01-15-000000_create_core_tables".to_string());
        assert!(!status.is_up_to_date());
    }
}
