//! User Service Library
//!
//! This crate provides user management: the repository contract with its
//! PostgreSQL and in-memory implementations, the user service that derives
//! ages, and the database connection and migrations.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{MemoryUserStore, UserStore};
use crate::service::{UserManager, UserService};

/// Connect to the database and build the user service on top of it.
pub async fn connect(config: &UserServiceConfig) -> Result<Arc<dyn UserService>, DbErr> {
    let db = if config.auto_migrate {
        Database::connect(&config.database).await?
    } else {
        Database::connect_without_migrations(&config.database).await?
    };
    info!("User service connected to database");

    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    Ok(Arc::new(UserManager::new(user_repo)))
}

/// Build a user service backed by process memory (nothing is persisted).
pub fn in_memory() -> Arc<dyn UserService> {
    Arc::new(UserManager::new(Arc::new(MemoryUserStore::new())))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
