use super::{GiftStore, MemoryGiftStore, PostgresGiftStore};
use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

pub const MEMORY_DATABASE_URL: &str = "memory://";

pub type DbPool = DatabaseConnection;

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// Opens the configured gift store, migrating Postgres on the way.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn GiftStore>> {
    if config.url == MEMORY_DATABASE_URL {
        log::warn!("Using in-memory gift store; data is lost on restart");
        return Ok(Arc::new(MemoryGiftStore::new()));
    }

    if !config.url.starts_with("postgres://") && !config.url.starts_with("postgresql://") {
        return Err(AppError::ConfigError(format!(
            "unsupported database url scheme; expected postgres:// or {MEMORY_DATABASE_URL}"
        )));
    }

    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    log::info!("Database connected and migrated");
    Ok(Arc::new(PostgresGiftStore::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_memory_url_opens_empty_store() {
        let store = open_store(&db(MEMORY_DATABASE_URL)).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_scheme_is_config_error() {
        let result = open_store(&db("mysql://localhost/gifts")).await;
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
