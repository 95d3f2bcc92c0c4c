use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::practice_information;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Builds the connection pool and owns the practice_information DDL
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let url = url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url.as_str())
            .await?;

        info!(
            "Created database pool for: {}",
            url.path().trim_start_matches('/')
        );
        Ok(pool)
    }

    /// Create the practice_information table if it is missing.
    ///
    /// The clinician table belongs to the account system and is expected to exist.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{table}" (
                id             UUID PRIMARY KEY,
                clinician_id   UUID NOT NULL,
                practice_name  TEXT NOT NULL,
                practice_email TEXT NOT NULL,
                time_zone      TEXT NOT NULL,
                practice_logo  TEXT,
                phone_numbers  TEXT NOT NULL DEFAULT '[]',
                tele_health    BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
            table = practice_information::TABLE_NAME
        );
        sqlx::query(&ddl).execute(pool).await?;

        let index = format!(
            r#"CREATE UNIQUE INDEX IF NOT EXISTS "{table}_clinician_id_key" ON "{table}" (clinician_id)"#,
            table = practice_information::TABLE_NAME
        );
        sqlx::query(&index).execute(pool).await?;

        info!("Ensured table: {}", practice_information::TABLE_NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_requires_a_url() {
        let config = DatabaseConfig {
            url: None,
            max_connections: 1,
            connection_timeout: 1,
        };
        assert!(matches!(
            DatabaseManager::connect(&config).await,
            Err(DatabaseError::ConfigMissing("DATABASE_URL"))
        ));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_url() {
        let config = DatabaseConfig {
            url: Some("not a url".to_string()),
            max_connections: 1,
            connection_timeout: 1,
        };
        assert!(matches!(
            DatabaseManager::connect(&config).await,
            Err(DatabaseError::InvalidDatabaseUrl)
        ));
    }
}
