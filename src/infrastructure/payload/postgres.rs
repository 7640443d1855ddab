//! PostgreSQL payload store implementation with connection pooling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use crate::domain::hash::QueryHash;
use crate::domain::payload::{PayloadStore, ResponseRecord};
use crate::domain::DomainError;

const STORE_NAME: &str = "PostgreSQL";

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/semcache".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

/// PostgreSQL payload store.
///
/// One row per write; duplicate hashes accumulate and reads take the oldest
/// matching row, so repeated writes of the same query keep serving the
/// first stored response.
pub struct PostgresPayloadStore {
    pool: PgPool,
    table_name: String,
}

impl std::fmt::Debug for PostgresPayloadStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresPayloadStore")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl PostgresPayloadStore {
    /// Creates a new store with the given pool and table name
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store with connection pooling
    pub async fn connect(
        config: &PostgresConfig,
        table_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::configuration(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::new(pool, table_name))
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Ensures the payload table and its hash index exist
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id BIGSERIAL PRIMARY KEY,
                query_hash VARCHAR(64) NOT NULL,
                query TEXT NOT NULL,
                response TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            table = self.table_name
        );

        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::configuration(format!("Failed to create table: {}", e))
            })?;

        let index = format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_query_hash ON {table} (query_hash)",
            table = self.table_name
        );

        sqlx::query(&index)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::configuration(format!("Failed to create index: {}", e))
            })?;

        Ok(())
    }
}

#[async_trait]
impl PayloadStore for PostgresPayloadStore {
    async fn put(&self, record: ResponseRecord) -> Result<(), DomainError> {
        let query = format!(
            "INSERT INTO {} (query_hash, query, response, created_at) VALUES ($1, $2, $3, $4)",
            self.table_name
        );

        sqlx::query(&query)
            .bind(record.query_hash().as_str())
            .bind(record.query())
            .bind(record.response())
            .bind(record.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::payload_write(STORE_NAME, e.to_string()))?;

        Ok(())
    }

    async fn get(&self, hash: &QueryHash) -> Result<Option<ResponseRecord>, DomainError> {
        let query = format!(
            "SELECT query_hash, query, response, created_at FROM {} \
             WHERE query_hash = $1 ORDER BY created_at, id LIMIT 1",
            self.table_name
        );

        let row = sqlx::query(&query)
            .bind(hash.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let query_hash: String = row
            .try_get("query_hash")
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;
        let query_text: String = row
            .try_get("query")
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;
        let response: String = row
            .try_get("response")
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| DomainError::payload_read(STORE_NAME, e.to_string()))?;

        Ok(Some(ResponseRecord::with_created_at(
            QueryHash::from_hex(query_hash),
            query_text,
            response,
            created_at,
        )))
    }

    fn store_name(&self) -> &str {
        STORE_NAME
    }
}
