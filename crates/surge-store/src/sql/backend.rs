//! SQL rule store backend.

use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::record::{DeleteOutcome, InsertOutcome};
use crate::traits::RuleStore;

use super::config::SqlStoreConfig;
use super::queries;

/// Database type enum for query selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL database.
    PostgreSQL,
    /// MySQL/MariaDB database.
    MySQL,
    /// SQLite database.
    SQLite,
}

impl DatabaseType {
    /// Detect database type from URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
            Some(Self::MySQL)
        } else if url.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    fn select_rules(self) -> &'static str {
        match self {
            Self::PostgreSQL => queries::SELECT_RULES_PG,
            Self::MySQL | Self::SQLite => queries::SELECT_RULES,
        }
    }

    fn insert_rule(self) -> &'static str {
        match self {
            Self::PostgreSQL => queries::INSERT_RULE_PG,
            Self::MySQL => queries::INSERT_RULE_MYSQL,
            Self::SQLite => queries::INSERT_RULE_SQLITE,
        }
    }

    fn delete_rule_type(self) -> &'static str {
        match self {
            Self::PostgreSQL => queries::DELETE_RULE_TYPE_PG,
            Self::MySQL | Self::SQLite => queries::DELETE_RULE_TYPE,
        }
    }

    /// Reject values the schema would not store intact.
    ///
    /// `INSERT IGNORE` turns MySQL's "data too long" error into a warning and
    /// truncates, so oversized values are refused before the write.
    pub(crate) fn check_lengths(self, rule_type: &str, line: &str) -> Result<(), StoreError> {
        if self != Self::MySQL {
            return Ok(());
        }
        if rule_type.chars().count() > queries::MYSQL_RULE_MAX_CHARS {
            return Err(StoreError::backend(format!(
                "rule type longer than {} characters",
                queries::MYSQL_RULE_MAX_CHARS
            )));
        }
        if line.chars().count() > queries::MYSQL_URL_MAX_CHARS {
            return Err(StoreError::backend(format!(
                "rule line longer than {} characters",
                queries::MYSQL_URL_MAX_CHARS
            )));
        }
        Ok(())
    }

    fn schema(self) -> &'static str {
        match self {
            Self::MySQL => queries::SCHEMA_MYSQL,
            Self::PostgreSQL | Self::SQLite => queries::SCHEMA,
        }
    }
}

/// SQL-backed rule store.
///
/// Supports PostgreSQL, MySQL, and SQLite through SQLx.
pub struct SqlRuleStore {
    pool: AnyPool,
    db_type: DatabaseType,
    config: SqlStoreConfig,
}

impl SqlRuleStore {
    /// Connect to the database and, if configured, create the schema.
    pub async fn connect(config: SqlStoreConfig) -> Result<Self, StoreError> {
        // Install database drivers for the "any" pool
        sqlx::any::install_default_drivers();

        let db_type = DatabaseType::from_url(&config.database_url)
            .ok_or_else(|| StoreError::UnsupportedUrl(redact_url(&config.database_url)))?;

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .connect(&config.database_url)
            .await?;

        let store = Self {
            pool,
            db_type,
            config,
        };

        if store.config.init_schema {
            store.init_schema().await?;
        }

        info!(
            db_type = ?store.db_type,
            max_connections = store.config.max_connections,
            atomic_batches = store.config.atomic_batches,
            "rule store connected"
        );
        Ok(store)
    }

    /// Create the rules table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(self.db_type.schema())
            .execute(&self.pool)
            .await?;
        debug!("rules schema ensured");
        Ok(())
    }

    /// Get the connection pool (for advanced usage).
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get database type.
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }

    /// Whether insert batches run inside one transaction.
    pub fn atomic_batches(&self) -> bool {
        self.config.atomic_batches
    }

    #[inline]
    fn outcome(rows_affected: u64) -> InsertOutcome {
        if rows_affected > 0 {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::Ignored
        }
    }
}

#[async_trait]
impl RuleStore for SqlRuleStore {
    async fn list_rule_types(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(queries::SELECT_RULE_TYPES)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("rule").map_err(StoreError::from))
            .collect()
    }

    async fn list_rules(&self, rule_type: &str) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query(self.db_type.select_rules())
            .bind(rule_type)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("url").map_err(StoreError::from))
            .collect()
    }

    async fn insert_rule(&self, rule_type: &str, line: &str) -> Result<InsertOutcome, StoreError> {
        self.db_type.check_lengths(rule_type, line)?;
        let result = sqlx::query(self.db_type.insert_rule())
            .bind(rule_type)
            .bind(line)
            .execute(&self.pool)
            .await?;
        Ok(Self::outcome(result.rows_affected()))
    }

    async fn delete_rule_type(&self, rule_type: &str) -> Result<DeleteOutcome, StoreError> {
        let result = sqlx::query(self.db_type.delete_rule_type())
            .bind(rule_type)
            .execute(&self.pool)
            .await?;
        Ok(DeleteOutcome {
            deleted: result.rows_affected(),
        })
    }

    async fn insert_batch(
        &self,
        rule_type: &str,
        lines: &[String],
    ) -> Result<Vec<InsertOutcome>, StoreError> {
        let mut outcomes = Vec::with_capacity(lines.len());

        if !self.config.atomic_batches {
            for line in lines {
                outcomes.push(self.insert_rule(rule_type, line).await?);
            }
            return Ok(outcomes);
        }

        for line in lines {
            self.db_type.check_lengths(rule_type, line)?;
        }

        // Dropping the transaction on error rolls back the whole batch
        let mut tx = self.pool.begin().await?;
        let query = self.db_type.insert_rule();
        for line in lines {
            let result = sqlx::query(query)
                .bind(rule_type)
                .bind(line.as_str())
                .execute(&mut *tx)
                .await?;
            outcomes.push(Self::outcome(result.rows_affected()));
        }
        tx.commit().await?;
        Ok(outcomes)
    }
}

/// Strip credentials from a URL before it is logged or reported.
pub(crate) fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

// Debug implementation (don't leak credentials)
impl std::fmt::Debug for SqlRuleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlRuleStore")
            .field("db_type", &self.db_type)
            .field("max_connections", &self.config.max_connections)
            .field("atomic_batches", &self.config.atomic_batches)
            .finish_non_exhaustive()
    }
}
