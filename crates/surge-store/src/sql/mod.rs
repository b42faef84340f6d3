//! SQL rule store.
//!
//! Stores rule records in PostgreSQL, MySQL or SQLite through the SQLx
//! `Any` driver.
//!
//! # Example
//!
//! ```ignore
//! use surge_store::sql::{SqlRuleStore, SqlStoreConfig};
//!
//! let store = SqlRuleStore::connect(
//!     SqlStoreConfig::new("sqlite:rules.db?mode=rwc").max_connections(4)
//! ).await?;
//! ```
//!
//! # Database Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS rules (
//!     rule TEXT NOT NULL,
//!     url TEXT NOT NULL,
//!     UNIQUE (rule, url)
//! );
//! ```
//!
//! The uniqueness constraint is what turns inserts into insert-or-ignore.
//! [`SqlRuleStore::init_schema`] creates the table when it is missing.

mod backend;
mod config;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::{DatabaseType, SqlRuleStore};
pub use config::SqlStoreConfig;
