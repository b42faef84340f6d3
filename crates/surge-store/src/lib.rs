//! Rule record storage for surge-rules.
//!
//! A rule record pairs a rule type (`direct`, `proxy`, ...) with one rule
//! line such as `DOMAIN,example.com`. This crate provides the [`RuleStore`]
//! trait, an in-memory backend, a SQL backend, and the ingestion routine that
//! turns freeform text into normalized rule lines.
//!
//! # Example
//!
//! ```
//! use surge_store::{MemoryStore, RuleStore, ingest};
//!
//! # async fn example() -> Result<(), surge_store::StoreError> {
//! let store = MemoryStore::new();
//! let report = ingest(&store, "adblock", "ads.example.com\nDOMAIN-SUFFIX,tracker.net").await?;
//! assert_eq!(report.len(), 2);
//!
//! let lines = store.list_rules("adblock").await?;
//! assert!(lines.contains(&"DOMAIN,ads.example.com".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod error;
mod ingest;
mod memory;
mod record;
pub mod sql;
mod traits;

pub use cli::StoreArgs;
pub use error::StoreError;
pub use ingest::{IngestReport, ingest, normalize_line, parse_rule_lines};
pub use memory::MemoryStore;
pub use record::{DeleteOutcome, InsertOutcome, RuleRecord};
pub use traits::RuleStore;
