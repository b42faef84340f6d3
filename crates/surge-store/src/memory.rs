//! In-memory rule store.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::record::{DeleteOutcome, InsertOutcome, RuleRecord};
use crate::traits::RuleStore;

/// Rule store kept in process memory.
///
/// Records keep insertion order. Suitable for tests and throwaway
/// deployments; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<RuleRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records (duplicates are dropped).
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RuleRecord>,
    {
        let mut unique: Vec<RuleRecord> = Vec::new();
        for record in records {
            if !unique.contains(&record) {
                unique.push(record);
            }
        }
        Self {
            records: RwLock::new(unique),
        }
    }

    /// Total number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RuleStore for MemoryStore {
    async fn list_rule_types(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records.read();
        let mut types: Vec<String> = Vec::new();
        for record in records.iter() {
            if !types.iter().any(|t| t == &record.rule) {
                types.push(record.rule.clone());
            }
        }
        Ok(types)
    }

    async fn list_rules(&self, rule_type: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.rule == rule_type)
            .map(|r| r.url.clone())
            .collect())
    }

    async fn insert_rule(&self, rule_type: &str, line: &str) -> Result<InsertOutcome, StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.rule == rule_type && r.url == line) {
            return Ok(InsertOutcome::Ignored);
        }
        records.push(RuleRecord::new(rule_type, line));
        Ok(InsertOutcome::Inserted)
    }

    async fn delete_rule_type(&self, rule_type: &str) -> Result<DeleteOutcome, StoreError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.rule != rule_type);
        Ok(DeleteOutcome {
            deleted: (before - records.len()) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.insert_rule("direct", "DOMAIN,a.com").await.unwrap();
        store.insert_rule("direct", "DOMAIN,b.com").await.unwrap();
        store.insert_rule("proxy", "DOMAIN,c.com").await.unwrap();

        assert_eq!(
            store.list_rules("direct").await.unwrap(),
            vec!["DOMAIN,a.com", "DOMAIN,b.com"]
        );
        assert_eq!(
            store.list_rule_types().await.unwrap(),
            vec!["direct", "proxy"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_is_ignored() {
        let store = MemoryStore::new();
        let first = store.insert_rule("direct", "DOMAIN,a.com").await.unwrap();
        let second = store.insert_rule("direct", "DOMAIN,a.com").await.unwrap();

        assert_eq!(first, InsertOutcome::Inserted);
        assert_eq!(second, InsertOutcome::Ignored);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_same_line_different_types() {
        let store = MemoryStore::new();
        store.insert_rule("direct", "DOMAIN,a.com").await.unwrap();
        let outcome = store.insert_rule("proxy", "DOMAIN,a.com").await.unwrap();
        assert!(outcome.is_inserted());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_rule_type() {
        let store = MemoryStore::from_records([
            RuleRecord::new("adblock", "DOMAIN,ads.com"),
            RuleRecord::new("adblock", "DOMAIN,track.com"),
            RuleRecord::new("direct", "DOMAIN,a.com"),
        ]);

        let outcome = store.delete_rule_type("adblock").await.unwrap();
        assert_eq!(outcome.deleted, 2);
        assert!(store.list_rules("adblock").await.unwrap().is_empty());

        let outcome = store.delete_rule_type("adblock").await.unwrap();
        assert_eq!(outcome.deleted, 0);
    }
}
