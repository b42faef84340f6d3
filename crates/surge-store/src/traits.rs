//! Rule store trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{DeleteOutcome, InsertOutcome};

/// Trait for rule storage backends.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared
/// by all in-flight requests.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Distinct rule types, in backend order.
    async fn list_rule_types(&self) -> Result<Vec<String>, StoreError>;

    /// All rule lines stored under `rule_type`, in backend order.
    async fn list_rules(&self, rule_type: &str) -> Result<Vec<String>, StoreError>;

    /// Insert a rule line, ignoring an existing identical pair.
    async fn insert_rule(&self, rule_type: &str, line: &str) -> Result<InsertOutcome, StoreError>;

    /// Delete every record of `rule_type`. Zero matches is not an error.
    async fn delete_rule_type(&self, rule_type: &str) -> Result<DeleteOutcome, StoreError>;

    /// Insert several lines in order.
    ///
    /// The default implementation writes line by line and stops at the first
    /// failure, leaving earlier writes in place.
    async fn insert_batch(
        &self,
        rule_type: &str,
        lines: &[String],
    ) -> Result<Vec<InsertOutcome>, StoreError> {
        let mut outcomes = Vec::with_capacity(lines.len());
        for line in lines {
            outcomes.push(self.insert_rule(rule_type, line).await?);
        }
        Ok(outcomes)
    }
}

#[async_trait]
impl<S: RuleStore + ?Sized> RuleStore for Arc<S> {
    #[inline]
    async fn list_rule_types(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_rule_types().await
    }

    #[inline]
    async fn list_rules(&self, rule_type: &str) -> Result<Vec<String>, StoreError> {
        (**self).list_rules(rule_type).await
    }

    #[inline]
    async fn insert_rule(&self, rule_type: &str, line: &str) -> Result<InsertOutcome, StoreError> {
        (**self).insert_rule(rule_type, line).await
    }

    #[inline]
    async fn delete_rule_type(&self, rule_type: &str) -> Result<DeleteOutcome, StoreError> {
        (**self).delete_rule_type(rule_type).await
    }

    #[inline]
    async fn insert_batch(
        &self,
        rule_type: &str,
        lines: &[String],
    ) -> Result<Vec<InsertOutcome>, StoreError> {
        (**self).insert_batch(rule_type, lines).await
    }
}
