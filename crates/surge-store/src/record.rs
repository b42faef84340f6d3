//! Rule record and write outcome types.

use serde::{Deserialize, Serialize};

/// One stored `(rule, url)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Rule type the line belongs to.
    pub rule: String,
    /// Rule line, `TYPE,VALUE[,...]`.
    pub url: String,
}

impl RuleRecord {
    #[inline]
    pub fn new(rule: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            url: url.into(),
        }
    }
}

/// Result of a single insert-or-ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Inserted,
    /// The pair already existed; nothing was written.
    Ignored,
}

impl InsertOutcome {
    #[inline]
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Result of deleting a rule type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    /// Number of rows removed (may be zero).
    pub deleted: u64,
}
