//! Rule ingestion: freeform text to normalized rule lines.

use surge_core::DEFAULT_RULE_PREFIX;
use tracing::debug;

use crate::error::StoreError;
use crate::record::InsertOutcome;
use crate::traits::RuleStore;

/// Normalize one raw input line.
///
/// Returns `None` for blank lines. A line containing a comma is already a
/// `TYPE,VALUE` rule and is kept verbatim; anything else gets the `DOMAIN,`
/// prefix.
pub fn normalize_line(raw: &str) -> Option<String> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }
    if line.contains(',') {
        Some(line.to_string())
    } else {
        Some(format!("{DEFAULT_RULE_PREFIX}{line}"))
    }
}

/// Split `text` on `\n` and normalize every non-blank line, keeping order.
pub fn parse_rule_lines(text: &str) -> Vec<String> {
    text.split('\n').filter_map(normalize_line).collect()
}

/// Per-line results of one ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Rule type the batch was written under.
    pub rule_type: String,
    /// Every processed line with its outcome, in input order.
    pub entries: Vec<(String, InsertOutcome)>,
}

impl IngestReport {
    /// Number of processed lines, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines that produced a new row.
    pub fn inserted(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_inserted()).count()
    }

    /// Lines that already existed.
    pub fn ignored(&self) -> usize {
        self.len() - self.inserted()
    }

    /// Plain-text receipt listing every processed line under a header.
    pub fn receipt(&self) -> String {
        if self.entries.is_empty() {
            return "no new rules inserted".to_string();
        }
        let mut out = format!("{} rules inserted:\n", self.rule_type);
        for (line, _) in &self.entries {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Parse `text` and write every rule line under `rule_type`.
///
/// Any storage error aborts the batch; whether earlier lines stay written
/// depends on the store's [`RuleStore::insert_batch`].
pub async fn ingest<S>(store: &S, rule_type: &str, text: &str) -> Result<IngestReport, StoreError>
where
    S: RuleStore + ?Sized,
{
    let lines = parse_rule_lines(text);
    if lines.is_empty() {
        return Ok(IngestReport {
            rule_type: rule_type.to_string(),
            entries: Vec::new(),
        });
    }

    let outcomes = store.insert_batch(rule_type, &lines).await?;
    if outcomes.len() != lines.len() {
        return Err(StoreError::backend(format!(
            "store reported {} outcomes for {} rule lines",
            outcomes.len(),
            lines.len()
        )));
    }
    let report = IngestReport {
        rule_type: rule_type.to_string(),
        entries: lines.into_iter().zip(outcomes).collect(),
    };
    debug!(
        rule_type,
        inserted = report.inserted(),
        ignored = report.ignored(),
        "rules ingested"
    );
    Ok(report)
}
