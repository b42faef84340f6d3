//! SQL statements for the supported databases.

/// Distinct rule types (all databases).
pub const SELECT_RULE_TYPES: &str = "SELECT DISTINCT rule FROM rules";

/// Rule lines of one type (PostgreSQL).
pub const SELECT_RULES_PG: &str = "SELECT url FROM rules WHERE rule = $1";

/// Rule lines of one type (MySQL/SQLite).
pub const SELECT_RULES: &str = "SELECT url FROM rules WHERE rule = ?";

/// Insert-or-ignore (SQLite).
pub const INSERT_RULE_SQLITE: &str = "INSERT OR IGNORE INTO rules (rule, url) VALUES (?, ?)";

/// Insert-or-ignore (MySQL).
pub const INSERT_RULE_MYSQL: &str = "INSERT IGNORE INTO rules (rule, url) VALUES (?, ?)";

/// Insert-or-ignore (PostgreSQL).
pub const INSERT_RULE_PG: &str =
    "INSERT INTO rules (rule, url) VALUES ($1, $2) ON CONFLICT DO NOTHING";

/// Delete a rule type (PostgreSQL).
pub const DELETE_RULE_TYPE_PG: &str = "DELETE FROM rules WHERE rule = $1";

/// Delete a rule type (MySQL/SQLite).
pub const DELETE_RULE_TYPE: &str = "DELETE FROM rules WHERE rule = ?";

/// Schema (SQLite/PostgreSQL).
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rules (
    rule TEXT NOT NULL,
    url TEXT NOT NULL,
    UNIQUE (rule, url)
)
"#;

/// Column limits of [`SCHEMA_MYSQL`], in characters.
pub const MYSQL_RULE_MAX_CHARS: usize = 255;
pub const MYSQL_URL_MAX_CHARS: usize = 512;

/// Schema (MySQL). Unique keys need bounded column lengths.
pub const SCHEMA_MYSQL: &str = r#"
CREATE TABLE IF NOT EXISTS rules (
    rule VARCHAR(255) NOT NULL,
    url VARCHAR(512) NOT NULL,
    UNIQUE KEY uniq_rule_url (rule, url)
)
"#;
