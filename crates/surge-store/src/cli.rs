//! CLI module for surge-store.
//!
//! Manages rule records directly in the database, without going through the
//! HTTP server. Usable as a standalone binary or as the `store` subcommand of
//! the main surge-rules CLI.
//!
//! # Usage
//!
//! ```bash
//! # Initialize database schema
//! surge-store init -d sqlite:rules.db?mode=rwc
//!
//! # Import rules from a file (or `-` for stdin)
//! surge-store add -d sqlite:rules.db -r proxy rules.txt
//!
//! # List rule types and rules
//! surge-store types -d sqlite:rules.db
//! surge-store list -d sqlite:rules.db -r proxy --format text
//!
//! # Remove a rule type
//! surge-store delete -d sqlite:rules.db -r proxy
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use surge_core::DEFAULT_RULE_TYPE;
use tabled::{Table, Tabled};

use crate::sql::{SqlRuleStore, SqlStoreConfig};
use crate::{RuleRecord, RuleStore, ingest};

/// Rule store management CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "surge-store", version, about = "Manage stored surge rules")]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: StoreCommands,
}

/// Store CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum StoreCommands {
    /// Initialize database schema.
    Init {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,
    },

    /// List distinct rule types.
    Types {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,
    },

    /// List rules of one type.
    List {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Rule type.
        #[arg(short, long, default_value = DEFAULT_RULE_TYPE)]
        rule: String,

        /// Output format (table, json, text).
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Import rules, one per line, from a file or stdin.
    Add {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Rule type to import into.
        #[arg(short, long, default_value = DEFAULT_RULE_TYPE)]
        rule: String,

        /// Input file; `-` or omitted reads stdin.
        input: Option<PathBuf>,
    },

    /// Delete a rule type and all of its rules.
    Delete {
        /// Database connection URL.
        #[arg(short, long, env = "DATABASE_URL")]
        database: String,

        /// Rule type to delete.
        #[arg(short, long)]
        rule: String,
    },
}

#[derive(Tabled)]
struct RuleDisplay {
    #[tabled(rename = "Rule Type")]
    rule: String,
    #[tabled(rename = "Rule")]
    url: String,
}

#[derive(Tabled)]
struct TypeDisplay {
    #[tabled(rename = "Rule Type")]
    rule: String,
    #[tabled(rename = "Rules")]
    count: usize,
}

/// Run the store CLI with the given arguments.
pub async fn run(args: StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        StoreCommands::Init { database } => {
            let store = connect(&database).await?;
            store.init_schema().await?;
            println!("Database schema initialized successfully.");
            Ok(())
        }
        StoreCommands::Types { database } => list_types(&database).await,
        StoreCommands::List {
            database,
            rule,
            format,
        } => list_rules(&database, &rule, &format).await,
        StoreCommands::Add {
            database,
            rule,
            input,
        } => add_rules(&database, &rule, input).await,
        StoreCommands::Delete { database, rule } => {
            let store = connect(&database).await?;
            let outcome = store.delete_rule_type(&rule).await?;
            if outcome.deleted > 0 {
                println!("Deleted {} rule(s) of type \"{}\".", outcome.deleted, rule);
            } else {
                println!("No rules found for type \"{}\".", rule);
            }
            Ok(())
        }
    }
}

/// Connect without touching the schema; `init` creates it explicitly.
async fn connect(url: &str) -> Result<SqlRuleStore, Box<dyn std::error::Error>> {
    let config = SqlStoreConfig::new(url)
        .max_connections(1)
        .init_schema(false);
    Ok(SqlRuleStore::connect(config).await?)
}

async fn list_types(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect(url).await?;
    let types = store.list_rule_types().await?;

    if types.is_empty() {
        println!("No rule types found.");
        return Ok(());
    }

    let mut rows = Vec::with_capacity(types.len());
    for rule in types {
        let count = store.list_rules(&rule).await?.len();
        rows.push(TypeDisplay { rule, count });
    }
    println!("{}", Table::new(rows));
    Ok(())
}

async fn list_rules(url: &str, rule: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect(url).await?;
    let lines = store.list_rules(rule).await?;

    if lines.is_empty() {
        println!("No rules found for type \"{}\".", rule);
        return Ok(());
    }

    match format {
        "json" => {
            let records: Vec<RuleRecord> = lines
                .into_iter()
                .map(|line| RuleRecord::new(rule, line))
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        "text" => {
            for line in lines {
                println!("{}", line);
            }
        }
        _ => {
            let rows: Vec<RuleDisplay> = lines
                .into_iter()
                .map(|url| RuleDisplay {
                    rule: rule.to_string(),
                    url,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
    }
    Ok(())
}

async fn add_rules(
    url: &str,
    rule: &str,
    input: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let store = connect(url).await?;
    let report = ingest(&store, rule, &text).await?;

    print!("{}", report.receipt());
    if !report.is_empty() {
        println!();
        println!(
            "{} inserted, {} already present.",
            report.inserted(),
            report.ignored()
        );
    }
    Ok(())
}

fn read_input(input: Option<PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        let args = StoreArgs::try_parse_from([
            "surge-store",
            "add",
            "-d",
            "sqlite::memory:",
            "-r",
            "proxy",
            "rules.txt",
        ])
        .unwrap();

        match args.command {
            StoreCommands::Add { rule, input, .. } => {
                assert_eq!(rule, "proxy");
                assert_eq!(input, Some(PathBuf::from("rules.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_list_defaults_to_direct() {
        let args =
            StoreArgs::try_parse_from(["surge-store", "list", "-d", "sqlite::memory:"]).unwrap();
        match args.command {
            StoreCommands::List { rule, format, .. } => {
                assert_eq!(rule, "direct");
                assert_eq!(format, "table");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        std::fs::write(&path, "a.com\nb.com\n").unwrap();

        let text = read_input(Some(path)).unwrap();
        assert_eq!(text, "a.com\nb.com\n");
    }
}
