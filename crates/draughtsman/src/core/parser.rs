//! Core parser trait for source text
//!
//! This trait defines the interface for parsing raw source text into
//! structured diagram data stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for source parsers
///
/// This trait represents the parsing layer that converts raw source text
/// into structured diagram data. Each source language has its own parser
/// implementation.
///
/// A parser carries no mutable state of its own: all intermediate
/// resolution state lives inside a single `parse` invocation, so one
/// parser instance can be reused across independent inputs.
///
/// # Example
/// ```
/// use draughtsman::core::{Database, Parser};
/// use draughtsman::plugins::er::{ErDatabase, SqlParser};
///
/// let parser = SqlParser::new();
/// let mut db = ErDatabase::new();
/// parser.parse("CREATE TABLE users (id INT PRIMARY KEY);", &mut db).unwrap();
/// assert_eq!(db.entity_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse source text into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input looks parseable by this parser
    fn can_parse(&self, input: &str) -> bool;
}
