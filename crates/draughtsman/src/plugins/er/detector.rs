//! SQL source detector
//!
//! Identifies SQL DDL input from its lexical shape.

use crate::core::{Detector, SourceKind};

/// Detector for SQL `CREATE TABLE` input
pub struct SqlDetector;

impl SqlDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SqlDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SqlDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let upper = input.to_uppercase();

        if upper.contains("CREATE TABLE") {
            return 1.0;
        }

        // Other DDL/DML keywords still point at SQL even though the
        // parser will skip those statements
        let has_sql_keyword = upper.contains("ALTER TABLE")
            || upper.contains("DROP TABLE")
            || upper.contains("INSERT INTO")
            || upper.contains("SELECT ");

        if has_sql_keyword && input.contains(';') {
            return 0.6;
        }

        0.0
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Sql
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["CREATE TABLE", "PRIMARY KEY", "FOREIGN KEY", "REFERENCES"]
    }
}
