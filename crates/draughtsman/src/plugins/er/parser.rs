//! SQL DDL parser
//!
//! Parses `CREATE TABLE` statements into the ER database. Each statement
//! is tried against a strict DDL pattern first; statements that fail it
//! but still mention `CREATE TABLE` go through a permissive best-effort
//! extractor. Statements matching neither are skipped without failing
//! the parse.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, span, trace, Level};

use super::database::{Attribute, Entity, ErDatabase, Relationship, RelationshipKind};
use crate::core::Parser;

/// Whole-statement shape: `CREATE TABLE name ( body ) tail`
static CREATE_TABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)^\s*CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`"]?(\w+)[`"]?\s*\((.*)\)[^)]*$"#,
    )
    .expect("create table pattern")
});

/// Loose table-name extraction for the permissive path
static TABLE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)CREATE\s+TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?[`"]?(\w+)[`"]?"#)
        .expect("table name pattern")
});

/// Column definition: name, type (parameters included), trailing specs
static COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)^[`"]?(\w+)[`"]?\s+([A-Za-z]\w*(?:\s*\([^)]*\))?)(.*)$"#)
        .expect("column pattern")
});

/// Table-level `PRIMARY KEY (a, b)`
static PRIMARY_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)PRIMARY\s+KEY\s*\(([^)]+)\)").expect("primary key pattern")
});

/// Table-level `FOREIGN KEY (a, b) REFERENCES t (c, d)`
static FOREIGN_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)FOREIGN\s+KEY\s*\(([^)]+)\)\s*REFERENCES\s+[`"]?(\w+)[`"]?\s*(?:\(([^)]+)\))?"#,
    )
    .expect("foreign key pattern")
});

/// Inline `REFERENCES t (c)` on a column definition
static INLINE_REFERENCES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)REFERENCES\s+[`"]?(\w+)[`"]?\s*(?:\(([^)]+)\))?"#)
        .expect("inline references pattern")
});

static NOT_NULL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)NOT\s+NULL").expect("not null pattern"));

static INLINE_PRIMARY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PRIMARY\s+KEY").expect("inline primary key pattern"));

/// Body items that are constraints rather than columns
static CONSTRAINT_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:CONSTRAINT|PRIMARY\s+KEY|FOREIGN\s+KEY|UNIQUE|KEY|INDEX|CHECK)\b")
        .expect("constraint item pattern")
});

/// A foreign key recorded during the first pass, resolved once every
/// statement has been parsed
#[derive(Debug, Clone)]
struct ForeignKeyRef {
    source_table: String,
    column: String,
    target_table: String,
    target_column: Option<String>,
}

/// SQL DDL parser
pub struct SqlParser;

impl SqlParser {
    pub fn new() -> Self {
        Self
    }

    /// Split a table body at top-level commas, ignoring commas nested in
    /// parentheses (type parameters, key column lists)
    fn split_top_level(body: &str) -> Vec<&str> {
        let mut items = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;

        for (i, c) in body.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    items.push(&body[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        items.push(&body[start..]);

        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn strip_quotes(name: &str) -> String {
        name.trim().trim_matches(|c| c == '`' || c == '"' || c == '\'').to_string()
    }

    /// Strict path: the whole statement must match the anchored
    /// `CREATE TABLE` shape
    fn parse_create_table(
        &self,
        statement: &str,
        database: &mut ErDatabase,
        pending: &mut Vec<ForeignKeyRef>,
    ) -> bool {
        let Some(caps) = CREATE_TABLE_RE.captures(statement) else {
            return false;
        };

        let table_name = caps[1].to_string();
        let body = caps.get(2).map_or("", |m| m.as_str());
        let mut entity = Entity::new(table_name.clone());

        // Constraints may forward-reference columns, so collect column
        // definitions before applying key constraints
        let items = Self::split_top_level(body);
        let mut primary_key_columns: Vec<String> = Vec::new();
        let mut foreign_key_items: Vec<&str> = Vec::new();

        for item in &items {
            if CONSTRAINT_ITEM_RE.is_match(item) {
                if FOREIGN_KEY_RE.is_match(item) {
                    foreign_key_items.push(item);
                } else if let Some(pk) = PRIMARY_KEY_RE.captures(item) {
                    primary_key_columns.extend(pk[1].split(',').map(Self::strip_quotes));
                }
                continue;
            }

            let Some(col) = COLUMN_RE.captures(item) else {
                trace!(table = %table_name, item, "Skipping unrecognized body item");
                continue;
            };

            let mut attribute = Attribute::new(&col[1], col[2].trim());
            let specs = col.get(3).map_or("", |m| m.as_str());

            if NOT_NULL_RE.is_match(specs) {
                attribute.nullable = false;
            }
            if INLINE_PRIMARY_KEY_RE.is_match(specs) {
                attribute.mark_primary_key();
            }
            if let Some(fk) = INLINE_REFERENCES_RE.captures(specs) {
                let target_table = fk[1].to_string();
                let target_column = fk
                    .get(2)
                    .map(|m| Self::strip_quotes(m.as_str().split(',').next().unwrap_or("")));
                attribute.mark_foreign_key(target_table.clone(), target_column.clone());
                pending.push(ForeignKeyRef {
                    source_table: table_name.clone(),
                    column: attribute.name.clone(),
                    target_table,
                    target_column,
                });
            }

            entity.add_attribute(attribute);
        }

        for column in &primary_key_columns {
            if let Some(attr) = entity.attribute_mut(column) {
                attr.mark_primary_key();
            }
        }

        for item in foreign_key_items {
            self.record_foreign_keys(item, &table_name, &mut entity, pending);
        }

        debug!(
            table = %table_name,
            columns = entity.attributes.len(),
            "Parsed CREATE TABLE"
        );
        let _ = database.add_entity(entity);
        true
    }

    /// Permissive path: best-effort extraction from a statement the
    /// strict pattern rejected
    fn parse_raw_create_table(
        &self,
        statement: &str,
        database: &mut ErDatabase,
        pending: &mut Vec<ForeignKeyRef>,
    ) -> bool {
        let Some(table) = TABLE_NAME_RE.captures(statement) else {
            return false;
        };
        let table_name = table[1].to_string();
        let mut entity = Entity::new(table_name.clone());

        // Column candidates are taken line by line; constraint lines and
        // the CREATE line itself never match the column shape after the
        // leading-keyword filter
        for line in statement.lines() {
            let line = line.trim().trim_end_matches(',');
            if line.is_empty()
                || CONSTRAINT_ITEM_RE.is_match(line)
                || TABLE_NAME_RE.is_match(line)
                || line.starts_with(')')
            {
                continue;
            }
            let Some(col) = COLUMN_RE.captures(line) else {
                continue;
            };

            let mut attribute = Attribute::new(&col[1], col[2].trim());
            let specs = col.get(3).map_or("", |m| m.as_str());
            if NOT_NULL_RE.is_match(specs) {
                attribute.nullable = false;
            }
            if INLINE_PRIMARY_KEY_RE.is_match(specs) {
                attribute.mark_primary_key();
            }
            entity.add_attribute(attribute);
        }

        // Table-level constraints are matched over the whole statement
        for pk in PRIMARY_KEY_RE.captures_iter(statement) {
            for column in pk[1].split(',') {
                if let Some(attr) = entity.attribute_mut(&Self::strip_quotes(column)) {
                    attr.mark_primary_key();
                }
            }
        }
        let fk_items: Vec<String> = FOREIGN_KEY_RE
            .captures_iter(statement)
            .map(|c| c[0].to_string())
            .collect();
        for item in fk_items {
            self.record_foreign_keys(&item, &table_name, &mut entity, pending);
        }

        debug!(
            table = %table_name,
            columns = entity.attributes.len(),
            "Recovered CREATE TABLE via permissive extraction"
        );
        let _ = database.add_entity(entity);
        true
    }

    /// Record each column pair of a `FOREIGN KEY ... REFERENCES` clause
    /// as a deferred tuple and mark the local attributes
    fn record_foreign_keys(
        &self,
        item: &str,
        table_name: &str,
        entity: &mut Entity,
        pending: &mut Vec<ForeignKeyRef>,
    ) {
        let Some(fk) = FOREIGN_KEY_RE.captures(item) else {
            return;
        };

        let columns: Vec<String> = fk[1].split(',').map(Self::strip_quotes).collect();
        let target_table = fk[2].to_string();
        let target_columns: Vec<String> = fk
            .get(3)
            .map(|m| m.as_str().split(',').map(Self::strip_quotes).collect())
            .unwrap_or_default();

        for (i, column) in columns.iter().enumerate() {
            let target_column = target_columns.get(i).cloned();

            if let Some(attr) = entity.attribute_mut(column) {
                attr.mark_foreign_key(target_table.clone(), target_column.clone());
            }

            pending.push(ForeignKeyRef {
                source_table: table_name.to_string(),
                column: column.clone(),
                target_table: target_table.clone(),
                target_column,
            });
        }
    }

    /// Second pass: turn deferred foreign keys into relationships now
    /// that every table is known. Tuples whose target table was never
    /// declared are dropped.
    fn resolve_foreign_keys(&self, database: &mut ErDatabase, pending: Vec<ForeignKeyRef>) {
        let resolve_span = span!(Level::DEBUG, "resolve_foreign_keys", count = pending.len());
        let _enter = resolve_span.enter();

        let mut resolved = Vec::new();

        for fk in pending {
            let Some(source) = database.get_entity(&fk.source_table) else {
                continue;
            };
            let Some(target) = database.get_entity(&fk.target_table) else {
                debug!(
                    source = %fk.source_table,
                    target = %fk.target_table,
                    column = %fk.column,
                    "Dropping foreign key to undeclared table"
                );
                continue;
            };

            let source_is_pk = source.is_primary_key(&fk.column);
            let target_is_pk = fk
                .target_column
                .as_deref()
                .is_some_and(|c| target.is_primary_key(c));

            let kind = classify_cardinality(source_is_pk, target_is_pk);
            let source_attribute = source.attribute(&fk.column).map(|a| a.name.clone());
            let target_attribute = fk
                .target_column
                .as_deref()
                .and_then(|c| target.attribute(c))
                .map(|a| a.name.clone());

            resolved.push(
                Relationship::new(source.name.clone(), target.name.clone(), kind)
                    .with_attributes(source_attribute, target_attribute),
            );
        }

        debug!(relationships = resolved.len(), "Foreign keys resolved");
        for relationship in resolved {
            let _ = database.add_relationship(relationship);
        }
    }
}

/// PK membership of the joined columns decides cardinality
fn classify_cardinality(source_is_pk: bool, target_is_pk: bool) -> RelationshipKind {
    match (source_is_pk, target_is_pk) {
        (true, true) => RelationshipKind::OneToOne,
        (false, true) => RelationshipKind::ManyToOne,
        (true, false) => RelationshipKind::OneToMany,
        (false, false) => RelationshipKind::ManyToMany,
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ErDatabase> for SqlParser {
    fn parse(&self, input: &str, database: &mut ErDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_sql", input_len = input.len());
        let _enter = parse_span.enter();

        let mut pending: Vec<ForeignKeyRef> = Vec::new();

        // Naive split: a `;` inside a quoted string or comment also ends
        // a statement
        for fragment in input.split(';') {
            let trimmed = fragment.trim();
            if trimmed.is_empty() {
                continue;
            }
            let statement = format!("{};", trimmed);

            if self.parse_create_table(&statement, database, &mut pending) {
                continue;
            }
            if statement.to_uppercase().contains("CREATE TABLE")
                && self.parse_raw_create_table(&statement, database, &mut pending)
            {
                continue;
            }
            trace!(statement = %trimmed, "Skipping unrecognized statement");
        }

        self.resolve_foreign_keys(database, pending);

        debug!(
            entities = database.entity_count(),
            relationships = database.relationship_count(),
            "SQL parsing completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sql"
    }

    fn version(&self) -> &'static str {
        "0.2.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.to_uppercase().contains("CREATE TABLE")
    }
}
