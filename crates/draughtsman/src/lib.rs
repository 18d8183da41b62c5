//! Draughtsman - Build diagram models from source code
//!
//! A library for parsing SQL `CREATE TABLE` DDL into entity-relationship
//! models and a subset of Java class syntax into UML class diagram models.
//!
//! # Quick Start
//!
//! ```rust
//! use draughtsman::parse_sql;
//!
//! let ddl = "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(100));";
//! let model = parse_sql(ddl).unwrap();
//! assert_eq!(model.entity_count(), 1);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use draughtsman::prelude::*;
//!
//! let input = "class Dog extends Animal {}";
//!
//! // Parse into a database
//! let parser = JavaParser::new();
//! let mut database = UmlDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//!
//! // Access the parsed data; the undeclared parent became a stub
//! assert_eq!(database.class_count(), 2);
//! assert_eq!(database.relationship_count(), 1);
//! ```

pub mod core;
pub mod plugins;

pub use core::*;
pub use plugins::{Orchestrator, SourceModel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{Database, Detector, DiagramError, Parser, Position, SourceKind};
    pub use crate::plugins::er::{
        Attribute, Entity, ErDatabase, GridLayout, Relationship, RelationshipKind, SqlDetector,
        SqlParser,
    };
    pub use crate::plugins::uml::{
        CascadeLayout, ClassKind, JavaDetector, JavaParser, UmlAttribute, UmlClass, UmlDatabase,
        UmlMethod, UmlParameter, UmlRelationship, UmlRelationshipKind, Visibility,
    };
    pub use crate::plugins::{Orchestrator, SourceModel};
}

/// Parse SQL DDL into an entity-relationship model
///
/// This is the simplest way to turn `CREATE TABLE` statements into a
/// positioned ER model. Statements that are not `CREATE TABLE` are
/// skipped; foreign keys whose target table never appears are dropped.
///
/// # Arguments
/// * `input` - SQL DDL, statements separated by `;`
///
/// # Returns
/// * `Ok(ErDatabase)` - The populated, grid-laid-out model
/// * `Err` - If the pipeline fails
///
/// # Example
/// ```rust
/// use draughtsman::parse_sql;
///
/// let model = parse_sql(
///     "CREATE TABLE users (id INT PRIMARY KEY);
///      CREATE TABLE posts (id INT PRIMARY KEY,
///          user_id INT,
///          FOREIGN KEY (user_id) REFERENCES users(id));",
/// )
/// .unwrap();
/// assert_eq!(model.entity_count(), 2);
/// assert_eq!(model.relationship_count(), 1);
/// ```
pub fn parse_sql(input: &str) -> anyhow::Result<plugins::er::ErDatabase> {
    Orchestrator::with_default_plugins().process_sql(input)
}

/// Parse Java class syntax into a UML class diagram model
///
/// Top-level class, interface, and enum declarations are parsed with
/// their fields, methods, inheritance, implementation, and composition
/// relationships. Referenced-but-undeclared supertypes become stubs.
///
/// # Example
/// ```rust
/// use draughtsman::parse_java;
///
/// let model = parse_java("class Dog extends Animal { private int age; }").unwrap();
/// assert_eq!(model.class_count(), 2);
/// ```
pub fn parse_java(input: &str) -> anyhow::Result<plugins::uml::UmlDatabase> {
    Orchestrator::with_default_plugins().process_java(input)
}

/// Detect the source kind and parse into the matching model
///
/// # Example
/// ```rust
/// use draughtsman::{parse_auto, SourceModel};
///
/// match parse_auto("CREATE TABLE t (id INT);").unwrap() {
///     SourceModel::EntityRelationship(db) => assert_eq!(db.entity_count(), 1),
///     SourceModel::ClassDiagram(_) => unreachable!(),
/// }
/// ```
pub fn parse_auto(input: &str) -> anyhow::Result<SourceModel> {
    Orchestrator::with_default_plugins().process(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sql_facade() {
        let model = parse_sql("CREATE TABLE users (id INT PRIMARY KEY);").unwrap();
        assert_eq!(model.entity_count(), 1);
        assert!(model.get_entity("users").unwrap().is_primary_key("id"));
    }

    #[test]
    fn test_parse_java_facade() {
        let model = parse_java("class Animal { private String name; }").unwrap();
        assert_eq!(model.class_count(), 1);
        assert_eq!(model.get_class("Animal").unwrap().attributes.len(), 1);
    }

    #[test]
    fn test_parse_auto_rejects_unknown_input() {
        assert!(parse_auto("just some prose").is_err());
    }

    #[test]
    fn test_facade_applies_layout() {
        let model = parse_java("class A {} class B {}").unwrap();
        assert_ne!(model.classes()[0].position, model.classes()[1].position);
    }
}
