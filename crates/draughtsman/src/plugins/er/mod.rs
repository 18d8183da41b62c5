//! Entity-relationship plugin
//!
//! Parses SQL `CREATE TABLE` DDL into an entity-relationship model.

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{Attribute, Entity, ErDatabase, Relationship, RelationshipKind};
pub use detector::SqlDetector;
pub use layout::GridLayout;
pub use parser::SqlParser;
