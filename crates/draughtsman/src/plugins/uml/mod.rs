//! UML class diagram plugin
//!
//! Parses a subset of Java class syntax into a UML class diagram model.

mod database;
mod detector;
mod layout;
mod parser;

pub use database::{
    ClassKind, UmlAttribute, UmlClass, UmlDatabase, UmlMethod, UmlParameter, UmlRelationship,
    UmlRelationshipKind, Visibility,
};
pub use detector::JavaDetector;
pub use layout::CascadeLayout;
pub use parser::JavaParser;
