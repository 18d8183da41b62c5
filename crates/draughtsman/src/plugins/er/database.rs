//! Entity-relationship database
//!
//! Stores entities (tables) and relationships for ER diagrams.

use crate::core::{Database, Position};
use anyhow::Result;
use std::fmt;

/// A column of a table
///
/// The data type is kept as the raw string from the DDL, parameters
/// included (e.g. `VARCHAR(100)`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub data_type: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub referenced_table: Option<String>,
    pub referenced_column: Option<String>,
    pub nullable: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_primary_key: false,
            is_foreign_key: false,
            referenced_table: None,
            referenced_column: None,
            nullable: true,
        }
    }

    /// Mark as primary key; a primary key column is never nullable
    pub fn primary_key(mut self) -> Self {
        self.mark_primary_key();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as foreign key referencing `table(column)`
    pub fn references(mut self, table: impl Into<String>, column: Option<String>) -> Self {
        self.mark_foreign_key(table, column);
        self
    }

    /// In-place variant of [`Attribute::primary_key`] for attributes
    /// already attached to an entity
    pub fn mark_primary_key(&mut self) {
        self.is_primary_key = true;
        self.nullable = false;
    }

    /// In-place variant of [`Attribute::references`]
    pub fn mark_foreign_key(&mut self, table: impl Into<String>, column: Option<String>) {
        self.is_foreign_key = true;
        self.referenced_table = Some(table.into());
        self.referenced_column = column;
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.data_type)?;
        if self.is_primary_key {
            write!(f, " PK")?;
        }
        if self.is_foreign_key {
            write!(f, " FK")?;
        }
        if !self.nullable {
            write!(f, " NOT NULL")?;
        }
        Ok(())
    }
}

/// A database table in the diagram
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub position: Position,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            position: Position::default(),
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Look up an attribute by column name, case-insensitively
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_primary_key)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_foreign_key)
    }

    /// Whether the named column exists and is part of the primary key
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.attribute(column).is_some_and(|a| a.is_primary_key)
    }
}

/// Cardinality of a relationship, derived from PK membership of the
/// joined columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::OneToOne => write!(f, "1:1"),
            RelationshipKind::OneToMany => write!(f, "1:N"),
            RelationshipKind::ManyToOne => write!(f, "N:1"),
            RelationshipKind::ManyToMany => write!(f, "N:M"),
        }
    }
}

/// A foreign-key relationship between two entities
///
/// Entities are referenced by name; the optional attribute fields point
/// back at the joined columns.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub source_attribute: Option<String>,
    pub target_attribute: Option<String>,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            source_attribute: None,
            target_attribute: None,
        }
    }

    pub fn with_attributes(
        mut self,
        source_attribute: Option<String>,
        target_attribute: Option<String>,
    ) -> Self {
        self.source_attribute = source_attribute;
        self.target_attribute = target_attribute;
        self
    }

    /// Whether the relationship names the given entity on either end
    pub fn involves(&self, entity: &str) -> bool {
        self.source.eq_ignore_ascii_case(entity) || self.target.eq_ignore_ascii_case(entity)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.kind, self.target)
    }
}

/// Entity-relationship database
///
/// The entity list preserves first-seen order. Name lookup is
/// case-insensitive and the *last* declaration of a name wins, while the
/// list retains every declaration; this mirrors a registry slot being
/// overwritten without the earlier entity being dropped.
#[derive(Debug)]
pub struct ErDatabase {
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
}

impl ErDatabase {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn add_entity(&mut self, entity: Entity) -> Result<()> {
        self.entities.push(entity);
        Ok(())
    }

    pub fn add_relationship(&mut self, rel: Relationship) -> Result<()> {
        self.relationships.push(rel);
        Ok(())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn get_entity(&self, name: &str) -> Option<&Entity> {
        self.entities
            .iter()
            .rev()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn get_entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .rev()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn has_entity(&self, name: &str) -> bool {
        self.get_entity(name).is_some()
    }

    /// Remove every entity with the given name and cascade-remove every
    /// relationship naming it as source or target
    pub fn remove_entity(&mut self, name: &str) {
        self.entities.retain(|e| !e.name.eq_ignore_ascii_case(name));
        self.relationships.retain(|r| !r.involves(name));
    }

    pub fn remove_relationship(&mut self, index: usize) {
        if index < self.relationships.len() {
            self.relationships.remove(index);
        }
    }
}

impl Default for ErDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for ErDatabase {
    type Node = Entity;
    type Edge = Relationship;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_entity(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_relationship(edge)
    }

    fn get_node(&self, name: &str) -> Option<&Self::Node> {
        self.get_entity(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.entities.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.relationships.clear();
    }

    fn node_count(&self) -> usize {
        self.entities.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_defaults() {
        let attr = Attribute::new("id", "INT");
        assert!(!attr.is_primary_key);
        assert!(!attr.is_foreign_key);
        assert!(attr.nullable);
        assert!(attr.referenced_table.is_none());
    }

    #[test]
    fn test_primary_key_forces_not_null() {
        let attr = Attribute::new("id", "INT").primary_key();
        assert!(attr.is_primary_key);
        assert!(!attr.nullable);
    }

    #[test]
    fn test_attribute_display() {
        let attr = Attribute::new("customer_id", "INT")
            .primary_key()
            .references("Customers", Some("id".to_string()));
        assert_eq!(attr.to_string(), "customer_id (INT) PK FK NOT NULL");
    }

    #[test]
    fn test_entity_attribute_lookup_case_insensitive() {
        let mut entity = Entity::new("Users");
        entity.add_attribute(Attribute::new("Id", "INT").primary_key());

        assert!(entity.attribute("id").is_some());
        assert!(entity.attribute("ID").is_some());
        assert!(entity.is_primary_key("id"));
        assert!(!entity.is_primary_key("missing"));
    }

    #[test]
    fn test_entity_key_accessors() {
        let mut entity = Entity::new("Orders");
        entity.add_attribute(Attribute::new("id", "INT").primary_key());
        entity.add_attribute(
            Attribute::new("customer_id", "INT").references("Customers", None),
        );
        entity.add_attribute(Attribute::new("total", "DECIMAL(10,2)"));

        assert_eq!(entity.primary_keys().count(), 1);
        assert_eq!(entity.foreign_keys().count(), 1);
    }

    #[test]
    fn test_database_entity_lookup_case_insensitive() {
        let mut db = ErDatabase::new();
        db.add_entity(Entity::new("Customers")).unwrap();

        assert!(db.get_entity("customers").is_some());
        assert!(db.get_entity("CUSTOMERS").is_some());
        assert!(db.get_entity("Orders").is_none());
    }

    #[test]
    fn test_duplicate_entity_last_wins_list_keeps_both() {
        let mut db = ErDatabase::new();
        let mut first = Entity::new("Users");
        first.add_attribute(Attribute::new("id", "INT"));
        let mut second = Entity::new("users");
        second.add_attribute(Attribute::new("uuid", "CHAR(36)"));
        db.add_entity(first).unwrap();
        db.add_entity(second).unwrap();

        // Both declarations stay in the list
        assert_eq!(db.entity_count(), 2);
        // The registry slot points at the later one
        let found = db.get_entity("USERS").unwrap();
        assert!(found.attribute("uuid").is_some());
    }

    #[test]
    fn test_remove_entity_cascades_relationships() {
        let mut db = ErDatabase::new();
        db.add_entity(Entity::new("Orders")).unwrap();
        db.add_entity(Entity::new("Customers")).unwrap();
        db.add_relationship(Relationship::new(
            "Orders",
            "Customers",
            RelationshipKind::ManyToOne,
        ))
        .unwrap();

        db.remove_entity("customers");

        assert_eq!(db.entity_count(), 1);
        assert_eq!(db.relationship_count(), 0);
    }

    #[test]
    fn test_relationship_display() {
        let rel = Relationship::new("Orders", "Customers", RelationshipKind::ManyToOne);
        assert_eq!(rel.to_string(), "Orders N:1 Customers");
        assert_eq!(RelationshipKind::ManyToMany.to_string(), "N:M");
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut db = ErDatabase::new();
        db.add_entity(Entity::new("A")).unwrap();
        db.add_relationship(Relationship::new("A", "A", RelationshipKind::OneToOne))
            .unwrap();

        db.clear();

        assert_eq!(db.entity_count(), 0);
        assert_eq!(db.relationship_count(), 0);
    }
}
