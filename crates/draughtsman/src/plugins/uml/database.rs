//! UML class diagram database
//!
//! Stores classes and relationships for UML class diagrams.

use crate::core::{Database, Position};
use anyhow::Result;
use std::fmt;

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    /// Java default (no modifier written in source)
    #[default]
    Package, // ~
}

impl Visibility {
    /// Parse a Java modifier keyword; an absent or empty keyword is
    /// package visibility
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "public" => Visibility::Public,
            "private" => Visibility::Private,
            "protected" => Visibility::Protected,
            _ => Visibility::Package,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

/// Kind of a class-like declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
}

impl ClassKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "enum" => Some(ClassKind::Enum),
            _ => None,
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassKind::Class => write!(f, "class"),
            ClassKind::Interface => write!(f, "interface"),
            ClassKind::Enum => write!(f, "enum"),
        }
    }
}

/// A field of a class
#[derive(Debug, Clone, PartialEq)]
pub struct UmlAttribute {
    pub name: String,
    pub type_name: String,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
}

impl UmlAttribute {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            visibility: Visibility::default(),
            is_static: false,
            is_final: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, is_static: bool, is_final: bool) -> Self {
        self.is_static = is_static;
        self.is_final = is_final;
        self
    }
}

impl fmt::Display for UmlAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.visibility.symbol())?;
        if self.is_static {
            write!(f, "static ")?;
        }
        if self.is_final {
            write!(f, "final ")?;
        }
        write!(f, "{} : {}", self.name, self.type_name)
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct UmlParameter {
    pub name: String,
    pub type_name: String,
}

impl UmlParameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for UmlParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.type_name)
    }
}

/// A method of a class
///
/// Constructors never appear here; the parser skips any method whose
/// name equals the enclosing class name.
#[derive(Debug, Clone, PartialEq)]
pub struct UmlMethod {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<UmlParameter>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
}

impl UmlMethod {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            visibility: Visibility::default(),
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, is_static: bool, is_abstract: bool) -> Self {
        self.is_static = is_static;
        self.is_abstract = is_abstract;
        self
    }

    pub fn add_parameter(&mut self, parameter: UmlParameter) {
        self.parameters.push(parameter);
    }
}

impl fmt::Display for UmlMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.visibility.symbol())?;
        if self.is_static {
            write!(f, "static ")?;
        }
        if self.is_abstract {
            write!(f, "abstract ")?;
        }
        write!(f, "{}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        if self.return_type != "void" {
            write!(f, " : {}", self.return_type)?;
        }
        Ok(())
    }
}

/// A class in the diagram
///
/// A *stub* is a class created only because another declaration
/// referenced its name; it has empty attribute and method lists.
#[derive(Debug, Clone)]
pub struct UmlClass {
    pub name: String,
    pub kind: ClassKind,
    pub package_name: String,
    pub attributes: Vec<UmlAttribute>,
    pub methods: Vec<UmlMethod>,
    pub position: Position,
}

impl UmlClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Class)
    }

    pub fn with_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            package_name: String::new(),
            attributes: Vec::new(),
            methods: Vec::new(),
            position: Position::default(),
        }
    }

    pub fn add_attribute(&mut self, attribute: UmlAttribute) {
        self.attributes.push(attribute);
    }

    pub fn add_method(&mut self, method: UmlMethod) {
        self.methods.push(method);
    }
}

/// Relationship kind between classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UmlRelationshipKind {
    Association,
    Inheritance,
    Implementation,
    Dependency,
    Aggregation,
    Composition,
}

impl fmt::Display for UmlRelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UmlRelationshipKind::Association => write!(f, "association"),
            UmlRelationshipKind::Inheritance => write!(f, "inheritance"),
            UmlRelationshipKind::Implementation => write!(f, "implementation"),
            UmlRelationshipKind::Dependency => write!(f, "dependency"),
            UmlRelationshipKind::Aggregation => write!(f, "aggregation"),
            UmlRelationshipKind::Composition => write!(f, "composition"),
        }
    }
}

/// A relationship between two classes, referenced by name
#[derive(Debug, Clone)]
pub struct UmlRelationship {
    pub source: String,
    pub target: String,
    pub kind: UmlRelationshipKind,
    pub source_label: Option<String>,
    pub target_label: Option<String>,
}

impl UmlRelationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: UmlRelationshipKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            source_label: None,
            target_label: None,
        }
    }

    pub fn with_target_label(mut self, label: impl Into<String>) -> Self {
        self.target_label = Some(label.into());
        self
    }

    /// Whether the relationship names the given class on either end
    pub fn involves(&self, class: &str) -> bool {
        self.source == class || self.target == class
    }
}

impl fmt::Display for UmlRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --[{}]--> {}", self.source, self.kind, self.target)
    }
}

/// UML class diagram database
///
/// The class list preserves first-seen order. Name lookup is
/// case-sensitive and the *last* declaration of a name wins while the
/// list retains every declaration.
#[derive(Debug)]
pub struct UmlDatabase {
    classes: Vec<UmlClass>,
    relationships: Vec<UmlRelationship>,
}

impl UmlDatabase {
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn add_class(&mut self, class: UmlClass) -> Result<()> {
        self.classes.push(class);
        Ok(())
    }

    pub fn add_relationship(&mut self, rel: UmlRelationship) -> Result<()> {
        self.relationships.push(rel);
        Ok(())
    }

    pub fn classes(&self) -> &[UmlClass] {
        &self.classes
    }

    pub fn classes_mut(&mut self) -> &mut [UmlClass] {
        &mut self.classes
    }

    pub fn relationships(&self) -> &[UmlRelationship] {
        &self.relationships
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&UmlClass> {
        self.classes.iter().rev().find(|c| c.name == name)
    }

    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut UmlClass> {
        self.classes.iter_mut().rev().find(|c| c.name == name)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.get_class(name).is_some()
    }

    /// Remove every class with the given name and cascade-remove every
    /// relationship naming it as source or target
    pub fn remove_class(&mut self, name: &str) {
        self.classes.retain(|c| c.name != name);
        self.relationships.retain(|r| !r.involves(name));
    }
}

impl Default for UmlDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Database for UmlDatabase {
    type Node = UmlClass;
    type Edge = UmlRelationship;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_class(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_relationship(edge)
    }

    fn get_node(&self, name: &str) -> Option<&Self::Node> {
        self.get_class(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.relationships.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
