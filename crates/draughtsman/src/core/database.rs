//! Core database trait for diagram model storage
//!
//! This trait defines the interface for storing and managing diagram data.
//! Each source language plugin implements it with its own node and edge types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// This trait represents the data storage layer for diagram information.
/// The ER plugin stores entities and relationships, the UML plugin stores
/// classes and relationships; both expose the same container surface so
/// the rendering collaborator can enumerate either uniformly.
///
/// The associated types allow each plugin to define its own node and edge
/// structures with domain-specific metadata.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Add a node to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add an edge to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get a node by name
    fn get_node(&self, name: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    ///
    /// Empties every collection at once so a caller can re-parse into the
    /// same container.
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;
}
