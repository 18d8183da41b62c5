//! Diagram model plugins
//!
//! Each plugin owns one source kind end to end: a detector, a parser, a
//! typed database, and a layout pass. The orchestrator wires them
//! together behind the core traits.

pub mod er;
pub mod orchestrator;
pub mod uml;

pub use orchestrator::{Orchestrator, SourceModel};
