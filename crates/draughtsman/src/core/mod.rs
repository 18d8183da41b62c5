//! Core abstractions for diagram model processing
//!
//! This module defines the fundamental traits that both source language
//! plugins implement, plus the shared error, logging, and type
//! infrastructure.

mod database;
mod detector;
mod error;
pub mod logging;
mod parser;
mod types;

pub use database::*;
pub use detector::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use types::*;
