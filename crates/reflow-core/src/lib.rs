//! Core types, node model and errors for the reflow layout-inference engine.
//!
//! This crate provides the foundational types shared by the reflow crates:
//! - The canonical design node tree ([`Node`] and its variants)
//! - Value types (geometry, padding, paints, effects, alignment enums)
//! - Error types

pub mod errors;
pub mod node;
pub mod types;

pub use errors::*;
pub use node::*;
pub use types::*;
