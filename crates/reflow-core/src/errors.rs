//! Error types for the reflow engine.

use thiserror::Error;

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Errors that abort layout inference.
///
/// Both variants signal a broken contract with the upstream mapping rather
/// than a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// A container reached containment resolution without an identifier.
    #[error("container {name:?} is missing an id")]
    MissingId { name: String },

    /// The tree is nested deeper than the configured limit.
    #[error("maximum tree depth ({depth}) exceeded at node {id}")]
    MaxDepthExceeded { depth: usize, id: String },
}
