//! Error types for zkbox

use thiserror::Error;

/// Result type for zkbox operations
pub type Result<T> = std::result::Result<T, ZkpError>;

/// Errors that can occur while building or checking proofs and commitments.
///
/// A proof or opening that is well formed but wrong is not an error: those
/// calls return `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZkpError {
    /// A required argument was missing or empty
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Leaf index outside the tree
    #[error("Index {index} out of range for tree with {len} leaves")]
    IndexOutOfRange {
        /// Requested leaf index
        index: usize,
        /// Number of leaves in the tree
        len: usize,
    },

    /// Random number generation failed
    #[error("Random number generation failed: {0}")]
    RngFailed(String),

    /// Input exceeded a configured resource limit
    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ZkpError {
    /// Whether a caller may reasonably retry the operation later.
    ///
    /// Only entropy failures qualify; every other variant is a caller bug.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ZkpError::RngFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rng_failure_is_retryable() {
        assert!(ZkpError::RngFailed("entropy".into()).is_retryable());
        assert!(!ZkpError::InvalidInput("statement".into()).is_retryable());
        assert!(!ZkpError::IndexOutOfRange { index: 4, len: 4 }.is_retryable());
        assert!(!ZkpError::ResourceExceeded("too big".into()).is_retryable());
    }

    #[test]
    fn test_index_error_display() {
        let err = ZkpError::IndexOutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "Index 7 out of range for tree with 3 leaves");
    }
}
