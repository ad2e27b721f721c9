//! Resource limits applied to caller-supplied data.
//!
//! The hash function and the default random source are fixed at build time;
//! the only runtime knobs are the size caps below.

use crate::error::{Result, ZkpError};

/// Default cap on a single hashed input (1 GB)
pub const DEFAULT_MAX_INPUT_SIZE: usize = 1_000_000_000;

/// Default cap on the number of Merkle leaves
pub const DEFAULT_MAX_MERKLE_LEAVES: usize = 1 << 24;

/// Limits checked before any caller data is hashed.
///
/// # Examples
/// ```rust
/// use zkbox::config::ZkConfig;
///
/// let config = ZkConfig::new().with_max_input_size(4096).with_max_merkle_leaves(1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZkConfig {
    /// Largest statement, secret, committed value or Merkle item accepted, in bytes.
    pub max_input_size: usize,

    /// Largest number of items a Merkle tree may be built over.
    pub max_merkle_leaves: usize,
}

impl Default for ZkConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_merkle_leaves: DEFAULT_MAX_MERKLE_LEAVES,
        }
    }
}

impl ZkConfig {
    /// Create a configuration with the default limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size
    #[must_use]
    pub fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }

    /// Set the maximum number of Merkle leaves
    #[must_use]
    pub fn with_max_merkle_leaves(mut self, max_merkle_leaves: usize) -> Self {
        self.max_merkle_leaves = max_merkle_leaves;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `ZkpError::ConfigurationError` if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_input_size == 0 {
            return Err(ZkpError::ConfigurationError(
                "max_input_size must be greater than zero".to_string(),
            ));
        }
        if self.max_merkle_leaves == 0 {
            return Err(ZkpError::ConfigurationError(
                "max_merkle_leaves must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Check one input against `max_input_size`
    pub(crate) fn check_input(&self, what: &str, len: usize) -> Result<()> {
        if len > self.max_input_size {
            return Err(ZkpError::ResourceExceeded(format!(
                "{} too large: {} bytes (max {} bytes)",
                what, len, self.max_input_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ZkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_input_size, DEFAULT_MAX_INPUT_SIZE);
        assert_eq!(config.max_merkle_leaves, DEFAULT_MAX_MERKLE_LEAVES);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let no_input = ZkConfig::new().with_max_input_size(0);
        assert!(matches!(no_input.validate(), Err(ZkpError::ConfigurationError(_))));

        let no_leaves = ZkConfig::new().with_max_merkle_leaves(0);
        assert!(matches!(no_leaves.validate(), Err(ZkpError::ConfigurationError(_))));
    }

    #[test]
    fn test_check_input() {
        let config = ZkConfig::new().with_max_input_size(4);
        assert!(config.check_input("value", 4).is_ok());
        assert!(matches!(config.check_input("value", 5), Err(ZkpError::ResourceExceeded(_))));
    }
}
