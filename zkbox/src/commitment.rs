//! Hash Commitments
//!
//! Commitment: C = H(value || blinding), blinding 32 random bytes
//! Opening: reveal value and blinding, check C == H(value || blinding)
//!
//! ## Properties
//!
//! - **Hiding**: C reveals nothing about the value while the blinding stays secret
//! - **Binding**: opening C to a different value requires a hash collision
//!
//! The blinding is fixed length and placed last, so the plain concatenation is
//! unambiguous.

use crate::config::ZkConfig;
use crate::error::{Result, ZkpError};
use crate::hash::{HashOutput, ct_eq, hash_parts};
use crate::logging::digest_prefix;
use crate::random::{OsRandom, RandomSource, random_array};
use std::fmt;
use tracing::{debug, instrument};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Blinding length in bytes
pub const BLINDING_LEN: usize = 32;

/// A commitment together with the blinding needed to open it.
///
/// The blinding is wiped when the record is dropped. Hand it only to parties
/// allowed to open the commitment.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CommitmentRecord {
    /// The commitment hash (public)
    #[zeroize(skip)]
    commitment: HashOutput,
    /// The blinding used
    blinding: [u8; BLINDING_LEN],
    /// Limits applied when the record is opened
    #[zeroize(skip)]
    config: ZkConfig,
}

impl CommitmentRecord {
    /// Commit to `value` with a blinding from the operating system CSPRNG
    ///
    /// # Errors
    /// Returns `ZkpError::RngFailed` if blinding generation fails and
    /// `ZkpError::ResourceExceeded` if the value exceeds the default limit.
    pub fn commit(value: &[u8]) -> Result<Self> {
        Self::commit_with(value, &OsRandom, &ZkConfig::default())
    }

    /// Commit to `value` with a blinding drawn from `rng`
    ///
    /// # Errors
    /// Returns `ZkpError::RngFailed` if blinding generation fails and
    /// `ZkpError::ResourceExceeded` if the value exceeds `config.max_input_size`.
    #[instrument(level = "debug", skip_all, fields(value_len = value.len()))]
    pub fn commit_with(value: &[u8], rng: &dyn RandomSource, config: &ZkConfig) -> Result<Self> {
        config.check_input("value", value.len())?;

        let blinding: [u8; BLINDING_LEN] = random_array(rng)?;
        let record = Self::commit_with_blinding(value, blinding, config)?;

        debug!(commitment = %digest_prefix(&record.commitment), "value committed");
        Ok(record)
    }

    /// Commit with a caller-chosen blinding (for deterministic tests)
    ///
    /// # Errors
    /// Returns `ZkpError::ResourceExceeded` if the value exceeds `config.max_input_size`.
    #[instrument(level = "debug", skip_all, fields(value_len = value.len()))]
    pub fn commit_with_blinding(
        value: &[u8],
        blinding: [u8; BLINDING_LEN],
        config: &ZkConfig,
    ) -> Result<Self> {
        config.check_input("value", value.len())?;

        let commitment = compute_hash(value, &blinding);
        Ok(Self { commitment, blinding, config: *config })
    }

    /// The public commitment hash
    #[must_use]
    pub fn commitment(&self) -> &HashOutput {
        &self.commitment
    }

    /// The blinding needed to open the commitment
    #[must_use]
    pub fn blinding(&self) -> &[u8; BLINDING_LEN] {
        &self.blinding
    }

    /// Check an opening against the stored commitment.
    ///
    /// A wrong value, a wrong blinding, or a blinding of the wrong length
    /// yields `Ok(false)`. Comparison runs in constant time. The value is held
    /// to the limits the record was committed under.
    ///
    /// # Errors
    /// Returns `ZkpError::InvalidInput` if `blinding` is empty and
    /// `ZkpError::ResourceExceeded` if `value` exceeds `max_input_size`.
    #[instrument(
        level = "debug",
        skip_all,
        fields(commitment = %digest_prefix(&self.commitment), value_len = value.len())
    )]
    pub fn open(&self, value: &[u8], blinding: &[u8]) -> Result<bool> {
        if blinding.is_empty() {
            return Err(ZkpError::InvalidInput("blinding must not be empty".to_string()));
        }
        self.config.check_input("value", value.len())?;
        if blinding.len() != BLINDING_LEN {
            debug!(blinding_len = blinding.len(), "commitment opening rejected");
            return Ok(false);
        }

        let expected = hash_parts(&[value, blinding]);
        let valid = ct_eq(&expected, &self.commitment);
        if !valid {
            debug!("commitment opening rejected");
        }
        Ok(valid)
    }
}

impl fmt::Debug for CommitmentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentRecord")
            .field("commitment", &hex::encode(self.commitment))
            .field("blinding", &"[REDACTED]")
            .finish()
    }
}

/// H(value || blinding)
fn compute_hash(value: &[u8], blinding: &[u8; BLINDING_LEN]) -> HashOutput {
    hash_parts(&[value, blinding.as_slice()])
}
