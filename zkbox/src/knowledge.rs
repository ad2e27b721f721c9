//! Hash-Based Knowledge Proofs
//!
//! A three-message (commit, challenge, response) proof that the prover holds a
//! secret while talking about a public statement.
//!
//! ## Protocol
//!
//! Given statement S and secret w:
//!
//! 1. Prover picks random nonce k, computes C = H(w || k)
//! 2. Challenge c is 32 fresh random bytes, independent of w and k
//! 3. Response r = H(TAG || S || C || c)
//! 4. Verifier recomputes r from S, C and c and compares in constant time
//!
//! The proof never contains w or k. The verifier only checks that the response
//! binds this statement to this commitment and challenge. This is a
//! commitment-based construction, not a sound zero-knowledge proof against a
//! malicious prover.

use crate::config::ZkConfig;
use crate::error::{Result, ZkpError};
use crate::hash::{HashOutput, ct_eq, hash_parts};
use crate::logging::digest_prefix;
use crate::random::{OsRandom, RandomSource, random_array};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Nonce length in bytes
pub const NONCE_LEN: usize = 32;

/// Challenge length in bytes
pub const CHALLENGE_LEN: usize = 32;

const RESPONSE_TAG: &[u8] = b"zkbox/knowledge-response-v1";

/// Public value the prover makes a claim about
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    public_value: Vec<u8>,
}

impl Statement {
    /// Create a statement from a copy of `public_value`
    #[must_use]
    pub fn new(public_value: &[u8]) -> Self {
        Self { public_value: public_value.to_vec() }
    }

    /// The public value
    #[must_use]
    pub fn public_value(&self) -> &[u8] {
        &self.public_value
    }
}

/// Secret known only to the prover
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Witness {
    secret: Vec<u8>,
}

impl Witness {
    /// Create a witness from a copy of `secret`
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self { secret: secret.to_vec() }
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Witness").field("secret", &"[REDACTED]").finish()
    }
}

/// Proof transcript
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnowledgeProof {
    /// C = H(secret || nonce)
    pub commitment: HashOutput,
    /// Random challenge c
    pub challenge: [u8; CHALLENGE_LEN],
    /// r = H(TAG || statement || C || c)
    pub response: HashOutput,
}

/// Prover (holds the witness)
pub struct Prover {
    statement: Statement,
    witness: Witness,
    rng: Arc<dyn RandomSource>,
    config: ZkConfig,
}

impl Prover {
    /// Create a prover backed by the operating system CSPRNG
    #[must_use]
    pub fn new(statement: Statement, witness: Witness) -> Self {
        Self::with_random_source(statement, witness, Arc::new(OsRandom))
    }

    /// Create a prover that draws nonces and challenges from `rng`
    #[must_use]
    pub fn with_random_source(
        statement: Statement,
        witness: Witness,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self { statement, witness, rng, config: ZkConfig::default() }
    }

    /// Replace the resource limits
    #[must_use]
    pub fn with_config(mut self, config: ZkConfig) -> Self {
        self.config = config;
        self
    }

    /// The statement this prover makes claims about
    #[must_use]
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Generate a proof
    ///
    /// # Errors
    /// Returns `ZkpError::InvalidInput` if the statement or secret is empty,
    /// `ZkpError::ResourceExceeded` if either exceeds the configured limit, and
    /// `ZkpError::RngFailed` if the random source fails.
    #[instrument(
        level = "debug",
        skip_all,
        fields(statement_len = self.statement.public_value.len())
    )]
    pub fn generate_proof(&self) -> Result<KnowledgeProof> {
        if self.statement.public_value.is_empty() {
            return Err(ZkpError::InvalidInput("statement must not be empty".to_string()));
        }
        if self.witness.secret.is_empty() {
            return Err(ZkpError::InvalidInput("witness must not be empty".to_string()));
        }
        self.config.check_input("statement", self.statement.public_value.len())?;
        self.config.check_input("witness", self.witness.secret.len())?;

        let mut nonce: [u8; NONCE_LEN] = random_array(self.rng.as_ref())?;
        let commitment = hash_parts(&[self.witness.secret.as_slice(), nonce.as_slice()]);
        nonce.zeroize();

        let challenge: [u8; CHALLENGE_LEN] = random_array(self.rng.as_ref())?;
        let response = compute_response(&self.statement, &commitment, &challenge);

        debug!(commitment = %digest_prefix(&commitment), "knowledge proof generated");
        Ok(KnowledgeProof { commitment, challenge, response })
    }
}

impl fmt::Debug for Prover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prover")
            .field("statement", &self.statement)
            .field("witness", &self.witness)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Verifier (only knows the statement)
#[derive(Debug, Clone)]
pub struct Verifier {
    statement: Statement,
    config: ZkConfig,
}

impl Verifier {
    /// Create a verifier for `statement`
    #[must_use]
    pub fn new(statement: Statement) -> Self {
        Self { statement, config: ZkConfig::default() }
    }

    /// Replace the resource limits
    #[must_use]
    pub fn with_config(mut self, config: ZkConfig) -> Self {
        self.config = config;
        self
    }

    /// Verify a proof against this verifier's statement.
    ///
    /// A tampered or foreign proof yields `Ok(false)`.
    ///
    /// # Errors
    /// Returns `ZkpError::InvalidInput` if the statement is empty and
    /// `ZkpError::ResourceExceeded` if it exceeds the configured limit.
    #[instrument(
        level = "debug",
        skip_all,
        fields(commitment = %digest_prefix(&proof.commitment))
    )]
    pub fn verify(&self, proof: &KnowledgeProof) -> Result<bool> {
        if self.statement.public_value.is_empty() {
            return Err(ZkpError::InvalidInput("statement must not be empty".to_string()));
        }
        self.config.check_input("statement", self.statement.public_value.len())?;

        let expected = compute_response(&self.statement, &proof.commitment, &proof.challenge);
        let valid = ct_eq(&expected, &proof.response);
        if !valid {
            debug!("knowledge proof rejected");
        }
        Ok(valid)
    }
}

/// r = H(TAG || statement || C || c)
///
/// C and c are fixed length, so the variable-length statement cannot shift
/// bytes between fields.
fn compute_response(
    statement: &Statement,
    commitment: &HashOutput,
    challenge: &[u8; CHALLENGE_LEN],
) -> HashOutput {
    hash_parts(&[
        RESPONSE_TAG,
        statement.public_value.as_slice(),
        commitment.as_slice(),
        challenge.as_slice(),
    ])
}
