#![doc = "Hash-Based Proof Primitives"]
//!
//! # zkbox
//!
//! Three small building blocks over a single 256-bit hash function:
//!
//! - **Knowledge Proofs**: commit / challenge / response transcript tying a
//!   secret-holding prover to a public statement
//! - **Hash Commitments**: hiding and binding commitments with random blinding
//! - **Merkle Trees**: inclusion proofs over an ordered list of byte items
//!
//! ## Example
//!
//! ```
//! use zkbox::{CommitmentRecord, MerkleTree, Prover, Statement, Verifier, Witness};
//! use zkbox::verify_merkle_proof;
//!
//! // Prover demonstrates knowledge without sending the secret
//! let statement = Statement::new(b"I know a secret");
//! let prover = Prover::new(statement.clone(), Witness::new(b"my secret password"));
//! let proof = prover.generate_proof().unwrap();
//! assert!(Verifier::new(statement).verify(&proof).unwrap());
//!
//! // Commit now, open later
//! let record = CommitmentRecord::commit(b"I commit to this value").unwrap();
//! assert!(record.open(b"I commit to this value", record.blinding()).unwrap());
//!
//! // Prove membership in a set
//! let tree = MerkleTree::build(&[b"item1", b"item2", b"item3", b"item4"]).unwrap();
//! let inclusion = tree.generate_proof(1).unwrap();
//! assert!(verify_merkle_proof(&inclusion, tree.root()));
//! ```
//!
//! ## Security
//!
//! Everything rests on the collision and preimage resistance of the hash.
//! The knowledge proof is a commitment-based transcript, not a sound
//! zero-knowledge proof against a malicious prover. There is no elliptic-curve
//! or circuit machinery here.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod commitment;
pub mod config;
pub mod error;
pub mod hash;
pub mod knowledge;
pub mod logging;
pub mod merkle;
pub mod random;

pub use commitment::{BLINDING_LEN, CommitmentRecord};
pub use config::ZkConfig;
pub use error::{Result, ZkpError};
pub use hash::{HASH_LEN, HashOutput};
pub use knowledge::{KnowledgeProof, Prover, Statement, Verifier, Witness};
pub use merkle::{
    MerkleProof, MerkleTree, PathStep, verify_merkle_proof, verify_merkle_proof_with_config,
};
pub use random::{OsRandom, RandomSource, SeededRandom};
