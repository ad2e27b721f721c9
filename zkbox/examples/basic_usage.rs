//! Basic zkbox Walkthrough
//!
//! Knowledge proof, commitment and Merkle inclusion proof, end to end.
//!
//! Run with: cargo run --package zkbox --example basic_usage
//! Set `RUST_LOG=zkbox=debug` to see the spans.

// Allow println! in examples - they're meant to output results
#![allow(clippy::print_stdout)]

use zkbox::logging::init_tracing;
use zkbox::{
    CommitmentRecord, MerkleTree, Prover, Statement, Verifier, Witness, verify_merkle_proof,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing()?;

    println!("Zero Knowledge Proof Example");
    println!("============================");

    println!("\n1. Basic Knowledge Proof:");
    knowledge_proof()?;

    println!("\n2. Commitment Scheme:");
    commitment()?;

    println!("\n3. Merkle Tree Proof:");
    merkle_tree()?;

    Ok(())
}

fn knowledge_proof() -> zkbox::Result<()> {
    let statement = Statement::new(b"I know a secret");
    let prover = Prover::new(statement.clone(), Witness::new(b"my secret password"));

    let proof = prover.generate_proof()?;
    println!("  Generated proof with commitment: {}...", hex::encode(&proof.commitment[..8]));

    if Verifier::new(statement).verify(&proof)? {
        println!("  Proof verified without the verifier seeing the secret");
    } else {
        println!("  Proof verification failed");
    }
    Ok(())
}

fn commitment() -> zkbox::Result<()> {
    let value = b"I commit to this value";
    let record = CommitmentRecord::commit(value)?;
    println!("  Committed to value (hash): {}...", hex::encode(&record.commitment()[..8]));

    if record.open(value, record.blinding())? {
        println!("  Commitment opened and checked against the original value");
    }
    if !record.open(b"a different value", record.blinding())? {
        println!("  A different value does not open the commitment");
    }
    Ok(())
}

fn merkle_tree() -> zkbox::Result<()> {
    let items = [b"item1", b"item2", b"item3", b"item4"];
    let tree = MerkleTree::build(&items)?;
    println!("  Merkle tree root: {}...", hex::encode(&tree.root()[..8]));
    println!("  Tree depth: {}", tree.depth());

    let proof = tree.generate_proof(1)?;
    println!("  Generated proof for item: {}", String::from_utf8_lossy(&proof.leaf));
    println!("  Proof path length: {}", proof.path.len());

    if verify_merkle_proof(&proof, tree.root()) {
        println!("  Merkle proof verified: item is in the tree");
    } else {
        println!("  Merkle proof verification failed");
    }
    Ok(())
}
