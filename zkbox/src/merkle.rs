//! Merkle Trees
//!
//! Binary hash tree over an ordered list of byte items with inclusion proofs.
//!
//! ## Construction
//!
//! - Leaf: H(item)
//! - Node: H(left || right)
//! - Odd level: the last node is promoted unchanged to the next level
//!
//! Promotion instead of duplication keeps `[a, b, c]` and `[a, b, c, c]` from
//! sharing a root. A promoted node has no sibling, so it adds no path step.
//!
//! Leaves and nodes are hashed without a domain tag, so a 64-byte "leaf" equal
//! to two child hashes verifies with a shortened path. Check `proof.leaf`
//! against the expected item set before trusting it.
//!
//! ```
//! use zkbox::merkle::{MerkleTree, verify_merkle_proof};
//!
//! let tree = MerkleTree::build(&[b"item1", b"item2", b"item3", b"item4"]).unwrap();
//! let proof = tree.generate_proof(1).unwrap();
//! assert_eq!(proof.path.len(), 2);
//! assert!(verify_merkle_proof(&proof, tree.root()));
//! ```

use crate::config::ZkConfig;
use crate::error::{Result, ZkpError};
use crate::hash::{HashOutput, ct_eq, hash, hash_parts};
use crate::logging::digest_prefix;
use tracing::{debug, instrument};

/// One step of an inclusion path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    /// Hash of the sibling at this level
    pub sibling: HashOutput,
    /// `true` if the node carried up is the left child, i.e. the parent is
    /// H(current || sibling); `false` means H(sibling || current)
    pub is_left: bool,
}

/// Inclusion proof for one leaf
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MerkleProof {
    /// The leaf item itself (not its hash)
    pub leaf: Vec<u8>,
    /// Sibling hashes from the leaf level up to just below the root
    pub path: Vec<PathStep>,
}

impl MerkleProof {
    /// Fold the path starting from H(leaf) and return the resulting root
    #[must_use]
    pub fn compute_root(&self) -> HashOutput {
        self.path.iter().fold(hash(&self.leaf), |current, step| {
            if step.is_left {
                hash_node(&current, &step.sibling)
            } else {
                hash_node(&step.sibling, &current)
            }
        })
    }
}

/// Immutable Merkle tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    leaves: Vec<Vec<u8>>,
    /// levels[0] are the leaf hashes, the last level holds only the root
    levels: Vec<Vec<HashOutput>>,
    root: HashOutput,
    depth: usize,
    config: ZkConfig,
}

impl MerkleTree {
    /// Build a tree over `items` with the default limits
    ///
    /// # Errors
    /// Returns `ZkpError::InvalidInput` if `items` is empty and
    /// `ZkpError::ResourceExceeded` if a limit is exceeded.
    pub fn build<T: AsRef<[u8]>>(items: &[T]) -> Result<Self> {
        Self::build_with_config(items, &ZkConfig::default())
    }

    /// Build a tree over `items`, copying each item
    ///
    /// # Errors
    /// Returns `ZkpError::InvalidInput` if `items` is empty and
    /// `ZkpError::ResourceExceeded` if there are more than
    /// `config.max_merkle_leaves` items or one exceeds `config.max_input_size`.
    #[instrument(level = "debug", skip_all, fields(leaf_count = items.len()))]
    pub fn build_with_config<T: AsRef<[u8]>>(items: &[T], config: &ZkConfig) -> Result<Self> {
        if items.is_empty() {
            return Err(ZkpError::InvalidInput(
                "cannot build a Merkle tree with no items".to_string(),
            ));
        }
        if items.len() > config.max_merkle_leaves {
            return Err(ZkpError::ResourceExceeded(format!(
                "too many Merkle leaves: {} (max {})",
                items.len(),
                config.max_merkle_leaves
            )));
        }
        for item in items {
            config.check_input("Merkle item", item.as_ref().len())?;
        }

        let leaves: Vec<Vec<u8>> = items.iter().map(|item| item.as_ref().to_vec()).collect();
        let mut levels = vec![leaves.iter().map(|leaf| hash(leaf)).collect::<Vec<_>>()];

        loop {
            let current = &levels[levels.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = next_level(current);
            levels.push(next);
        }

        let root = levels[levels.len() - 1][0];
        let depth = levels.len() - 1;

        debug!(root = %digest_prefix(&root), depth, "Merkle tree built");
        Ok(Self { leaves, levels, root, depth, config: *config })
    }

    /// The root hash
    #[must_use]
    pub fn root(&self) -> &HashOutput {
        &self.root
    }

    /// Number of levels above the leaves; 0 for a single leaf
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The items the tree was built from, in order
    #[must_use]
    pub fn leaves(&self) -> &[Vec<u8>] {
        &self.leaves
    }

    /// Number of leaves
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always `false`: a tree has at least one leaf
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// H(items[index]), if the index exists
    #[must_use]
    pub fn leaf_hash(&self, index: usize) -> Option<&HashOutput> {
        self.levels.first().and_then(|level| level.get(index))
    }

    /// All node hashes, leaf level first
    #[must_use]
    pub fn levels(&self) -> &[Vec<HashOutput>] {
        &self.levels
    }

    /// Inclusion proof for the leaf at `index`
    ///
    /// # Errors
    /// Returns `ZkpError::IndexOutOfRange` if `index >= self.len()`.
    #[instrument(level = "debug", skip(self), fields(leaf_count = self.leaves.len()))]
    pub fn generate_proof(&self, index: usize) -> Result<MerkleProof> {
        let leaf = self
            .leaves
            .get(index)
            .ok_or(ZkpError::IndexOutOfRange { index, len: self.leaves.len() })?;

        let mut path = Vec::with_capacity(self.depth);
        let mut position = index;
        for level in &self.levels[..self.depth] {
            if let Some(sibling) = level.get(position ^ 1) {
                path.push(PathStep { sibling: *sibling, is_left: position % 2 == 0 });
            }
            position /= 2;
        }

        Ok(MerkleProof { leaf: leaf.clone(), path })
    }

    /// Check `proof` against this tree's root, under the limits the tree
    /// was built with. A leaf over `max_input_size` returns `false`.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(path_len = proof.path.len()))]
    pub fn verify_proof(&self, proof: &MerkleProof) -> bool {
        verify_merkle_proof_with_config(proof, &self.root, &self.config).unwrap_or(false)
    }
}

/// Check an inclusion proof against `root` with the default limits.
///
/// Recomputes the chain from H(proof.leaf) along `proof.path` and compares
/// the result to `root`. Any mismatch, or a leaf over the default
/// `max_input_size`, returns `false`.
#[must_use]
pub fn verify_merkle_proof(proof: &MerkleProof, root: &HashOutput) -> bool {
    verify_merkle_proof_with_config(proof, root, &ZkConfig::default()).unwrap_or(false)
}

/// Check an inclusion proof against `root`
///
/// # Errors
/// Returns `ZkpError::ResourceExceeded` if `proof.leaf` exceeds
/// `config.max_input_size`.
#[instrument(
    level = "debug",
    skip_all,
    fields(root = %digest_prefix(root), path_len = proof.path.len())
)]
pub fn verify_merkle_proof_with_config(
    proof: &MerkleProof,
    root: &HashOutput,
    config: &ZkConfig,
) -> Result<bool> {
    config.check_input("Merkle leaf", proof.leaf.len())?;

    let valid = ct_eq(&proof.compute_root(), root);
    if !valid {
        debug!("Merkle proof rejected");
    }
    Ok(valid)
}

/// Pair up nodes left to right; a trailing odd node moves up unchanged
fn next_level(level: &[HashOutput]) -> Vec<HashOutput> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_node(left, right),
            _ => pair[0],
        })
        .collect()
}

/// H(left || right)
fn hash_node(left: &HashOutput, right: &HashOutput) -> HashOutput {
    hash_parts(&[left.as_slice(), right.as_slice()])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<Vec<u8>> {
        (1..=n).map(|i| format!("item{}", i).into_bytes()).collect()
    }

    #[test]
    fn test_four_leaf_tree() {
        let tree = MerkleTree::build(&items(4)).unwrap();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.len(), 4);

        let h: Vec<HashOutput> = items(4).iter().map(|item| hash(item)).collect();
        let expected = hash_node(&hash_node(&h[0], &h[1]), &hash_node(&h[2], &h[3]));
        assert_eq!(tree.root(), &expected);

        let proof = tree.generate_proof(1).unwrap();
        assert_eq!(proof.leaf, b"item2");
        assert_eq!(
            proof.path,
            vec![
                PathStep { sibling: h[0], is_left: false },
                PathStep { sibling: hash_node(&h[2], &h[3]), is_left: true },
            ]
        );
        assert!(verify_merkle_proof(&proof, tree.root()));
    }

    #[test]
    fn test_odd_node_is_promoted() {
        let tree = MerkleTree::build(&items(3)).unwrap();
        let h: Vec<HashOutput> = items(3).iter().map(|item| hash(item)).collect();

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.levels()[1], vec![hash_node(&h[0], &h[1]), h[2]]);
        assert_eq!(tree.root(), &hash_node(&hash_node(&h[0], &h[1]), &h[2]));

        // The promoted leaf skips the level where it has no sibling.
        let proof = tree.generate_proof(2).unwrap();
        let expected = vec![PathStep { sibling: hash_node(&h[0], &h[1]), is_left: false }];
        assert_eq!(proof.path, expected);
        assert!(tree.verify_proof(&proof));
    }

    #[test]
    fn test_promotion_differs_from_duplication() {
        let three = MerkleTree::build(&[b"a", b"b", b"c"]).unwrap();
        let four = MerkleTree::build(&[b"a", b"b", b"c", b"c"]).unwrap();
        assert_ne!(three.root(), four.root());
    }

    #[test]
    fn test_single_leaf_tree() {
        let tree = MerkleTree::build(&[b"single leaf"]).unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root(), &hash(b"single leaf"));

        let proof = tree.generate_proof(0).unwrap();
        assert!(proof.path.is_empty());
        assert!(verify_merkle_proof(&proof, tree.root()));
    }

    #[test]
    fn test_out_of_range_index() {
        let tree = MerkleTree::build(&items(4)).unwrap();
        assert_eq!(
            tree.generate_proof(4).unwrap_err(),
            ZkpError::IndexOutOfRange { index: 4, len: 4 }
        );
        assert!(matches!(
            tree.generate_proof(usize::MAX),
            Err(ZkpError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_items_rejected() {
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(MerkleTree::build(&empty), Err(ZkpError::InvalidInput(_))));
    }

    #[test]
    fn test_leaf_hash_accessor() {
        let tree = MerkleTree::build(&items(2)).unwrap();
        assert_eq!(tree.leaf_hash(1), Some(&hash(b"item2")));
        assert_eq!(tree.leaf_hash(2), None);
    }

    #[test]
    fn test_oversized_leaf_rejected_by_limit() {
        let config = ZkConfig::new().with_max_input_size(8);
        let tree = MerkleTree::build_with_config(&items(4), &config).unwrap();

        let mut proof = tree.generate_proof(0).unwrap();
        assert_eq!(verify_merkle_proof_with_config(&proof, tree.root(), &config), Ok(true));

        proof.leaf = vec![0u8; 64];
        assert!(matches!(
            verify_merkle_proof_with_config(&proof, tree.root(), &config),
            Err(ZkpError::ResourceExceeded(_))
        ));
        assert!(!tree.verify_proof(&proof));
    }

    #[test]
    fn test_interior_node_passes_as_leaf() {
        let tree = MerkleTree::build(&items(4)).unwrap();
        let level = &tree.levels()[1];

        // Without domain tags the two children of the root fold to the root.
        let forged = MerkleProof { leaf: [level[0], level[1]].concat(), path: Vec::new() };
        assert!(verify_merkle_proof(&forged, tree.root()));
        assert!(!tree.leaves().contains(&forged.leaf));
    }
}
