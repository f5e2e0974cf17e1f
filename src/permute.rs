//! Keyed, reproducible permutation of block indices.
//!
//! The secret is hashed with SHA-256 to a 32-byte seed; the seed feeds
//! `ChaCha20Rng` directly, and the permutation is a Fisher-Yates shuffle via
//! `rand::seq::SliceRandom::shuffle`. Both the generator and the shuffle
//! direction are part of the on-image wire format — changing either breaks
//! interoperability with images embedded by a prior build.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

/// Derive the `[0, n)` permutation keyed by `secret`.
///
/// Identical `secret` and `n` always yield an identical order.
pub fn keyed_permutation(secret: &str, n: usize) -> Vec<usize> {
    let seed: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
    let mut rng = ChaCha20Rng::from_seed(seed);
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    indices
}
