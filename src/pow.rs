//! Proof-of-work: nonce search for a hash prefix of `difficulty` zero hex
//! digits, grounded in the teacher's `ProofOfWork` struct/`run()` shape but
//! using a leading-hex-zero-nibble check rather than a BigInt target
//! comparison.

use crate::model::Block;
use tracing::debug;

/// A trial block hashes valid if its first `difficulty` hex characters are
/// `'0'`.
pub fn valid_proof(
    nonce: i64,
    previous_hash: &str,
    transactions: &[crate::model::Transaction],
    difficulty: usize,
) -> bool {
    let trial = Block::new(0, nonce, previous_hash.to_string(), transactions.to_vec());
    let hash = trial.hash();
    hash.as_bytes()[..difficulty].iter().all(|&b| b == b'0')
}

/// Search for the smallest non-negative nonce for which `valid_proof`
/// holds, starting from `previous_hash` and a snapshot of the pending
/// transactions.
pub fn run(previous_hash: &str, transactions: &[crate::model::Transaction], difficulty: usize) -> i64 {
    let mut nonce: i64 = 0;
    debug!("mining: searching for a valid nonce");
    while !valid_proof(nonce, previous_hash, transactions, difficulty) {
        nonce += 1;
    }
    debug!(nonce, "mining: found a valid nonce");
    nonce
}
