use crate::crypto::hash::sha256_digest;
use crate::model::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// An all-zero 64-hex-char previous-hash, used both as the genesis block's
/// previous hash and as the timestamp-zeroed form for proof-of-work trial
/// hashing.
pub fn zero_hash() -> String {
    "0".repeat(64)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub timestamp: i64,
    pub nonce: i64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(timestamp: i64, nonce: i64, previous_hash: String, transactions: Vec<Transaction>) -> Self {
        Block {
            timestamp,
            nonce,
            previous_hash,
            transactions,
        }
    }

    /// SHA-256 over the canonical JSON encoding of this block.
    pub fn hash(&self) -> String {
        let bytes = serde_json::to_vec(self).expect("Block always serializes");
        data_encoding::HEXLOWER.encode(&sha256_digest(&bytes))
    }

    /// The same block with `timestamp` fixed to 0, as proof-of-work trial
    /// hashing requires so the search depends only on (nonce,
    /// previous_hash, transactions).
    pub fn with_zeroed_timestamp(&self) -> Block {
        Block {
            timestamp: 0,
            ..self.clone()
        }
    }

    /// The genesis block: `nonce=0`, previous hash derived from an
    /// all-zero, empty-transaction block, no transactions.
    pub fn genesis() -> Block {
        let zero_block = Block::new(0, 0, zero_hash(), vec![]);
        Block::new(0, 0, zero_block.hash(), vec![])
    }
}
