use crate::config::MINING_DIFFICULTY;
use crate::model::Block;
use crate::pow::valid_proof;

/// A non-empty, append-only sequence of blocks.
#[derive(Clone)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    pub fn genesis() -> Chain {
        Chain {
            blocks: vec![Block::genesis()],
        }
    }

    /// Build a chain from blocks fetched off the wire. Callers must check
    /// `is_valid()` before trusting it — this constructor does not
    /// validate.
    pub fn from_blocks(blocks: Vec<Block>) -> Chain {
        Chain { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn last_block(&self) -> &Block {
        self.blocks.last().expect("chain is never empty")
    }

    pub fn append(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn replace(&mut self, other: Chain) {
        self.blocks = other.blocks;
    }

    /// Walk from index 1, requiring each block's `previous_hash` to match
    /// its predecessor's hash and `valid_proof` to hold. Genesis is trusted
    /// unconditionally.
    pub fn is_valid(&self) -> bool {
        for i in 1..self.blocks.len() {
            let previous = &self.blocks[i - 1];
            let block = &self.blocks[i];
            if block.previous_hash != previous.hash() {
                return false;
            }
            if !valid_proof(
                block.nonce,
                &block.previous_hash,
                &block.transactions,
                MINING_DIFFICULTY,
            ) {
                return false;
            }
        }
        true
    }

    /// Signed sum of every transaction touching `address`: `+value` as
    /// recipient, `-value` as sender, summed in chain/transaction order
    /// with plain `f32` arithmetic (see SPEC_FULL.md §9.5 — non-associative
    /// by design, not a bug to fix).
    pub fn total_amount(&self, address: &str) -> f32 {
        let mut total: f32 = 0.0;
        for block in &self.blocks {
            for tx in &block.transactions {
                if tx.sender_address == address {
                    total -= tx.value;
                }
                if tx.recipient_address == address {
                    total += tx.value;
                }
            }
        }
        total
    }
}
