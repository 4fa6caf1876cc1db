use crate::model::Transaction;

/// The pending-transaction buffer for the next block. Insertion order is
/// preserved and becomes block order.
#[derive(Default)]
pub struct TransactionPool {
    inner: Vec<Transaction>,
}

impl TransactionPool {
    pub fn new() -> Self {
        TransactionPool { inner: Vec::new() }
    }

    pub fn add(&mut self, tx: Transaction) {
        self.inner.push(tx);
    }

    /// A deep copy of the pool's contents, used by proof-of-work so that
    /// transactions arriving mid-search don't alter the nonce it finds.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.inner.clone()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
