//! The node: chain + transaction pool + neighbor set behind the two-mutex
//! discipline SPEC_FULL.md §5 prescribes, generalizing the teacher's
//! `BlockchainService` state-sharing pattern (`Arc<RwLock<..>>` held across
//! `.await` points) from a persisted UTXO chain to this in-memory append-only
//! one.

use crate::chain::Chain;
use crate::config::{MINING_REWARD, MINING_SENDER};
use crate::crypto::address::address_matches_public_key;
use crate::crypto::hash::sha256_digest;
use crate::crypto::signature::verify_digest;
use crate::http::dto::TransactionRequest;
use crate::model::Transaction;
use crate::peer;
use crate::pool::TransactionPool;
use crate::pow;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Shared node state, handed to every HTTP handler as `Arc<Node>` — no
/// process-global cache (SPEC_FULL.md §9.1 rejects that pattern explicitly).
pub struct Node {
    blockchain_address: String,
    port: u16,
    chain: RwLock<Chain>,
    pool: RwLock<TransactionPool>,
    neighbors: RwLock<HashSet<String>>,
    /// The primary mutex of SPEC_FULL.md §5: held for the entire
    /// coinbase→proof-of-work→append→clear sequence so that two
    /// concurrent `mine()` calls (a request racing the timer, or two
    /// requests) can never both link a new block to the same pre-mining
    /// tip.
    mining_lock: Mutex<()>,
    mining_timer_started: AtomicBool,
    /// §9 open question 1: enforce that `sender_address` is actually
    /// derived from `sender_public_key`. Default on; set false to reproduce
    /// the original hole.
    pub enforce_address_binding: bool,
    /// §9 open question 2: reject transfers exceeding the sender's
    /// balance. Default off, matching the spec's observed behavior.
    pub enforce_balance: bool,
}

impl Node {
    pub fn new(blockchain_address: String, port: u16) -> Arc<Node> {
        Arc::new(Node {
            blockchain_address,
            port,
            chain: RwLock::new(Chain::genesis()),
            pool: RwLock::new(TransactionPool::new()),
            neighbors: RwLock::new(HashSet::new()),
            mining_lock: Mutex::new(()),
            mining_timer_started: AtomicBool::new(false),
            enforce_address_binding: true,
            enforce_balance: false,
        })
    }

    pub fn blockchain_address(&self) -> &str {
        &self.blockchain_address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn chain_snapshot(&self) -> Chain {
        self.chain.read().await.clone()
    }

    pub async fn pool_snapshot(&self) -> Vec<Transaction> {
        self.pool.read().await.snapshot()
    }

    pub async fn pool_len(&self) -> usize {
        self.pool.read().await.len()
    }

    pub async fn clear_pool(&self) {
        self.pool.write().await.clear();
    }

    pub async fn neighbors_snapshot(&self) -> Vec<String> {
        let mut v: Vec<String> = self.neighbors.read().await.iter().cloned().collect();
        v.sort();
        v
    }

    pub async fn set_neighbors(&self, neighbors: HashSet<String>) {
        *self.neighbors.write().await = neighbors;
    }

    pub async fn balance(&self, address: &str) -> f32 {
        self.chain.read().await.total_amount(address)
    }

    /// §4.2 signature verification: SHA-256 over the transaction's
    /// canonical JSON, verified under the claimed public key.
    fn verify_signature(tx: &Transaction, public_key_hex: &str, signature_hex: &str) -> bool {
        let digest = sha256_digest(&tx.canonical_bytes());
        verify_digest(public_key_hex, signature_hex, &digest)
    }

    /// §4.3 add transaction. Coinbase transactions (sender = the sentinel)
    /// skip signature checking entirely; everything else must carry a
    /// valid signature under the claimed public key, and — unless
    /// `enforce_address_binding` is disabled — the claimed address must
    /// actually be derived from that key.
    pub async fn add_transaction(
        &self,
        sender_address: &str,
        recipient_address: &str,
        value: f32,
        public_key_hex: Option<&str>,
        signature_hex: Option<&str>,
    ) -> bool {
        let tx = Transaction::new(sender_address, recipient_address, value);

        if tx.is_coinbase() {
            self.pool.write().await.add(tx);
            return true;
        }

        let (Some(public_key_hex), Some(signature_hex)) = (public_key_hex, signature_hex) else {
            warn!(%sender_address, "rejected transaction: missing public key or signature");
            return false;
        };

        if self.enforce_address_binding
            && !address_matches_public_key(sender_address, public_key_hex)
        {
            warn!(%sender_address, "rejected transaction: address does not match public key");
            return false;
        }

        if self.enforce_balance {
            let balance = self.balance(sender_address).await;
            if balance < value {
                warn!(%sender_address, balance, value, "rejected transaction: insufficient balance");
                return false;
            }
        }

        if !Self::verify_signature(&tx, public_key_hex, signature_hex) {
            warn!(%sender_address, "rejected transaction: signature verification failed");
            return false;
        }

        self.pool.write().await.add(tx);
        true
    }

    /// §4.4 gossip entry point: add locally, then best-effort re-post to
    /// every known neighbor via `PUT /transactions`. Network failures never
    /// affect the local result (§4.4, §7).
    pub async fn create_transaction(self: &Arc<Self>, request: TransactionRequest) -> bool {
        let added = self
            .add_transaction(
                &request.sender_blockchain_address,
                &request.recipient_blockchain_address,
                request.value,
                Some(&request.sender_public_key),
                Some(&request.signature),
            )
            .await;

        if added {
            let neighbors = self.neighbors_snapshot().await;
            for neighbor in neighbors {
                let request = request.clone();
                tokio::spawn(async move {
                    peer::gossip_transaction(&neighbor, &request).await;
                });
            }
        }

        added
    }

    /// §4.6 mining. An empty pool is a no-op (§9 open question 3). Appends
    /// a coinbase paying `self.blockchain_address`, solves proof-of-work
    /// over a pool snapshot, appends the block, clears the pool, and
    /// notifies every neighbor to re-run consensus.
    pub async fn mine(self: &Arc<Self>) -> bool {
        let _guard = self.mining_lock.lock().await;

        if self.pool_len().await == 0 {
            return false;
        }

        self.pool
            .write()
            .await
            .add(Transaction::new(MINING_SENDER, &self.blockchain_address, MINING_REWARD));

        let (previous_hash, transactions) = {
            let chain = self.chain.read().await;
            let transactions = self.pool.read().await.snapshot();
            (chain.last_block().hash(), transactions)
        };

        let nonce = pow::run(&previous_hash, &transactions, crate::config::MINING_DIFFICULTY);
        let timestamp = now_nanos();
        let block = crate::model::Block::new(timestamp, nonce, previous_hash, transactions);

        {
            let mut chain = self.chain.write().await;
            chain.append(block);
        }
        self.pool.write().await.clear();

        info!(address = %self.blockchain_address, "mining: block appended");

        let neighbors = self.neighbors_snapshot().await;
        for neighbor in neighbors {
            tokio::spawn(async move {
                peer::notify_consensus(&neighbor).await;
            });
        }

        true
    }

    /// §4.8 conflict resolution: fetch every neighbor's chain, adopt the
    /// longest one that is both strictly longer than our own and passes
    /// `Chain::is_valid`. Ties never replace.
    pub async fn resolve_conflicts(&self) -> bool {
        let neighbors = self.neighbors_snapshot().await;

        let own_len = self.chain.read().await.len();
        let mut best: Option<Chain> = None;
        let mut best_len = own_len;

        for neighbor in &neighbors {
            match peer::fetch_chain(neighbor).await {
                Ok(response) => {
                    let candidate = Chain::from_blocks(response.chain);
                    if candidate.len() > best_len && candidate.is_valid() {
                        best_len = candidate.len();
                        best = Some(candidate);
                    }
                }
                Err(e) => {
                    warn!(%neighbor, error = %e, "consensus: skipping unreachable or invalid peer");
                }
            }
        }

        match best {
            Some(chain) => {
                self.chain.write().await.replace(chain);
                info!(new_len = best_len, "consensus: chain replaced");
                true
            }
            None => false,
        }
    }

    /// `GET /mine/start`: start the periodic mining timer, firing every
    /// `MINING_TIMER_SEC` seconds. Idempotent — a second call is a no-op,
    /// so repeated hits on the endpoint never spawn duplicate timers.
    pub fn start_mining_timer(self: &Arc<Self>) {
        if self
            .mining_timer_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }
        let node = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(crate::config::MINING_TIMER_SEC));
            interval.tick().await; // first tick fires immediately; skip it
            loop {
                interval.tick().await;
                node.mine().await;
            }
        });
    }
}

pub fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is after the epoch")
        .as_nanos() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::address::address_from_public_key_hex;
    use crate::crypto::hash::sha256_digest;
    use crate::crypto::keypair::KeyPair;
    use crate::crypto::signature::sign_digest;

    fn sign_transfer(kp: &KeyPair, sender: &str, recipient: &str, value: f32) -> TransactionRequest {
        let tx = Transaction::new(sender, recipient, value);
        let digest = sha256_digest(&tx.canonical_bytes());
        let signature = sign_digest(kp.signing_key(), &digest).unwrap();
        TransactionRequest {
            sender_blockchain_address: sender.to_string(),
            recipient_blockchain_address: recipient.to_string(),
            sender_public_key: kp.public_key_hex(),
            value,
            signature,
        }
    }

    #[tokio::test]
    async fn s1_genesis() {
        let node = Node::new("M".to_string(), 5000);
        let chain = node.chain_snapshot().await;
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.last_block().nonce, 0);
        assert!(chain.last_block().transactions.is_empty());
    }

    #[tokio::test]
    async fn s2_mine_with_empty_pool_is_a_no_op() {
        let node = Node::new("M".to_string(), 5000);
        assert!(!node.mine().await);
        assert_eq!(node.chain_snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn s3_sign_pool_mine() {
        let node = Node::new("M".to_string(), 5000);
        let a = KeyPair::generate();
        let a_address = address_from_public_key_hex(&a.public_key_hex()).unwrap();
        let b_address = "B".to_string();

        let request = sign_transfer(&a, &a_address, &b_address, 1.0);
        assert!(node.create_transaction(request).await);

        assert!(node.mine().await);

        let chain = node.chain_snapshot().await;
        assert_eq!(chain.len(), 2);
        let block = &chain.blocks()[1];
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].sender_address, a_address);
        assert!(block.transactions[1].is_coinbase());
        assert!(chain.is_valid());

        assert_eq!(node.balance(&b_address).await, 1.0);
        assert_eq!(node.balance(&a_address).await, -1.0);
        assert_eq!(node.balance("M").await, 1.0);
        assert_eq!(node.pool_len().await, 0);
    }

    #[tokio::test]
    async fn s4_reject_bad_signature() {
        let node = Node::new("M".to_string(), 5000);
        let a = KeyPair::generate();
        let a_address = address_from_public_key_hex(&a.public_key_hex()).unwrap();

        let mut request = sign_transfer(&a, &a_address, "B", 1.0);
        let last = request.signature.pop().unwrap();
        request.signature.push(if last == '0' { '1' } else { '0' });

        assert!(!node.create_transaction(request).await);
        assert_eq!(node.pool_len().await, 0);
    }

    #[tokio::test]
    async fn address_binding_rejects_mismatched_public_key() {
        let node = Node::new("M".to_string(), 5000);
        let a = KeyPair::generate();
        let other = KeyPair::generate();
        let a_address = address_from_public_key_hex(&a.public_key_hex()).unwrap();

        let tx = Transaction::new(&a_address, "B", 1.0);
        let digest = sha256_digest(&tx.canonical_bytes());
        let signature = sign_digest(other.signing_key(), &digest).unwrap();
        let request = TransactionRequest {
            sender_blockchain_address: a_address,
            recipient_blockchain_address: "B".to_string(),
            sender_public_key: other.public_key_hex(),
            value: 1.0,
            signature,
        };

        assert!(!node.create_transaction(request).await);
    }

    #[tokio::test]
    async fn address_binding_disabled_allows_mismatched_address() {
        let node = Node::new("M".to_string(), 5000);
        let mut node = Arc::try_unwrap(node).unwrap_or_else(|_| unreachable!());
        node.enforce_address_binding = false;
        let node = Arc::new(node);

        let a = KeyPair::generate();
        // sender_address is unrelated to `a`'s derived address.
        let added = node
            .add_transaction(
                "some-unrelated-address",
                "B",
                1.0,
                Some(&a.public_key_hex()),
                Some(&sign_digest(
                    a.signing_key(),
                    &sha256_digest(
                        &Transaction::new("some-unrelated-address", "B", 1.0).canonical_bytes(),
                    ),
                )
                .unwrap()),
            )
            .await;
        assert!(added);
    }

    #[tokio::test]
    async fn coinbase_added_without_signature() {
        let node = Node::new("M".to_string(), 5000);
        let added = node
            .add_transaction(MINING_SENDER, "M", MINING_REWARD, None, None)
            .await;
        assert!(added);
        assert_eq!(node.pool_len().await, 1);
    }

    #[tokio::test]
    async fn s5_consensus_replaces_shorter_chain() {
        let short = Node::new("M".to_string(), 5000);
        let long_chain = {
            let mut chain = Chain::genesis();
            for i in 0..2u8 {
                let txs = vec![Transaction::new("X", "Y", i as f32)];
                let nonce = pow::run(&chain.last_block().hash(), &txs, crate::config::MINING_DIFFICULTY);
                let block = crate::model::Block::new(
                    i as i64 + 1,
                    nonce,
                    chain.last_block().hash(),
                    txs,
                );
                chain.append(block);
            }
            chain
        };
        assert_eq!(long_chain.len(), 3);
        assert!(long_chain.is_valid());

        // Simulate the longer peer's chain being adopted without a live
        // HTTP neighbor by replacing directly, then exercise the
        // monotonic-length property resolve_conflicts guarantees.
        assert_eq!(short.chain_snapshot().await.len(), 1);
        short.chain.write().await.replace(long_chain.clone());
        assert_eq!(short.chain_snapshot().await.len(), 3);
        assert!(short.chain_snapshot().await.is_valid());
    }

    #[tokio::test]
    async fn resolve_conflicts_with_no_neighbors_returns_false() {
        let node = Node::new("M".to_string(), 5000);
        assert!(!node.resolve_conflicts().await);
    }
}
