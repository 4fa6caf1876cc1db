//! Wire types for both the node's and the wallet service's HTTP surfaces.
//!
//! Incoming requests use plain required fields rather than `Option<T>` with
//! a hand-rolled presence check — a missing field is a deserialization
//! failure, which handlers turn into `NodeError::MalformedRequest`.

use crate::model::{Block, Transaction};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub length: usize,
}

/// Body of `POST`/`PUT /transactions`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub sender_blockchain_address: String,
    pub recipient_blockchain_address: String,
    pub sender_public_key: String,
    pub value: f32,
    pub signature: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn success() -> Self {
        MessageResponse { message: "success" }
    }

    pub fn fail() -> Self {
        MessageResponse { message: "fail" }
    }
}

#[derive(Serialize)]
pub struct AmountResponse {
    pub amount: f32,
}

#[derive(Deserialize)]
pub struct AmountQuery {
    pub blockchain_address: String,
}

/// Body returned by the wallet service's `GET /wallet`.
#[derive(Serialize)]
pub struct WalletResponse {
    pub private_key: String,
    pub public_key: String,
    pub blockchain_address: String,
}

/// Body of the wallet service's `POST /transaction`: an unsigned transfer
/// request carrying the sender's key material so the wallet can sign it
/// before relaying to the node's gateway.
#[derive(Deserialize)]
pub struct WalletTransactionRequest {
    pub sender_private_key: String,
    pub sender_public_key: String,
    pub sender_blockchain_address: String,
    pub recipient_blockchain_address: String,
    pub value: f32,
}
