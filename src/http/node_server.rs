//! The node's HTTP surface (§6): chain dump, transaction pool, mining
//! controls, balance, and the consensus trigger. Built on `axum` with
//! `tower-http`'s CORS and tracing layers, mirroring the teacher's
//! `web/server.rs` router/state shape — one `Router` per process, state is
//! a single shared `Arc<Node>`, no request authentication.

use crate::http::dto::{
    AmountQuery, AmountResponse, ChainResponse, MessageResponse, TransactionRequest,
    TransactionsResponse,
};
use crate::node::Node;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, post, put};
use axum::{Router, body::Bytes};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub fn router(node: Arc<Node>) -> Router {
    Router::new()
        .route("/", get(get_chain))
        .route("/transactions", get(get_transactions))
        .route("/transactions", post(post_transaction))
        .route("/transactions", put(put_transaction))
        .route("/transactions", delete(delete_transactions))
        .route("/mine", get(mine))
        .route("/mine/start", get(start_mining))
        .route("/consensus", put(consensus))
        .route("/amount", get(amount))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(node)
}

async fn get_chain(State(node): State<Arc<Node>>) -> impl IntoResponse {
    let chain = node.chain_snapshot().await;
    Json(ChainResponse {
        chain: chain.blocks().to_vec(),
    })
}

async fn get_transactions(State(node): State<Arc<Node>>) -> impl IntoResponse {
    let transactions = node.pool_snapshot().await;
    Json(TransactionsResponse {
        length: transactions.len(),
        transactions,
    })
}

/// Parse the body by hand rather than via axum's `Json` extractor, so a
/// missing field becomes the wire contract's `{"message":"fail"}` instead
/// of axum's generic rejection body (SPEC_FULL.md §7 MalformedRequest).
fn decode_transaction_request(body: &Bytes) -> Option<TransactionRequest> {
    match serde_json::from_slice::<TransactionRequest>(body) {
        Ok(request) => Some(request),
        Err(e) => {
            warn!(error = %e, "malformed transaction request body");
            None
        }
    }
}

async fn post_transaction(State(node): State<Arc<Node>>, body: Bytes) -> impl IntoResponse {
    let Some(request) = decode_transaction_request(&body) else {
        return (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()));
    };

    if node.create_transaction(request).await {
        (StatusCode::CREATED, Json(MessageResponse::success()))
    } else {
        (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()))
    }
}

/// Gossip's re-post target: verifies and pools locally, but never
/// re-gossips (the asymmetry that terminates the gossip loop, §9.4).
async fn put_transaction(State(node): State<Arc<Node>>, body: Bytes) -> impl IntoResponse {
    let Some(request) = decode_transaction_request(&body) else {
        return (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()));
    };

    let added = node
        .add_transaction(
            &request.sender_blockchain_address,
            &request.recipient_blockchain_address,
            request.value,
            Some(&request.sender_public_key),
            Some(&request.signature),
        )
        .await;

    if added {
        (StatusCode::OK, Json(MessageResponse::success()))
    } else {
        (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()))
    }
}

async fn delete_transactions(State(node): State<Arc<Node>>) -> impl IntoResponse {
    node.clear_pool().await;
    StatusCode::OK
}

async fn mine(State(node): State<Arc<Node>>) -> impl IntoResponse {
    if node.mine().await {
        (StatusCode::OK, Json(MessageResponse::success()))
    } else {
        (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()))
    }
}

async fn start_mining(State(node): State<Arc<Node>>) -> impl IntoResponse {
    node.start_mining_timer();
    StatusCode::OK
}

async fn consensus(State(node): State<Arc<Node>>) -> impl IntoResponse {
    node.resolve_conflicts().await;
    StatusCode::OK
}

async fn amount(
    State(node): State<Arc<Node>>,
    Query(query): Query<AmountQuery>,
) -> impl IntoResponse {
    let amount = node.balance(&query.blockchain_address).await;
    Json(AmountResponse { amount })
}
