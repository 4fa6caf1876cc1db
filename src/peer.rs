//! Outbound HTTP calls to other nodes: gossiping a transaction, notifying a
//! neighbor to run consensus, and fetching a neighbor's chain during
//! conflict resolution. Every call is best-effort — failures are logged and
//! swallowed by the caller, never propagated as a local failure.

use crate::config::PEER_HTTP_TIMEOUT_MS;
use crate::error::{NodeError, Result};
use crate::http::dto::{ChainResponse, TransactionRequest};
use std::time::Duration;
use tracing::warn;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(PEER_HTTP_TIMEOUT_MS))
        .build()
        .expect("reqwest client configuration is valid")
}

/// Gossip a transaction to a neighbor via `PUT /transactions`. Errors are
/// logged and swallowed.
pub async fn gossip_transaction(neighbor: &str, request: &TransactionRequest) {
    let url = format!("http://{neighbor}/transactions");
    if let Err(e) = client().put(&url).json(request).send().await {
        warn!(%neighbor, error = %e, "gossip delivery failed");
    }
}

/// Notify a neighbor to run consensus via `PUT /consensus`. Errors are
/// logged and swallowed.
pub async fn notify_consensus(neighbor: &str) {
    let url = format!("http://{neighbor}/consensus");
    if let Err(e) = client().put(&url).send().await {
        warn!(%neighbor, error = %e, "consensus notification failed");
    }
}

/// Fetch a neighbor's chain via `GET /`. Any failure — unreachable,
/// non-200, malformed body — is reported as a `NodeError` for the caller to
/// log and skip; it is never treated as a fatal local error.
pub async fn fetch_chain(neighbor: &str) -> Result<ChainResponse> {
    let url = format!("http://{neighbor}/");
    let response = client()
        .get(&url)
        .send()
        .await
        .map_err(|e| NodeError::PeerUnreachable(e.to_string()))?;
    if !response.status().is_success() {
        return Err(NodeError::PeerInvalidResponse(format!(
            "status {}",
            response.status()
        )));
    }
    response
        .json::<ChainResponse>()
        .await
        .map_err(|e| NodeError::PeerInvalidResponse(e.to_string()))
}

/// Probe whether `host:port` accepts a TCP connection within
/// `NEIGHBOR_CONNECT_TIMEOUT_MS`.
pub async fn probe_reachable(host: &str, port: u16) -> bool {
    let addr = format!("{host}:{port}");
    let connect = tokio::net::TcpStream::connect(&addr);
    let timeout = Duration::from_millis(crate::config::NEIGHBOR_CONNECT_TIMEOUT_MS);
    matches!(tokio::time::timeout(timeout, connect).await, Ok(Ok(_)))
}
