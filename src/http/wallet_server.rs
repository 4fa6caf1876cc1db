//! The wallet service's HTTP surface (§6): key generation, transaction
//! signing + relay, and a balance proxy. Only the wire contract with a node
//! is in scope — the HTML front page is a minimal static string, matching
//! the teacher's choice to carry no templating dependency for an
//! out-of-core-scope page (SPEC_FULL.md §6 supplement).

use crate::config::PEER_HTTP_TIMEOUT_MS;
use crate::http::dto::{
    AmountQuery, AmountResponse, MessageResponse, TransactionRequest, WalletResponse,
    WalletTransactionRequest,
};
use crate::wallet::{Wallet, sign_transfer};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::{Router, body::Bytes};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>tinychain wallet</title></head>
<body>
<h1>tinychain wallet</h1>
<p>Use <code>GET /wallet</code> to generate a key pair, and
<code>POST /transaction</code> to sign and relay a transfer.</p>
</body>
</html>
"#;

pub struct WalletState {
    pub gateway: String,
    pub client: reqwest::Client,
}

impl WalletState {
    pub fn new(gateway: String) -> Arc<WalletState> {
        Arc::new(WalletState {
            gateway,
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(PEER_HTTP_TIMEOUT_MS))
                .build()
                .expect("reqwest client configuration is valid"),
        })
    }
}

pub fn router(state: Arc<WalletState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/wallet", get(new_wallet))
        .route("/transaction", post(create_transaction))
        .route("/wallet/amount", get(amount))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn new_wallet() -> impl IntoResponse {
    let wallet = Wallet::generate();
    Json(WalletResponse {
        private_key: wallet.private_key_hex(),
        public_key: wallet.public_key_hex(),
        blockchain_address: wallet.address().to_string(),
    })
}

async fn create_transaction(
    State(state): State<Arc<WalletState>>,
    body: Bytes,
) -> impl IntoResponse {
    let Ok(request) = serde_json::from_slice::<WalletTransactionRequest>(&body) else {
        return (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()));
    };

    let signature = match sign_transfer(
        &request.sender_private_key,
        &request.sender_public_key,
        &request.sender_blockchain_address,
        &request.recipient_blockchain_address,
        request.value,
    ) {
        Ok(signature) => signature,
        Err(e) => {
            warn!(error = %e, "wallet: failed to sign transfer");
            return (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()));
        }
    };

    let relay = TransactionRequest {
        sender_blockchain_address: request.sender_blockchain_address,
        recipient_blockchain_address: request.recipient_blockchain_address,
        sender_public_key: request.sender_public_key,
        value: request.value,
        signature,
    };

    let url = format!("{}/transactions", state.gateway);
    match state.client.post(&url).json(&relay).send().await {
        Ok(response) if response.status() == StatusCode::CREATED => {
            (StatusCode::OK, Json(MessageResponse::success()))
        }
        Ok(response) => {
            warn!(status = %response.status(), "wallet: gateway rejected relayed transaction");
            (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()))
        }
        Err(e) => {
            warn!(error = %e, "wallet: gateway unreachable");
            (StatusCode::BAD_REQUEST, Json(MessageResponse::fail()))
        }
    }
}

async fn amount(
    State(state): State<Arc<WalletState>>,
    Query(query): Query<AmountQuery>,
) -> impl IntoResponse {
    let url = format!(
        "{}/amount?blockchain_address={}",
        state.gateway, query.blockchain_address
    );
    match state.client.get(&url).send().await {
        Ok(response) => match response.json::<AmountResponse>().await {
            Ok(amount) => (StatusCode::OK, Json(amount)).into_response(),
            Err(e) => {
                warn!(error = %e, "wallet: malformed amount response from gateway");
                StatusCode::BAD_GATEWAY.into_response()
            }
        },
        Err(e) => {
            warn!(error = %e, "wallet: gateway unreachable for amount lookup");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}
