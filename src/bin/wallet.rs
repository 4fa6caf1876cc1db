//! The wallet service binary: key generation, transfer signing, and
//! relay to a node gateway (§1, §6). The external collaborator — only its
//! wire contract with a node is in core scope.

use tinychain::http::wallet_server::{self, WalletState};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

#[derive(Debug, Parser)]
#[command(name = "tinychain-wallet", about = "Wallet service: keys, signing, relay")]
struct Opt {
    #[arg(long, default_value_t = tinychain::config::DEFAULT_WALLET_PORT)]
    port: u16,

    #[arg(long, default_value = "http://127.0.0.1:5000")]
    gateway: String,
}

fn initialize_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .init();
}

#[tokio::main]
async fn main() {
    initialize_logging();
    let opt = Opt::parse();

    info!(port = opt.port, gateway = %opt.gateway, "starting wallet service");

    let state = WalletState::new(opt.gateway);
    let app = wallet_server::router(state);
    let addr = format!("0.0.0.0:{}", opt.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("failed to bind listener on {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "wallet HTTP surface listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("axum server failure");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
