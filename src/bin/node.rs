//! The blockchain node binary: HTTP surface, mining loop, neighbor
//! discovery, and consensus — everything in SPEC_FULL.md that determines
//! how local state evolves and converges with peers.

use tinychain::config::{BLOCKCHAIN_NEIGHBOR_SYNC_TIME_SEC, BLOCKCHAIN_PORT_RANGE, NEIGHBOR_IP_RANGE};
use tinychain::discovery;
use tinychain::http::node_server;
use tinychain::node::Node;
use tinychain::wallet::Wallet;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

#[derive(Debug, Parser)]
#[command(name = "tinychain-node", about = "A small peer-to-peer blockchain node")]
struct Opt {
    #[arg(long, default_value_t = tinychain::config::DEFAULT_NODE_PORT)]
    port: u16,
}

fn initialize_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(filter))
        .init();
}

/// Spawn the neighbor-discovery loop: scan immediately, then every
/// `BLOCKCHAIN_NEIGHBOR_SYNC_TIME_SEC` seconds (§4.9).
fn spawn_discovery(node: Arc<Node>) {
    tokio::spawn(async move {
        loop {
            let host = discovery::local_ipv4();
            let neighbors = discovery::find_neighbors(
                host,
                node.port(),
                NEIGHBOR_IP_RANGE,
                BLOCKCHAIN_PORT_RANGE,
            )
            .await;
            info!(count = neighbors.len(), "discovery: neighbor scan complete");
            node.set_neighbors(neighbors).await;
            tokio::time::sleep(Duration::from_secs(BLOCKCHAIN_NEIGHBOR_SYNC_TIME_SEC)).await;
        }
    });
}

#[tokio::main]
async fn main() {
    initialize_logging();
    let opt = Opt::parse();

    let miner_wallet = Wallet::generate();
    info!(address = %miner_wallet.address(), port = opt.port, "starting node");

    let node = Node::new(miner_wallet.address().to_string(), opt.port);
    spawn_discovery(Arc::clone(&node));

    let app = node_server::router(node);
    let addr = format!("0.0.0.0:{}", opt.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("failed to bind listener on {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "node HTTP surface listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("axum server failure");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
