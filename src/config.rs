//! Tunable constants, all overridable at the `Node` construction site.
//!
//! Defaults match the wire contract's constants table.

pub const MINING_DIFFICULTY: usize = 3;
pub const MINING_SENDER: &str = "THE BLOCKCHAIN";
pub const MINING_REWARD: f32 = 1.0;
pub const MINING_TIMER_SEC: u64 = 20;

pub const BLOCKCHAIN_PORT_RANGE: std::ops::Range<u16> = 5000..5003;
pub const NEIGHBOR_IP_RANGE: std::ops::Range<u8> = 0..1;
pub const BLOCKCHAIN_NEIGHBOR_SYNC_TIME_SEC: u64 = 20;
pub const NEIGHBOR_CONNECT_TIMEOUT_MS: u64 = 1_000;
pub const PEER_HTTP_TIMEOUT_MS: u64 = 2_000;

pub const DEFAULT_NODE_PORT: u16 = 5000;
pub const DEFAULT_WALLET_PORT: u16 = 8080;
