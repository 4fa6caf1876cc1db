pub mod address;
pub mod hash;
pub mod keypair;
pub mod signature;

pub use address::{address_from_public_key_hex, address_matches_public_key, decode_address};
pub use hash::sha256_digest;
pub use keypair::KeyPair;
pub use signature::{sign_digest, verify_digest};
