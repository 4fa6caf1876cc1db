//! Wallet address derivation: RIPEMD-160(SHA-256(public key)), a version
//! byte, a double-SHA-256 checksum, and Base58.

use crate::crypto::hash::{double_sha256_digest, sha256_digest};
use crate::crypto::keypair::verifying_key_from_hex;
use crate::error::{NodeError, Result};
use p256::ecdsa::VerifyingKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use ripemd::{Digest, Ripemd160};

const VERSION_BYTE: u8 = 0x00;
const CHECKSUM_LEN: usize = 4;

/// Derive a Base58Check wallet address from a verifying key.
pub fn address_from_public_key(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    address_from_public_key_bytes(&point.as_bytes()[1..])
}

/// Derive an address directly from a 128-char hex public key, as carried on
/// the wire.
pub fn address_from_public_key_hex(hex: &str) -> Result<String> {
    let key = verifying_key_from_hex(hex)?;
    Ok(address_from_public_key(&key))
}

fn address_from_public_key_bytes(pubkey_xy: &[u8]) -> String {
    let h1 = sha256_digest(pubkey_xy);
    let h2 = Ripemd160::digest(&h1);

    let mut versioned = Vec::with_capacity(1 + h2.len());
    versioned.push(VERSION_BYTE);
    versioned.extend_from_slice(&h2);

    let checksum = &double_sha256_digest(&versioned)[..CHECKSUM_LEN];

    let mut payload = versioned;
    payload.extend_from_slice(checksum);

    bs58::encode(payload).into_string()
}

/// Decode and validate a Base58Check address, returning the 20-byte
/// public-key hash it encodes.
pub fn decode_address(address: &str) -> Result<Vec<u8>> {
    let payload = bs58::decode(address)
        .into_vec()
        .map_err(|e| NodeError::AddressDecodeError(e.to_string()))?;
    if payload.len() != 1 + 20 + CHECKSUM_LEN {
        return Err(NodeError::AddressDecodeError(format!(
            "expected a {}-byte payload, got {}",
            1 + 20 + CHECKSUM_LEN,
            payload.len()
        )));
    }
    let (versioned, checksum) = payload.split_at(1 + 20);
    let expected_checksum = &double_sha256_digest(versioned)[..CHECKSUM_LEN];
    if checksum != expected_checksum {
        return Err(NodeError::AddressDecodeError(
            "checksum mismatch".to_string(),
        ));
    }
    Ok(versioned[1..].to_vec())
}

/// True if `address` was derived from `public_key_hex`.
pub fn address_matches_public_key(address: &str, public_key_hex: &str) -> bool {
    let Ok(key) = verifying_key_from_hex(public_key_hex) else {
        return false;
    };
    address_from_public_key(&key) == address
}
