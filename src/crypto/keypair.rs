//! ECDSA key pair generation over NIST P-256, with direct access to the raw
//! scalar and point bytes the wire format requires (no PKCS#8 round trip).

use crate::error::{NodeError, Result};
use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

/// A generated key pair, carrying both the signing half and its derived
/// verifying key.
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> KeyPair {
        let signing_key = SigningKey::random(&mut OsRng);
        let verifying_key = *signing_key.verifying_key();
        KeyPair {
            signing_key,
            verifying_key,
        }
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Private key as a zero-padded 64-character lowercase hex string (the
    /// raw 32-byte scalar, big-endian).
    pub fn private_key_hex(&self) -> String {
        data_encoding::HEXLOWER.encode(&self.signing_key.to_bytes())
    }

    /// Public key as a zero-padded 128-character lowercase hex string
    /// (`X‖Y`, 32 bytes each, the uncompressed point minus its leading
    /// `0x04` tag byte).
    pub fn public_key_hex(&self) -> String {
        public_key_to_hex(&self.verifying_key)
    }
}

/// Render a verifying key as `X‖Y` hex, per the wire format.
pub fn public_key_to_hex(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    data_encoding::HEXLOWER.encode(&point.as_bytes()[1..])
}

/// Parse a 64-byte private-key scalar from its 64-character hex form.
pub fn signing_key_from_hex(hex: &str) -> Result<SigningKey> {
    let bytes = data_encoding::HEXLOWER
        .decode(hex.as_bytes())
        .map_err(|e| NodeError::InvalidHexEncoding(e.to_string()))?;
    SigningKey::from_slice(&bytes).map_err(|e| NodeError::InvalidKeyMaterial(e.to_string()))
}

/// Parse a 128-character `X‖Y` hex public key into a verifying key.
pub fn verifying_key_from_hex(hex: &str) -> Result<VerifyingKey> {
    let bytes = data_encoding::HEXLOWER
        .decode(hex.as_bytes())
        .map_err(|e| NodeError::InvalidHexEncoding(e.to_string()))?;
    if bytes.len() != 64 {
        return Err(NodeError::InvalidKeyMaterial(format!(
            "expected 64 bytes for an uncompressed P-256 point, got {}",
            bytes.len()
        )));
    }
    let mut uncompressed = Vec::with_capacity(65);
    uncompressed.push(0x04);
    uncompressed.extend_from_slice(&bytes);
    VerifyingKey::from_sec1_bytes(&uncompressed)
        .map_err(|e| NodeError::InvalidKeyMaterial(e.to_string()))
}
