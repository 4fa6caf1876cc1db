//! Signing and verification over a pre-computed digest.
//!
//! The wire contract signs a digest that was already hashed by the caller
//! (`sha256_digest` over the transaction's canonical JSON), not the raw
//! message — so this uses the `PrehashSigner`/`PrehashVerifier` hazmat
//! traits rather than letting the signing key hash the input itself, which
//! would double-hash relative to the original implementation.

use crate::error::{NodeError, Result};
use crate::crypto::keypair::verifying_key_from_hex;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey};

/// Sign a 32-byte digest, returning the signature as 128 lowercase hex
/// characters (`R‖S`, zero-padded).
pub fn sign_digest(signing_key: &SigningKey, digest: &[u8]) -> Result<String> {
    let signature: Signature = signing_key
        .sign_prehash(digest)
        .map_err(|e| NodeError::InvalidKeyMaterial(e.to_string()))?;
    Ok(data_encoding::HEXLOWER.encode(&signature.to_bytes()))
}

/// Verify a hex-encoded public key and signature against a digest. Never
/// raises — any malformed encoding is simply a verification failure.
pub fn verify_digest(public_key_hex: &str, signature_hex: &str, digest: &[u8]) -> bool {
    let Ok(verifying_key) = verifying_key_from_hex(public_key_hex) else {
        return false;
    };
    let Ok(sig_bytes) = data_encoding::HEXLOWER.decode(signature_hex.as_bytes()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    verifying_key.verify_prehash(digest, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256_digest;
    use crate::crypto::keypair::KeyPair;

    #[test]
    fn round_trip() {
        let kp = KeyPair::generate();
        let digest = sha256_digest(b"transfer 1.0 from A to B");
        let sig = sign_digest(kp.signing_key(), &digest).unwrap();
        assert_eq!(sig.len(), 128);
        assert!(verify_digest(&kp.public_key_hex(), &sig, &digest));
    }

    #[test]
    fn flipped_message_byte_fails() {
        let kp = KeyPair::generate();
        let digest = sha256_digest(b"transfer 1.0 from A to B");
        let sig = sign_digest(kp.signing_key(), &digest).unwrap();
        let other_digest = sha256_digest(b"transfer 1.0 from A to C");
        assert!(!verify_digest(&kp.public_key_hex(), &sig, &other_digest));
    }

    #[test]
    fn flipped_signature_hex_digit_fails() {
        let kp = KeyPair::generate();
        let digest = sha256_digest(b"transfer 1.0 from A to B");
        let mut sig = sign_digest(kp.signing_key(), &digest).unwrap();
        let last = sig.pop().unwrap();
        let flipped = if last == '0' { '1' } else { '0' };
        sig.push(flipped);
        assert!(!verify_digest(&kp.public_key_hex(), &sig, &digest));
    }

    #[test]
    fn wrong_public_key_fails() {
        let kp = KeyPair::generate();
        let other = KeyPair::generate();
        let digest = sha256_digest(b"transfer 1.0 from A to B");
        let sig = sign_digest(kp.signing_key(), &digest).unwrap();
        assert!(!verify_digest(&other.public_key_hex(), &sig, &digest));
    }

    #[test]
    fn garbage_inputs_never_panic() {
        assert!(!verify_digest("not hex", "also not hex", b"x"));
        assert!(!verify_digest(&"00".repeat(64), &"00".repeat(64), b"x"));
    }
}
