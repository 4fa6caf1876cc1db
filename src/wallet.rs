//! The wallet service's key material: generation, signing, and the wire
//! triple (private key, public key, address) it hands back to a caller.
//! This is the external collaborator of §1/§6 — only its wire contract
//! with the node matters, so it stays a thin wrapper over `crate::crypto`.

use crate::crypto::address::address_from_public_key;
use crate::crypto::hash::sha256_digest;
use crate::crypto::keypair::{KeyPair, signing_key_from_hex, verifying_key_from_hex};
use crate::crypto::signature::sign_digest;
use crate::error::Result;
use crate::model::Transaction;

/// A freshly generated (or wire-reconstructed) wallet identity.
pub struct Wallet {
    key_pair: KeyPair,
    address: String,
}

impl Wallet {
    /// `GET /wallet`: generate a new random identity.
    pub fn generate() -> Wallet {
        let key_pair = KeyPair::generate();
        let address = address_from_public_key(key_pair.verifying_key());
        Wallet { key_pair, address }
    }

    pub fn private_key_hex(&self) -> String {
        self.key_pair.private_key_hex()
    }

    pub fn public_key_hex(&self) -> String {
        self.key_pair.public_key_hex()
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Sign an unsigned transfer using the caller-supplied private/public key
/// hex pair (the wallet service's `POST /transaction` reconstructs the
/// signing key from the request body rather than holding it server-side).
/// Returns the 128-hex signature over the transaction's canonical JSON
/// digest, per §4.2.
pub fn sign_transfer(
    sender_private_key_hex: &str,
    sender_public_key_hex: &str,
    sender_address: &str,
    recipient_address: &str,
    value: f32,
) -> Result<String> {
    let signing_key = signing_key_from_hex(sender_private_key_hex)?;
    // Validated for shape even though only the signing key is used to
    // sign: a malformed public key means the request is malformed too.
    verifying_key_from_hex(sender_public_key_hex)?;

    let tx = Transaction::new(sender_address, recipient_address, value);
    let digest = sha256_digest(&tx.canonical_bytes());
    sign_digest(&signing_key, &digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signature::verify_digest;

    #[test]
    fn generated_wallet_has_a_derived_address() {
        let wallet = Wallet::generate();
        assert_eq!(wallet.private_key_hex().len(), 64);
        assert_eq!(wallet.public_key_hex().len(), 128);
        assert!(!wallet.address().is_empty());
    }

    #[test]
    fn sign_transfer_produces_a_verifiable_signature() {
        let wallet = Wallet::generate();
        let signature = sign_transfer(
            &wallet.private_key_hex(),
            &wallet.public_key_hex(),
            wallet.address(),
            "B",
            1.0,
        )
        .unwrap();

        let tx = Transaction::new(wallet.address(), "B", 1.0);
        let digest = sha256_digest(&tx.canonical_bytes());
        assert!(verify_digest(&wallet.public_key_hex(), &signature, &digest));
    }

    #[test]
    fn sign_transfer_rejects_malformed_private_key() {
        let wallet = Wallet::generate();
        assert!(sign_transfer("not-hex", &wallet.public_key_hex(), "A", "B", 1.0).is_err());
    }
}
