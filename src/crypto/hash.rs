//! SHA-256 hashing, used for block hashing, transaction-digest signing, and
//! the address checksum.

use ring::digest::{Context, SHA256};

/// SHA-256 over `data`, returned as a 32-byte vector.
///
/// Used throughout: block hashing (`crate::model::block`), the digest that
/// gets signed/verified (`crate::crypto::signature`), and the two-round
/// checksum in address derivation (`crate::crypto::address`).
pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    context.finish().as_ref().to_vec()
}

/// SHA-256 applied twice, as used for the address checksum.
pub fn double_sha256_digest(data: &[u8]) -> Vec<u8> {
    sha256_digest(&sha256_digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer() {
        let hash = sha256_digest(b"abc");
        let expected =
            hex::decode("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn deterministic() {
        assert_eq!(sha256_digest(b"tinychain"), sha256_digest(b"tinychain"));
    }

    #[test]
    fn double_hash_is_not_single_hash() {
        let data = b"tinychain";
        assert_ne!(sha256_digest(data), double_sha256_digest(data));
    }
}
