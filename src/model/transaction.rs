use serde::{Deserialize, Serialize};

/// A signed value transfer. The signature and public key travel alongside a
/// transaction on the wire (see `crate::http::dto`); they are not part of
/// the canonical form that gets hashed and stored in a block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "sender_blockchain_address")]
    pub sender_address: String,
    #[serde(rename = "recipient_blockchain_address")]
    pub recipient_address: String,
    pub value: f32,
}

impl Transaction {
    pub fn new(sender_address: impl Into<String>, recipient_address: impl Into<String>, value: f32) -> Self {
        Transaction {
            sender_address: sender_address.into(),
            recipient_address: recipient_address.into(),
            value,
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.sender_address == crate::config::MINING_SENDER
    }

    /// Canonical JSON bytes, used both as the digest input for signing and
    /// as the encoding stored inside a block.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("Transaction always serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_json_uses_wire_field_names() {
        let tx = Transaction::new("A", "B", 1.5);
        let json = String::from_utf8(tx.canonical_bytes()).unwrap();
        assert_eq!(
            json,
            r#"{"sender_blockchain_address":"A","recipient_blockchain_address":"B","value":1.5}"#
        );
    }

    #[test]
    fn coinbase_detection() {
        let coinbase = Transaction::new(crate::config::MINING_SENDER, "M", 1.0);
        let regular = Transaction::new("A", "B", 1.0);
        assert!(coinbase.is_coinbase());
        assert!(!regular.is_coinbase());
    }
}
