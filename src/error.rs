use thiserror::Error;

/// Errors produced by every fallible operation in this crate.
///
/// Local operations (signature checks, chain validation) never escalate to
/// this type reaching a peer as `Debug` output — HTTP handlers translate
/// each variant into the response shape the node's wire contract specifies.
#[derive(Clone, Error, Debug)]
pub enum NodeError {
    #[error("request body missing or malformed: {0}")]
    MalformedRequest(String),

    #[error("signature verification failed")]
    InvalidSignature,

    #[error("peer unreachable: {0}")]
    PeerUnreachable(String),

    #[error("peer returned an invalid response: {0}")]
    PeerInvalidResponse(String),

    #[error("peer chain failed validation")]
    PeerChainInvalid,

    #[error("failed to bind listener on {0}: {1}")]
    ListenerBind(String, String),

    #[error("invalid hex encoding: {0}")]
    InvalidHexEncoding(String),

    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("address decode error: {0}")]
    AddressDecodeError(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
