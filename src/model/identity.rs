//! Identity info and the generic request/response envelopes

use serde::{Deserialize, Serialize};

/// The connector's own identity, obtained once from the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IdentityInfo {
    /// Opaque enmeshed address
    pub address: String,
    /// Public key of the identity
    #[serde(default)]
    pub public_key: String,
    /// Realm identifier
    #[serde(default)]
    pub realm: String,
}

/// Envelope around every successful JSON response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultWrapper<T> {
    pub result: T,
}

/// Envelope around request bodies that submit wrapped content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentWrapper<T> {
    pub content: T,
}
