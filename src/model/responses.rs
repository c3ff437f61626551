//! Response items mirroring the request tree of a template

use serde::{Deserialize, Serialize};

use super::attributes::Attribute;

/// Top-level result of a peer's response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseResult {
    Accepted,
    Rejected,
    Error,
}

/// Per-item result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemResult {
    Accepted,
    Rejected,
    Error,
}

/// One response item, discriminated by `@type`.
///
/// Groups nest one level, mirroring the request item groups of the
/// original template. Only the read/create accept variants carry a
/// supplied attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum ResponseItem {
    #[serde(rename_all = "camelCase")]
    ResponseItemGroup {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<ItemResult>,
        items: Vec<ResponseItem>,
    },
    #[serde(rename_all = "camelCase")]
    ReadAttributeAcceptResponseItem {
        result: ItemResult,
        attribute: Attribute,
    },
    #[serde(rename_all = "camelCase")]
    CreateAttributeAcceptResponseItem {
        result: ItemResult,
        attribute: Attribute,
    },
    #[serde(rename_all = "camelCase")]
    FreeTextAcceptResponseItem {
        result: ItemResult,
        free_text: String,
    },
    #[serde(rename_all = "camelCase")]
    AcceptResponseItem { result: ItemResult },
    #[serde(rename_all = "camelCase")]
    RejectResponseItem {
        result: ItemResult,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ErrorResponseItem {
        result: ItemResult,
        code: String,
        message: String,
    },
}

/// The peer's answer to the request tree of a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub result: ResponseResult,
    #[serde(default)]
    pub items: Vec<ResponseItem>,
}
