//! Relationships and their change history

use serde::{Deserialize, Serialize};

use super::identity::IdentityInfo;
use super::responses::Response;
use super::templates::RelationshipTemplate;

/// Relationship lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipStatus {
    Pending,
    Active,
    Rejected,
}

/// Kind of a relationship change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    Creation,
    Termination,
    TerminationCancellation,
}

/// Status of a relationship change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    Pending,
    Accepted,
    Rejected,
    Revoked,
}

/// Content of a creation change request, carrying the peer's response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
}

/// The request half of a relationship change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ChangeRequestContent>,
}

/// A proposed mutation to a relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipChange {
    pub id: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub status: ChangeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ChangeRequest>,
}

impl RelationshipChange {
    /// The peer response carried by this change, if any
    pub fn response(&self) -> Option<&Response> {
        self.request
            .as_ref()
            .and_then(|request| request.content.as_ref())
            .and_then(|content| content.response.as_ref())
    }
}

/// A bilateral connection formed from one template allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<RelationshipTemplate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RelationshipStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_identity: Option<IdentityInfo>,
    #[serde(default)]
    pub changes: Vec<RelationshipChange>,
}

impl Relationship {
    /// The last creation-type change, which is authoritative when
    /// multiple are present
    pub fn creation_change(&self) -> Option<&RelationshipChange> {
        self.changes
            .iter()
            .filter(|change| change.change_type == ChangeType::Creation)
            .next_back()
    }
}
