//! Relationship templates - published invitation descriptors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::requests::RequestContent;

/// Content tree of a template, applied when a new relationship forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTemplateContent {
    pub on_new_relationship: RequestContent,
}

/// Body of a template creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCreation {
    pub content: RelationshipTemplateContent,
    pub expires_at: DateTime<Utc>,
    pub max_number_of_allocations: u32,
}

/// A published template with its remote-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTemplate {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RelationshipTemplateContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_number_of_allocations: Option<u32>,
}
