//! Remote directory client abstraction.
//!
//! The orchestration layer talks to the connector exclusively through the
//! [`DirectoryClient`] trait, so tests can swap in the [`MockDirectoryClient`]
//! and production code uses the reqwest-backed [`HttpDirectoryClient`].

pub mod http;
pub mod mock;

pub use http::HttpDirectoryClient;
pub use mock::MockDirectoryClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    Attribute, AttributeValueType, AttributeWrapper, IdentityInfo, Relationship,
    RelationshipTemplate, TemplateCreation,
};

/// Remote calls against the connector directory.
///
/// Every operation maps to one REST call. Errors are propagated
/// unmodified; no retry or recovery happens at this level.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetch the connector's own identity
    async fn get_identity(&self) -> Result<IdentityInfo>;

    /// Synchronize local connector state with the backbone
    async fn synchronize(&self) -> Result<()>;

    /// Search identity attributes by owner and value type
    async fn search_attributes(
        &self,
        owner: &str,
        value_type: AttributeValueType,
    ) -> Result<Vec<AttributeWrapper>>;

    /// Create a new attribute owned by the connector
    async fn create_attribute(&self, attribute: Attribute) -> Result<AttributeWrapper>;

    /// Publish a relationship template
    async fn create_template(&self, creation: TemplateCreation) -> Result<RelationshipTemplate>;

    /// Render a template as scannable image bytes
    async fn render_template(&self, template_id: &str) -> Result<Vec<u8>>;

    /// Search relationships formed against a template
    async fn search_relationships(&self, template_id: &str) -> Result<Vec<Relationship>>;

    /// Accept a pending relationship change
    async fn accept_change(&self, relationship_id: &str, change_id: &str) -> Result<Relationship>;

    /// Reject a pending relationship change
    async fn reject_change(&self, relationship_id: &str, change_id: &str) -> Result<Relationship>;
}
