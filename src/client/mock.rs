//! Mock directory client for testing.
//!
//! Configurable state and scripted search results for unit tests,
//! plus a call log so tests can verify call counts and ordering.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use super::DirectoryClient;
use crate::error::Result;
use crate::model::{
    Attribute, AttributeValueType, AttributeWrapper, IdentityInfo, Relationship,
    RelationshipTemplate, TemplateCreation,
};

/// Mock directory for tests.
///
/// Attribute creation is stateful: created attributes land in the search
/// pool, so a second search for the same owner and type finds them.
/// Relationship searches pop scripted batches in order and return an
/// empty list once the script is exhausted.
#[derive(Default)]
pub struct MockDirectoryClient {
    identity: IdentityInfo,
    attributes: Mutex<Vec<AttributeWrapper>>,
    relationship_batches: Mutex<VecDeque<Vec<Relationship>>>,
    qr_bytes: Vec<u8>,
    last_template_creation: Mutex<Option<TemplateCreation>>,
    next_attribute_id: AtomicU32,
    calls: Mutex<Vec<&'static str>>,
}

impl MockDirectoryClient {
    /// Create an empty mock
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity returned by `get_identity`
    pub fn with_identity(mut self, identity: IdentityInfo) -> Self {
        self.identity = identity;
        self
    }

    /// Seed the attribute search pool
    pub fn with_attribute(self, attribute: AttributeWrapper) -> Self {
        self.attributes.lock().unwrap().push(attribute);
        self
    }

    /// Script the result of the next relationship search
    pub fn with_relationship_batch(self, batch: Vec<Relationship>) -> Self {
        self.relationship_batches.lock().unwrap().push_back(batch);
        self
    }

    /// Set the bytes returned by `render_template`
    pub fn with_qr_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.qr_bytes = bytes;
        self
    }

    /// Ordered log of operations invoked so far
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times one operation was invoked
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    /// The template creation body submitted last, if any
    pub fn last_template_creation(&self) -> Option<TemplateCreation> {
        self.last_template_creation.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str) {
        self.calls.lock().unwrap().push(operation);
    }
}

#[async_trait]
impl DirectoryClient for MockDirectoryClient {
    async fn get_identity(&self) -> Result<IdentityInfo> {
        self.record("get_identity");
        Ok(self.identity.clone())
    }

    async fn synchronize(&self) -> Result<()> {
        self.record("synchronize");
        Ok(())
    }

    async fn search_attributes(
        &self,
        owner: &str,
        value_type: AttributeValueType,
    ) -> Result<Vec<AttributeWrapper>> {
        self.record("search_attributes");
        let matches = self
            .attributes
            .lock()
            .unwrap()
            .iter()
            .filter(|wrapper| {
                wrapper.content.owner() == Some(owner)
                    && wrapper.content.value().value_type() == value_type
            })
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn create_attribute(&self, attribute: Attribute) -> Result<AttributeWrapper> {
        self.record("create_attribute");
        let id = self.next_attribute_id.fetch_add(1, Ordering::SeqCst);
        let wrapper = AttributeWrapper {
            id: format!("ATT_{id}"),
            content: attribute,
        };
        self.attributes.lock().unwrap().push(wrapper.clone());
        Ok(wrapper)
    }

    async fn create_template(&self, creation: TemplateCreation) -> Result<RelationshipTemplate> {
        self.record("create_template");
        let template = RelationshipTemplate {
            id: "RLT_MOCK".into(),
            content: Some(creation.content.clone()),
            expires_at: Some(creation.expires_at),
            max_number_of_allocations: Some(creation.max_number_of_allocations),
        };
        *self.last_template_creation.lock().unwrap() = Some(creation);
        Ok(template)
    }

    async fn render_template(&self, _template_id: &str) -> Result<Vec<u8>> {
        self.record("render_template");
        Ok(self.qr_bytes.clone())
    }

    async fn search_relationships(&self, _template_id: &str) -> Result<Vec<Relationship>> {
        self.record("search_relationships");
        let batch = self
            .relationship_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(batch)
    }

    async fn accept_change(&self, relationship_id: &str, _change_id: &str) -> Result<Relationship> {
        self.record("accept_change");
        Ok(Relationship {
            id: relationship_id.into(),
            ..Default::default()
        })
    }

    async fn reject_change(&self, relationship_id: &str, _change_id: &str) -> Result<Relationship> {
        self.record("reject_change");
        Ok(Relationship {
            id: relationship_id.into(),
            ..Default::default()
        })
    }
}
