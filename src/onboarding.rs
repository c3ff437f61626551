//! Onboarding orchestration for external users.
//!
//! Publishes scannable invitations built from a declarative attribute
//! specification, polls the directory for the resulting relationship,
//! extracts the peer's attributes, and drives the accept/reject decision.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::DirectoryClient;
use crate::error::{ClientError, Result};
use crate::invitation::{build_invitation_content, GroupTitles};
use crate::model::{
    Attribute, AttributeValue, AttributeValueType, AttributeWrapper, ChangeStatus, IdentityInfo,
    RelationshipTemplateContent, Response, ResponseItem, TemplateCreation,
};

/// Attributes extracted from a peer response, keyed by value type
pub type AttributeMap = HashMap<AttributeValueType, AttributeValue>;

/// Caller-supplied decision over extracted attributes.
///
/// Implemented for any `Fn(&AttributeMap) -> bool` closure; implement
/// the trait directly when the decision itself can fail.
pub trait AcceptanceDecider: Send + Sync {
    fn decide(&self, attributes: &AttributeMap) -> Result<bool>;
}

impl<F> AcceptanceDecider for F
where
    F: Fn(&AttributeMap) -> bool + Send + Sync,
{
    fn decide(&self, attributes: &AttributeMap) -> Result<bool> {
        Ok(self(attributes))
    }
}

/// Which attributes an invitation asks for
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Display name shared with every peer
    pub display_name: String,
    /// Attribute types the peer must supply
    pub required_attributes: Vec<AttributeValueType>,
    /// Attribute types the peer may supply
    pub optional_attributes: Vec<AttributeValueType>,
    /// Attribute types the peer is asked to create
    pub create_attributes: Vec<AttributeValueType>,
}

impl OnboardingConfig {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            required_attributes: Vec::new(),
            optional_attributes: Vec::new(),
            create_attributes: Vec::new(),
        }
    }

    pub fn with_required(mut self, types: impl IntoIterator<Item = AttributeValueType>) -> Self {
        self.required_attributes.extend(types);
        self
    }

    pub fn with_optional(mut self, types: impl IntoIterator<Item = AttributeValueType>) -> Self {
        self.optional_attributes.extend(types);
        self
    }

    pub fn with_create(mut self, types: impl IntoIterator<Item = AttributeValueType>) -> Self {
        self.create_attributes.extend(types);
        self
    }
}

/// A published invitation: the template id and its scannable rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub template_id: String,
    /// Opaque image bytes, returned unmodified
    pub qr_code: Vec<u8>,
}

/// Outcome of one registration resolution
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationResult {
    pub enmeshed_address: String,
    pub relationship_id: String,
    pub relationship_change_id: String,
    pub attributes: AttributeMap,
    pub accepted: bool,
}

/// Identity and display-name attribute cached at initialization
#[derive(Debug, Clone)]
struct ConnectorState {
    identity: IdentityInfo,
    display_name_attribute: AttributeWrapper,
}

/// One resolved view of a relationship's creation change
struct ChangeSnapshot {
    enmeshed_address: String,
    relationship_id: String,
    change_id: String,
    status: ChangeStatus,
    attributes: AttributeMap,
}

impl ChangeSnapshot {
    fn into_result(self, accepted: bool) -> RegistrationResult {
        RegistrationResult {
            enmeshed_address: self.enmeshed_address,
            relationship_id: self.relationship_id,
            relationship_change_id: self.change_id,
            attributes: self.attributes,
            accepted,
        }
    }
}

/// Main entry point for onboarding orchestration.
///
/// Holds no state between invocations apart from the identity and
/// display-name attribute cached by [`initialize`](Self::initialize).
pub struct OnboardingService {
    client: Arc<dyn DirectoryClient>,
    config: OnboardingConfig,
    state: RwLock<Option<ConnectorState>>,
}

impl OnboardingService {
    /// Create a new service over a directory client
    pub fn new(client: Arc<dyn DirectoryClient>, config: OnboardingConfig) -> Self {
        Self {
            client,
            config,
            state: RwLock::new(None),
        }
    }

    /// Fetch the connector identity and materialize its display-name
    /// attribute. Must run before invitations can be published.
    pub async fn initialize(&self) -> Result<()> {
        let identity = self.client.get_identity().await?;
        info!(address = %identity.address, "Initializing onboarding service");

        let display_name = self.config.display_name.clone();
        let attribute = self
            .ensure_own_attribute(&identity.address, AttributeValueType::DisplayName, || {
                AttributeValue::DisplayName {
                    value: display_name,
                }
            })
            .await?;

        let mut state = self.state.write().await;
        *state = Some(ConnectorState {
            identity,
            display_name_attribute: attribute,
        });

        info!("Onboarding service initialized");
        Ok(())
    }

    /// The connector's own identity
    pub async fn identity_info(&self) -> Result<IdentityInfo> {
        let state = self.state.read().await;
        state
            .as_ref()
            .map(|state| state.identity.clone())
            .ok_or(ClientError::NotInitialized)
    }

    /// The connector's display-name attribute
    pub async fn display_name_attribute(&self) -> Result<AttributeWrapper> {
        let state = self.state.read().await;
        state
            .as_ref()
            .map(|state| state.display_name_attribute.clone())
            .ok_or(ClientError::NotInitialized)
    }

    /// Find an attribute owned by `owner` with the given value type, or
    /// create one from `factory` if none exists.
    ///
    /// The first existing match wins unchanged, even if it differs from
    /// what `factory` would produce. At most one create call is issued.
    pub async fn ensure_own_attribute<F>(
        &self,
        owner: &str,
        value_type: AttributeValueType,
        factory: F,
    ) -> Result<AttributeWrapper>
    where
        F: FnOnce() -> AttributeValue,
    {
        let existing = self.client.search_attributes(owner, value_type).await?;
        if let Some(attribute) = existing.into_iter().next() {
            debug!(%value_type, id = %attribute.id, "Reusing existing attribute");
            return Ok(attribute);
        }

        debug!(%value_type, "Creating attribute");
        self.client
            .create_attribute(Attribute::identity(owner, factory()))
            .await
    }

    /// Publish an invitation and render it as a scannable image.
    ///
    /// `validity` defaults to one hour, `max_allocations` to 1 (a
    /// single-use invitation).
    pub async fn publish_invitation(
        &self,
        titles: &GroupTitles,
        validity: Option<Duration>,
        max_allocations: Option<u32>,
    ) -> Result<Invitation> {
        let shared_attribute = self.display_name_attribute().await?.content;

        let content = build_invitation_content(
            shared_attribute,
            &self.config.required_attributes,
            &self.config.optional_attributes,
            &self.config.create_attributes,
            titles,
        );

        let creation = TemplateCreation {
            content: RelationshipTemplateContent {
                on_new_relationship: content,
            },
            expires_at: Utc::now() + validity.unwrap_or_else(|| Duration::hours(1)),
            max_number_of_allocations: max_allocations.unwrap_or(1),
        };

        let template = self.client.create_template(creation).await?;
        let qr_code = self.client.render_template(&template.id).await?;

        info!(template_id = %template.id, "Published invitation");
        Ok(Invitation {
            template_id: template.id,
            qr_code,
        })
    }

    /// Resolve the registration state for a template, accepting any
    /// pending change.
    pub async fn resolve_registration(
        &self,
        template_id: &str,
    ) -> Result<Option<RegistrationResult>> {
        self.resolve_registration_with(template_id, &|_: &AttributeMap| true)
            .await
    }

    /// Resolve the registration state for a template, consulting
    /// `decider` when the creation change is still pending.
    ///
    /// Returns `Ok(None)` while no relationship has formed against the
    /// template. For a pending change the decider runs over the
    /// extracted attributes; its verdict is driven back to the
    /// directory, and the state is re-resolved exactly once. A failing
    /// decider propagates without any accept/reject call being issued.
    pub async fn resolve_registration_with(
        &self,
        template_id: &str,
        decider: &dyn AcceptanceDecider,
    ) -> Result<Option<RegistrationResult>> {
        let Some(snapshot) = self.resolve_once(template_id).await? else {
            debug!(%template_id, "No relationship formed yet");
            return Ok(None);
        };

        match snapshot.status {
            ChangeStatus::Accepted => Ok(Some(snapshot.into_result(true))),
            ChangeStatus::Rejected | ChangeStatus::Revoked => Ok(Some(snapshot.into_result(false))),
            ChangeStatus::Pending => {
                let accept = decider.decide(&snapshot.attributes)?;
                info!(
                    relationship_id = %snapshot.relationship_id,
                    change_id = %snapshot.change_id,
                    accept,
                    "Deciding pending relationship change"
                );

                if accept {
                    self.client
                        .accept_change(&snapshot.relationship_id, &snapshot.change_id)
                        .await?;
                } else {
                    self.client
                        .reject_change(&snapshot.relationship_id, &snapshot.change_id)
                        .await?;
                }

                // Single re-resolution; its outcome is final either way.
                let second = self.resolve_once(template_id).await?.ok_or_else(|| {
                    ClientError::MalformedResponse(format!(
                        "relationship for template {template_id} disappeared after decision"
                    ))
                })?;
                let accepted = second.status == ChangeStatus::Accepted;
                Ok(Some(second.into_result(accepted)))
            }
        }
    }

    /// One sync / locate / select / extract pass
    async fn resolve_once(&self, template_id: &str) -> Result<Option<ChangeSnapshot>> {
        self.client.synchronize().await?;

        let relationships = self.client.search_relationships(template_id).await?;
        let Some(relationship) = relationships.into_iter().next() else {
            return Ok(None);
        };

        let change = relationship.creation_change().ok_or_else(|| {
            ClientError::MalformedResponse(format!(
                "relationship {} has no creation change",
                relationship.id
            ))
        })?;
        let response = change.response().ok_or_else(|| {
            ClientError::MalformedResponse(format!(
                "creation change {} carries no response",
                change.id
            ))
        })?;

        let enmeshed_address = relationship
            .peer
            .clone()
            .or_else(|| {
                relationship
                    .peer_identity
                    .as_ref()
                    .map(|identity| identity.address.clone())
            })
            .ok_or_else(|| {
                ClientError::MalformedResponse(format!(
                    "relationship {} has no peer address",
                    relationship.id
                ))
            })?;

        Ok(Some(ChangeSnapshot {
            enmeshed_address,
            relationship_id: relationship.id.clone(),
            change_id: change.id.clone(),
            status: change.status,
            attributes: extract_attributes(response),
        }))
    }
}

/// Collect accepted attribute values out of a response tree, flattening
/// nested groups one level. Later items overwrite earlier ones of the
/// same value type.
fn extract_attributes(response: &Response) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for item in &response.items {
        match item {
            ResponseItem::ResponseItemGroup { items, .. } => {
                for inner in items {
                    collect_accepted(inner, &mut attributes);
                }
            }
            other => collect_accepted(other, &mut attributes),
        }
    }
    attributes
}

fn collect_accepted(item: &ResponseItem, attributes: &mut AttributeMap) {
    use crate::model::ItemResult;

    if let ResponseItem::ReadAttributeAcceptResponseItem {
        result: ItemResult::Accepted,
        attribute,
    }
    | ResponseItem::CreateAttributeAcceptResponseItem {
        result: ItemResult::Accepted,
        attribute,
    } = item
    {
        let value = attribute.value().clone();
        attributes.insert(value.value_type(), value);
    }
}
