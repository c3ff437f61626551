//! Rust client for the enmeshed connector onboarding API.
//!
//! Publishes scannable invitations that request identity attributes
//! from external users, polls the connector for the resulting peer
//! relationship, extracts the supplied attributes, and drives the
//! accept/reject decision.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use enmeshed_client::{
//!     AttributeValueType, ConnectorConfig, GroupTitles, HttpDirectoryClient,
//!     OnboardingConfig, OnboardingService,
//! };
//!
//! # async fn example() -> enmeshed_client::Result<()> {
//! let client = Arc::new(HttpDirectoryClient::new(ConnectorConfig {
//!     base_url: "http://localhost:8080".into(),
//!     api_key: Some("secret".into()),
//!     ..Default::default()
//! }));
//!
//! let service = OnboardingService::new(
//!     client,
//!     OnboardingConfig::new("My Connector")
//!         .with_required([AttributeValueType::GivenName, AttributeValueType::Surname])
//!         .with_optional([AttributeValueType::EMailAddress]),
//! );
//! service.initialize().await?;
//!
//! let titles = GroupTitles::new("Shared", "Requested", "Created");
//! let invitation = service.publish_invitation(&titles, None, None).await?;
//!
//! // Poll until the user has scanned the invitation and answered
//! if let Some(result) = service.resolve_registration(&invitation.template_id).await? {
//!     println!("accepted: {}", result.accepted);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod invitation;
pub mod model;
pub mod onboarding;

// Re-export main types
pub use client::{DirectoryClient, HttpDirectoryClient, MockDirectoryClient};
pub use config::ConnectorConfig;
pub use error::{ClientError, Result};
pub use invitation::{build_invitation_content, GroupTitles};
pub use model::*;
pub use onboarding::{
    AcceptanceDecider, AttributeMap, Invitation, OnboardingConfig, OnboardingService,
    RegistrationResult,
};
