//! Wire types for the connector REST API.
//!
//! All payloads use the connector's JSON conventions: camelCase field
//! names, `@type` discriminators on polymorphic content, and a
//! `{"result": ...}` envelope around success responses.

pub mod attributes;
pub mod identity;
pub mod relationships;
pub mod requests;
pub mod responses;
pub mod templates;

pub use attributes::{Attribute, AttributeValue, AttributeValueType, AttributeWrapper};
pub use identity::{ContentWrapper, IdentityInfo, ResultWrapper};
pub use relationships::{
    ChangeRequest, ChangeRequestContent, ChangeStatus, ChangeType, Relationship,
    RelationshipChange, RelationshipStatus,
};
pub use requests::{IdentityAttributeQuery, RequestContent, RequestItem, RequestItemGroup};
pub use responses::{ItemResult, Response, ResponseItem, ResponseResult};
pub use templates::{RelationshipTemplate, RelationshipTemplateContent, TemplateCreation};
