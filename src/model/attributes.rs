//! Identity attributes and their typed values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator for attribute value types.
///
/// Used as the extraction-map key, the `valueType` of read queries, and
/// the `content.value.@type` filter of attribute searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeValueType {
    DisplayName,
    GivenName,
    Surname,
    EMailAddress,
    BirthDate,
    BirthYear,
}

impl AttributeValueType {
    /// Wire name of this value type
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeValueType::DisplayName => "DisplayName",
            AttributeValueType::GivenName => "GivenName",
            AttributeValueType::Surname => "Surname",
            AttributeValueType::EMailAddress => "EMailAddress",
            AttributeValueType::BirthDate => "BirthDate",
            AttributeValueType::BirthYear => "BirthYear",
        }
    }
}

impl fmt::Display for AttributeValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed attribute value, discriminated by `@type` on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum AttributeValue {
    DisplayName { value: String },
    GivenName { value: String },
    Surname { value: String },
    EMailAddress { value: String },
    BirthDate { day: u8, month: u8, year: u16 },
    BirthYear { value: u16 },
}

impl AttributeValue {
    /// The discriminator tag for this value
    pub fn value_type(&self) -> AttributeValueType {
        match self {
            AttributeValue::DisplayName { .. } => AttributeValueType::DisplayName,
            AttributeValue::GivenName { .. } => AttributeValueType::GivenName,
            AttributeValue::Surname { .. } => AttributeValueType::Surname,
            AttributeValue::EMailAddress { .. } => AttributeValueType::EMailAddress,
            AttributeValue::BirthDate { .. } => AttributeValueType::BirthDate,
            AttributeValue::BirthYear { .. } => AttributeValueType::BirthYear,
        }
    }
}

/// An attribute owned by an identity, discriminated by `@type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum Attribute {
    #[serde(rename = "IdentityAttribute", rename_all = "camelCase")]
    Identity {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<String>,
        value: AttributeValue,
    },
}

impl Attribute {
    /// Build an identity attribute with the given owner
    pub fn identity(owner: impl Into<String>, value: AttributeValue) -> Self {
        Attribute::Identity {
            owner: Some(owner.into()),
            value,
        }
    }

    /// The attribute value
    pub fn value(&self) -> &AttributeValue {
        match self {
            Attribute::Identity { value, .. } => value,
        }
    }

    /// The owning identity address, if set
    pub fn owner(&self) -> Option<&str> {
        match self {
            Attribute::Identity { owner, .. } => owner.as_deref(),
        }
    }
}

/// A stored attribute with its remote-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeWrapper {
    pub id: String,
    pub content: Attribute,
}
