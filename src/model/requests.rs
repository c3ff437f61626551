//! Request items embedded in an invitation template

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::attributes::{Attribute, AttributeValueType};

/// Query for an attribute of a given value type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityAttributeQuery {
    pub value_type: AttributeValueType,
}

/// One unit of data exchange requested from the peer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum RequestItem {
    /// Push an existing attribute value to the peer
    #[serde(rename_all = "camelCase")]
    ShareAttributeRequestItem {
        must_be_accepted: bool,
        attribute: Attribute,
    },
    /// Pull a typed attribute from the peer
    #[serde(rename_all = "camelCase")]
    ReadAttributeRequestItem {
        must_be_accepted: bool,
        query: IdentityAttributeQuery,
    },
    /// Ask the peer to create and submit a new attribute of a given type
    #[serde(rename_all = "camelCase")]
    CreateAttributeRequestItem {
        must_be_accepted: bool,
        query: IdentityAttributeQuery,
    },
}

impl RequestItem {
    /// Share item wrapping an existing attribute, always mandatory
    pub fn share(attribute: Attribute) -> Self {
        RequestItem::ShareAttributeRequestItem {
            must_be_accepted: true,
            attribute,
        }
    }

    /// Read item querying a value type
    pub fn read(value_type: AttributeValueType, must_be_accepted: bool) -> Self {
        RequestItem::ReadAttributeRequestItem {
            must_be_accepted,
            query: IdentityAttributeQuery { value_type },
        }
    }

    /// Create item asking for a new attribute of a value type, always mandatory
    pub fn create(value_type: AttributeValueType) -> Self {
        RequestItem::CreateAttributeRequestItem {
            must_be_accepted: true,
            query: IdentityAttributeQuery { value_type },
        }
    }

    /// Whether the peer must accept this item
    pub fn must_be_accepted(&self) -> bool {
        match self {
            RequestItem::ShareAttributeRequestItem {
                must_be_accepted, ..
            }
            | RequestItem::ReadAttributeRequestItem {
                must_be_accepted, ..
            }
            | RequestItem::CreateAttributeRequestItem {
                must_be_accepted, ..
            } => *must_be_accepted,
        }
    }
}

/// A titled, ordered collection of request items.
///
/// Partitions the invitation into sections for downstream UI rendering.
/// Serializes with the `RequestItemGroup` wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItemGroup {
    pub title: String,
    pub items: Vec<RequestItem>,
}

impl Serialize for RequestItemGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestItemGroup", 3)?;
        state.serialize_field("@type", "RequestItemGroup")?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

/// The ordered request tree submitted with a template.
///
/// Serializes with the `Request` wire tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContent {
    pub items: Vec<RequestItemGroup>,
}

impl Serialize for RequestContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RequestContent", 2)?;
        state.serialize_field("@type", "Request")?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attributes::AttributeValue;

    #[test]
    fn read_item_serializes_query_value_type() {
        let item = RequestItem::read(AttributeValueType::GivenName, true);
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["@type"], "ReadAttributeRequestItem");
        assert_eq!(json["mustBeAccepted"], true);
        assert_eq!(json["query"]["valueType"], "GivenName");
    }

    #[test]
    fn request_content_and_groups_carry_wire_type_tags() {
        let content = RequestContent {
            items: vec![RequestItemGroup {
                title: "Shared Attributes".into(),
                items: vec![RequestItem::read(AttributeValueType::Surname, true)],
            }],
        };
        let json = serde_json::to_value(&content).unwrap();

        assert_eq!(json["@type"], "Request");
        assert_eq!(json["items"][0]["@type"], "RequestItemGroup");
        assert_eq!(json["items"][0]["title"], "Shared Attributes");
        assert_eq!(json["items"][0]["items"][0]["@type"], "ReadAttributeRequestItem");
    }

    #[test]
    fn request_content_round_trips_through_tagged_wire_form() {
        let content = RequestContent {
            items: vec![RequestItemGroup {
                title: "Requested Attributes".into(),
                items: vec![RequestItem::read(AttributeValueType::GivenName, true)],
            }],
        };

        let json = serde_json::to_value(&content).unwrap();
        let decoded: RequestContent = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, content);
    }

    #[test]
    fn share_item_is_always_mandatory() {
        let item = RequestItem::share(Attribute::identity(
            "ADDR",
            AttributeValue::DisplayName {
                value: "Connector".into(),
            },
        ));
        assert!(item.must_be_accepted());
    }
}
