//! Builds the grouped request-item tree embedded in an invitation

use crate::model::{Attribute, AttributeValueType, RequestContent, RequestItem, RequestItemGroup};

/// Display titles for the invitation sections
#[derive(Debug, Clone)]
pub struct GroupTitles {
    pub shared: String,
    pub requested: String,
    pub created: String,
}

impl GroupTitles {
    pub fn new(
        shared: impl Into<String>,
        requested: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        Self {
            shared: shared.into(),
            requested: requested.into(),
            created: created.into(),
        }
    }
}

/// Build the ordered group tree for an invitation.
///
/// Group order is fixed: the shared group always comes first, the
/// requested group (required items before optional ones, input order
/// preserved) second, and the created group last. The requested and
/// created groups are omitted entirely when they would be empty.
pub fn build_invitation_content(
    shared_attribute: Attribute,
    required: &[AttributeValueType],
    optional: &[AttributeValueType],
    create: &[AttributeValueType],
    titles: &GroupTitles,
) -> RequestContent {
    let mut groups = Vec::with_capacity(3);

    groups.push(RequestItemGroup {
        title: titles.shared.clone(),
        items: vec![RequestItem::share(shared_attribute)],
    });

    if !required.is_empty() || !optional.is_empty() {
        let mut items = Vec::with_capacity(required.len() + optional.len());
        items.extend(
            required
                .iter()
                .map(|value_type| RequestItem::read(*value_type, true)),
        );
        items.extend(
            optional
                .iter()
                .map(|value_type| RequestItem::read(*value_type, false)),
        );
        groups.push(RequestItemGroup {
            title: titles.requested.clone(),
            items,
        });
    }

    if !create.is_empty() {
        groups.push(RequestItemGroup {
            title: titles.created.clone(),
            items: create
                .iter()
                .map(|value_type| RequestItem::create(*value_type))
                .collect(),
        });
    }

    RequestContent { items: groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeValue, IdentityAttributeQuery};

    fn shared_attribute() -> Attribute {
        Attribute::identity(
            "ADDR_CONNECTOR",
            AttributeValue::DisplayName {
                value: "Test Connector".into(),
            },
        )
    }

    fn titles() -> GroupTitles {
        GroupTitles::new("Shared Attributes", "Requested Attributes", "Create Attributes")
    }

    #[test]
    fn groups_come_in_fixed_order() {
        let content = build_invitation_content(
            shared_attribute(),
            &[AttributeValueType::GivenName, AttributeValueType::Surname],
            &[AttributeValueType::EMailAddress],
            &[AttributeValueType::BirthDate],
            &titles(),
        );

        assert_eq!(content.items.len(), 3);
        assert_eq!(content.items[0].title, "Shared Attributes");
        assert_eq!(content.items[1].title, "Requested Attributes");
        assert_eq!(content.items[2].title, "Create Attributes");

        // Shared group: exactly one mandatory share item
        assert_eq!(content.items[0].items.len(), 1);
        let RequestItem::ShareAttributeRequestItem {
            must_be_accepted,
            attribute,
        } = &content.items[0].items[0]
        else {
            panic!("expected a share item");
        };
        assert!(must_be_accepted);
        assert_eq!(
            attribute.value(),
            &AttributeValue::DisplayName {
                value: "Test Connector".into()
            }
        );
    }

    #[test]
    fn required_items_precede_optional_items_in_input_order() {
        let content = build_invitation_content(
            shared_attribute(),
            &[AttributeValueType::GivenName, AttributeValueType::Surname],
            &[AttributeValueType::EMailAddress],
            &[],
            &titles(),
        );

        let requested = &content.items[1].items;
        assert_eq!(requested.len(), 3);

        let expected = [
            (AttributeValueType::GivenName, true),
            (AttributeValueType::Surname, true),
            (AttributeValueType::EMailAddress, false),
        ];
        for (item, (value_type, mandatory)) in requested.iter().zip(expected) {
            let RequestItem::ReadAttributeRequestItem {
                must_be_accepted,
                query,
            } = item
            else {
                panic!("expected a read item");
            };
            assert_eq!(*must_be_accepted, mandatory);
            assert_eq!(query, &IdentityAttributeQuery { value_type });
        }
    }

    #[test]
    fn requested_group_is_omitted_when_nothing_is_requested() {
        let content = build_invitation_content(
            shared_attribute(),
            &[],
            &[],
            &[AttributeValueType::BirthYear],
            &titles(),
        );

        assert_eq!(content.items.len(), 2);
        assert_eq!(content.items[0].title, "Shared Attributes");
        assert_eq!(content.items[1].title, "Create Attributes");
    }

    #[test]
    fn created_group_is_omitted_when_empty() {
        let content = build_invitation_content(
            shared_attribute(),
            &[AttributeValueType::GivenName],
            &[],
            &[],
            &titles(),
        );

        assert_eq!(content.items.len(), 2);
        assert_eq!(content.items[1].title, "Requested Attributes");
    }

    #[test]
    fn create_items_are_mandatory_and_typed() {
        let content = build_invitation_content(
            shared_attribute(),
            &[],
            &[],
            &[AttributeValueType::BirthDate, AttributeValueType::BirthYear],
            &titles(),
        );

        let created = &content.items[1].items;
        assert_eq!(created.len(), 2);
        for (item, value_type) in created.iter().zip([
            AttributeValueType::BirthDate,
            AttributeValueType::BirthYear,
        ]) {
            let RequestItem::CreateAttributeRequestItem {
                must_be_accepted,
                query,
            } = item
            else {
                panic!("expected a create item");
            };
            assert!(must_be_accepted);
            assert_eq!(query.value_type, value_type);
        }
    }
}
