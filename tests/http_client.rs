//! HTTP client tests against a local mock connector

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use enmeshed_client::{
    Attribute, AttributeValue, AttributeValueType, ChangeStatus, ChangeType, ClientError,
    ConnectorConfig, DirectoryClient, HttpDirectoryClient,
};

fn client_for(server: &MockServer) -> HttpDirectoryClient {
    HttpDirectoryClient::new(ConnectorConfig {
        base_url: server.uri(),
        api_key: Some("test-api-key".into()),
        ..Default::default()
    })
}

#[tokio::test]
async fn get_identity_sends_api_key_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/Account/IdentityInfo"))
        .and(header("X-API-KEY", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "address": "ADDR_CONNECTOR",
                "publicKey": "PUB_KEY",
                "realm": "id1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let identity = client_for(&server).get_identity().await.unwrap();

    assert_eq!(identity.address, "ADDR_CONNECTOR");
    assert_eq!(identity.public_key, "PUB_KEY");
    assert_eq!(identity.realm, "id1");
}

#[tokio::test]
async fn synchronize_posts_to_sync_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/Account/Sync"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).synchronize().await.unwrap();
}

#[tokio::test]
async fn search_attributes_filters_by_owner_and_value_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/Attributes"))
        .and(query_param("content.@type", "IdentityAttribute"))
        .and(query_param("content.owner", "ADDR_CONNECTOR"))
        .and(query_param("content.value.@type", "DisplayName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {
                    "id": "ATT_1",
                    "content": {
                        "@type": "IdentityAttribute",
                        "owner": "ADDR_CONNECTOR",
                        "value": { "@type": "DisplayName", "value": "Connector" }
                    }
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let attributes = client_for(&server)
        .search_attributes("ADDR_CONNECTOR", AttributeValueType::DisplayName)
        .await
        .unwrap();

    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].id, "ATT_1");
    assert_eq!(
        attributes[0].content.value(),
        &AttributeValue::DisplayName {
            value: "Connector".into()
        }
    );
}

#[tokio::test]
async fn create_attribute_wraps_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/Attributes"))
        .and(body_partial_json(json!({
            "content": {
                "@type": "IdentityAttribute",
                "owner": "ADDR_CONNECTOR",
                "value": { "@type": "DisplayName", "value": "Connector" }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "result": {
                "id": "ATT_NEW",
                "content": {
                    "@type": "IdentityAttribute",
                    "owner": "ADDR_CONNECTOR",
                    "value": { "@type": "DisplayName", "value": "Connector" }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_attribute(Attribute::identity(
            "ADDR_CONNECTOR",
            AttributeValue::DisplayName {
                value: "Connector".into(),
            },
        ))
        .await
        .unwrap();

    assert_eq!(created.id, "ATT_NEW");
}

#[tokio::test]
async fn render_template_passes_png_bytes_through() {
    let qr_bytes = vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/RelationshipTemplates/RLT_XXX"))
        .and(header("Accept", "image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(qr_bytes.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let rendered = client_for(&server).render_template("RLT_XXX").await.unwrap();

    assert_eq!(rendered, qr_bytes);
}

#[tokio::test]
async fn search_relationships_decodes_change_tree() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/Relationships"))
        .and(query_param("template.id", "RLT_XXX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {
                    "id": "REL_XXX",
                    "template": { "id": "RLT_XXX" },
                    "status": "Pending",
                    "peer": "ADDR_USER",
                    "peerIdentity": { "address": "ADDR_USER" },
                    "changes": [
                        {
                            "id": "RCH_XXX",
                            "type": "Creation",
                            "status": "Pending",
                            "request": {
                                "content": {
                                    "response": {
                                        "requestId": "REQ_ID",
                                        "result": "Accepted",
                                        "items": [
                                            {
                                                "@type": "ReadAttributeAcceptResponseItem",
                                                "result": "Accepted",
                                                "attribute": {
                                                    "@type": "IdentityAttribute",
                                                    "value": { "@type": "GivenName", "value": "Max" }
                                                }
                                            }
                                        ]
                                    }
                                }
                            }
                        }
                    ]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relationships = client_for(&server)
        .search_relationships("RLT_XXX")
        .await
        .unwrap();

    assert_eq!(relationships.len(), 1);
    let change = relationships[0].creation_change().unwrap();
    assert_eq!(change.change_type, ChangeType::Creation);
    assert_eq!(change.status, ChangeStatus::Pending);
    assert_eq!(change.response().unwrap().items.len(), 1);
}

#[tokio::test]
async fn accept_change_puts_placeholder_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/Relationships/REL_XXX/Changes/RCH_XXX/Accept"))
        .and(body_partial_json(json!({ "content": {} })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "id": "REL_XXX",
                "changes": [
                    { "id": "RCH_XXX", "type": "Creation", "status": "Accepted" }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let relationship = client_for(&server)
        .accept_change("REL_XXX", "RCH_XXX")
        .await
        .unwrap();

    assert_eq!(relationship.id, "REL_XXX");
    assert_eq!(
        relationship.creation_change().unwrap().status,
        ChangeStatus::Accepted
    );
}

#[tokio::test]
async fn reject_change_hits_reject_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v2/Relationships/REL_XXX/Changes/RCH_XXX/Reject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "id": "REL_XXX", "changes": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .reject_change("REL_XXX", "RCH_XXX")
        .await
        .unwrap();
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/Account/IdentityInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let error = client_for(&server).get_identity().await.unwrap_err();

    assert!(matches!(error, ClientError::Json(_)));
}

#[tokio::test]
async fn api_errors_preserve_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/Account/Sync"))
        .respond_with(ResponseTemplate::new(400).set_body_string("sync already running"))
        .mount(&server)
        .await;

    let error = client_for(&server).synchronize().await.unwrap_err();

    let ClientError::Api { status, message } = error else {
        panic!("expected an API error, got {error:?}");
    };
    assert_eq!(status, 400);
    assert_eq!(message, "sync already running");
}
