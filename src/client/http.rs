//! reqwest-backed client for the connector REST API

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

use super::DirectoryClient;
use crate::config::ConnectorConfig;
use crate::error::{ClientError, Result};
use crate::model::{
    Attribute, AttributeValueType, AttributeWrapper, ContentWrapper, IdentityInfo, Relationship,
    RelationshipTemplate, ResultWrapper, TemplateCreation,
};

/// HTTP client for the connector API.
///
/// # Example
///
/// ```rust,no_run
/// use enmeshed_client::{ConnectorConfig, HttpDirectoryClient};
///
/// let client = HttpDirectoryClient::new(ConnectorConfig {
///     base_url: "http://localhost:8080".into(),
///     api_key: Some("secret".into()),
///     ..Default::default()
/// });
/// ```
pub struct HttpDirectoryClient {
    config: ConnectorConfig,
    client: Client,
}

impl HttpDirectoryClient {
    /// Create a new client. The API key, if configured, is attached to
    /// every request as `X-API-KEY`.
    pub fn new(config: ConnectorConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                "X-API-KEY",
                header::HeaderValue::from_str(api_key).expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let body = response.bytes().await?;
        let wrapper: ResultWrapper<T> = serde_json::from_slice(&body)?;
        Ok(wrapper.result)
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn get_identity(&self) -> Result<IdentityInfo> {
        let url = format!("{}/api/v2/Account/IdentityInfo", self.config.base_url);

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn synchronize(&self) -> Result<()> {
        let url = format!("{}/api/v2/Account/Sync", self.config.base_url);

        let response = self.client.post(&url).send().await?;
        self.handle_empty_response(response).await
    }

    async fn search_attributes(
        &self,
        owner: &str,
        value_type: AttributeValueType,
    ) -> Result<Vec<AttributeWrapper>> {
        let url = format!(
            "{}/api/v2/Attributes?content.@type=IdentityAttribute&content.owner={}&content.value.@type={}",
            self.config.base_url,
            urlencoding::encode(owner),
            value_type.as_str()
        );

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn create_attribute(&self, attribute: Attribute) -> Result<AttributeWrapper> {
        let url = format!("{}/api/v2/Attributes", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ContentWrapper { content: attribute })
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn create_template(&self, creation: TemplateCreation) -> Result<RelationshipTemplate> {
        let url = format!("{}/api/v2/RelationshipTemplates/Own", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&creation)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn render_template(&self, template_id: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/api/v2/RelationshipTemplates/{}",
            self.config.base_url,
            urlencoding::encode(template_id)
        );

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "image/png")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::Api {
                status: 404,
                message: format!("Relationship template not found: {template_id}"),
            });
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn search_relationships(&self, template_id: &str) -> Result<Vec<Relationship>> {
        let url = format!(
            "{}/api/v2/Relationships?template.id={}",
            self.config.base_url,
            urlencoding::encode(template_id)
        );

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn accept_change(&self, relationship_id: &str, change_id: &str) -> Result<Relationship> {
        let url = format!(
            "{}/api/v2/Relationships/{}/Changes/{}/Accept",
            self.config.base_url,
            urlencoding::encode(relationship_id),
            urlencoding::encode(change_id)
        );

        // The decision is conveyed by the endpoint; the body is a placeholder.
        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ContentWrapper {
                content: serde_json::json!({}),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn reject_change(&self, relationship_id: &str, change_id: &str) -> Result<Relationship> {
        let url = format!(
            "{}/api/v2/Relationships/{}/Changes/{}/Reject",
            self.config.base_url,
            urlencoding::encode(relationship_id),
            urlencoding::encode(change_id)
        );

        let response = self
            .client
            .put(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&ContentWrapper {
                content: serde_json::json!({}),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
