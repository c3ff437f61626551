//! Client configuration

/// Connector client configuration
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Base URL of the connector HTTP API
    pub base_url: String,
    /// Optional API key sent as `X-API-KEY` on every request
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}
