//! Workspace API Client
//!
//! Stateless wrapper over the Notion REST API. Every call issues exactly one
//! request and returns the parsed JSON body verbatim; non-2xx responses come
//! back as a categorized `ApiError`. Nothing is retried or cached.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{TOKEN_ENV, WorkspaceConfig};
use crate::constants::workspace::SERVICE;
use crate::types::{ApiError, CoachError, ErrorCategory, ErrorClassifier, Result};

/// Workspace API client with secure token handling
pub struct WorkspaceClient {
    /// Integration token - never exposed in logs or debug output
    token: SecretString,
    api_base: String,
    api_version: String,
    page_size: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for WorkspaceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceClient")
            .field("token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl WorkspaceClient {
    pub fn new(config: &WorkspaceConfig) -> Result<Self> {
        let token = config.token.clone().ok_or_else(|| {
            CoachError::NotConnected(format!(
                "Workspace token not found. Set {} or workspace.token in config",
                TOKEN_ENV
            ))
        })?;

        let api_base = url::Url::parse(&config.api_base).map_err(|e| {
            CoachError::Config(format!(
                "Invalid workspace api_base '{}': {}",
                config.api_base, e
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoachError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token: SecretString::from(token),
            api_base: api_base.as_str().trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            page_size: config.page_size,
            client,
        })
    }

    /// Default page size for `search_all`
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Identity of the integration bot (`GET /users/me`)
    pub async fn get_integration_info(&self) -> Result<Value> {
        self.send(self.request(Method::GET, "users/me")).await
    }

    /// Search all pages and databases shared with the integration
    pub async fn search_all(&self, query: Option<&str>, page_size: u32) -> Result<Value> {
        self.send(self.search_request(query, page_size)).await
    }

    /// Get a single page
    pub async fn get_page(&self, page_id: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("pages/{}", page_id)))
            .await
    }

    /// Get the child blocks of a page or block
    pub async fn get_block_children(&self, block_id: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("blocks/{}/children", block_id)))
            .await
    }

    /// Get a database schema
    pub async fn get_database(&self, database_id: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &format!("databases/{}", database_id)))
            .await
    }

    /// Query a database with optional filter and sorts
    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<&Value>,
        sorts: Option<&[Value]>,
    ) -> Result<Value> {
        self.send(self.query_request(database_id, filter, sorts))
            .await
    }

    /// Add a plain-text comment to a page
    pub async fn add_comment(&self, page_id: &str, text: &str) -> Result<Value> {
        info!("Posting comment to page {}", page_id);
        self.send(self.comment_request(page_id, text)).await
    }

    /// List comments on a page or block
    pub async fn get_comments(&self, block_id: &str) -> Result<Vec<Value>> {
        let response = self.send(self.comments_request(block_id)).await?;
        Ok(results(response))
    }

    /// Update page properties
    pub async fn update_page_properties(&self, page_id: &str, properties: Value) -> Result<Value> {
        info!("Updating properties of page {}", page_id);
        self.send(self.properties_request(page_id, properties)).await
    }

    /// Append blocks to a page or block
    pub async fn append_block_children(&self, block_id: &str, children: Vec<Value>) -> Result<Value> {
        info!("Appending {} block(s) to {}", children.len(), block_id);
        self.send(self.append_request(block_id, children)).await
    }

    // =========================================================================
    // Request Building
    // =========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.api_base, path);
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", &self.api_version)
            .header("Content-Type", "application/json")
    }

    fn search_request(&self, query: Option<&str>, page_size: u32) -> RequestBuilder {
        let mut payload = json!({ "page_size": page_size });
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            payload["query"] = Value::String(query.to_string());
        }
        self.request(Method::POST, "search").json(&payload)
    }

    fn query_request(
        &self,
        database_id: &str,
        filter: Option<&Value>,
        sorts: Option<&[Value]>,
    ) -> RequestBuilder {
        let mut payload = serde_json::Map::new();
        if let Some(filter) = filter {
            payload.insert("filter".to_string(), filter.clone());
        }
        if let Some(sorts) = sorts.filter(|s| !s.is_empty()) {
            payload.insert("sorts".to_string(), Value::Array(sorts.to_vec()));
        }
        self.request(Method::POST, &format!("databases/{}/query", database_id))
            .json(&Value::Object(payload))
    }

    fn comment_request(&self, page_id: &str, text: &str) -> RequestBuilder {
        let payload = json!({
            "parent": { "page_id": page_id },
            "rich_text": [
                { "type": "text", "text": { "content": text } }
            ]
        });
        self.request(Method::POST, "comments").json(&payload)
    }

    fn comments_request(&self, block_id: &str) -> RequestBuilder {
        self.request(Method::GET, "comments")
            .query(&[("block_id", block_id)])
    }

    fn properties_request(&self, page_id: &str, properties: Value) -> RequestBuilder {
        self.request(Method::PATCH, &format!("pages/{}", page_id))
            .json(&json!({ "properties": properties }))
    }

    fn append_request(&self, block_id: &str, children: Vec<Value>) -> RequestBuilder {
        self.request(Method::PATCH, &format!("blocks/{}/children", block_id))
            .json(&json!({ "children": children }))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, SERVICE))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(status.as_u16(), &body, SERVICE).into());
        }

        response.json::<Value>().await.map_err(|e| {
            ApiError::new(
                SERVICE,
                ErrorCategory::ParseError,
                format!("Failed to parse response: {}", e),
            )
            .into()
        })
    }
}

/// `results` array of a list response; empty when absent
pub fn results(response: Value) -> Vec<Value> {
    match response {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Paragraph block holding plain text, for `append_block_children`
pub fn paragraph_block(text: &str) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": {
            "rich_text": [{ "type": "text", "text": { "content": text } }]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> WorkspaceClient {
        let config = WorkspaceConfig {
            token: Some("secret_test".to_string()),
            api_base: "https://api.notion.com/v1/".to_string(),
            ..WorkspaceConfig::default()
        };
        WorkspaceClient::new(&config).unwrap()
    }

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_missing_token_is_not_connected() {
        let err = WorkspaceClient::new(&WorkspaceConfig::default()).unwrap_err();
        assert!(matches!(err, CoachError::NotConnected(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = WorkspaceConfig {
            token: Some("t".to_string()),
            api_base: "not a url".to_string(),
            ..WorkspaceConfig::default()
        };
        assert!(matches!(
            WorkspaceClient::new(&config).unwrap_err(),
            CoachError::Config(_)
        ));
    }

    #[test]
    fn test_request_headers() {
        let request = client().request(Method::GET, "users/me").build().unwrap();

        assert_eq!(request.url().as_str(), "https://api.notion.com/v1/users/me");
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer secret_test"
        );
        assert_eq!(request.headers()["notion-version"], "2022-06-28");
    }

    #[test]
    fn test_search_payload() {
        let client = client();

        let request = client.search_request(None, 100).build().unwrap();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(body_json(&request), json!({"page_size": 100}));

        let request = client.search_request(Some("rumba"), 10).build().unwrap();
        assert_eq!(body_json(&request), json!({"page_size": 10, "query": "rumba"}));

        let request = client.search_request(Some(""), 10).build().unwrap();
        assert_eq!(body_json(&request), json!({"page_size": 10}));
    }

    #[test]
    fn test_query_payload() {
        let client = client();

        let request = client.query_request("db1", None, None).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.notion.com/v1/databases/db1/query"
        );
        assert_eq!(body_json(&request), json!({}));

        let filter = json!({"property": "Done", "checkbox": {"equals": true}});
        let sorts = vec![json!({"timestamp": "created_time", "direction": "descending"})];
        let request = client
            .query_request("db1", Some(&filter), Some(&sorts))
            .build()
            .unwrap();
        assert_eq!(
            body_json(&request),
            json!({"filter": filter, "sorts": sorts})
        );
    }

    #[test]
    fn test_comment_payload() {
        let request = client().comment_request("page1", "Nice hips!").build().unwrap();
        assert_eq!(request.url().path(), "/v1/comments");
        assert_eq!(
            body_json(&request),
            json!({
                "parent": {"page_id": "page1"},
                "rich_text": [{"type": "text", "text": {"content": "Nice hips!"}}]
            })
        );
    }

    #[test]
    fn test_comments_query() {
        let request = client().comments_request("page1").build().unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/v1/comments");
        assert_eq!(request.url().query(), Some("block_id=page1"));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_properties_payload() {
        let properties = json!({"Done": {"checkbox": true}});
        let request = client()
            .properties_request("page1", properties.clone())
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(
            request.url().as_str(),
            "https://api.notion.com/v1/pages/page1"
        );
        assert_eq!(body_json(&request), json!({"properties": properties}));
    }

    #[test]
    fn test_append_payload() {
        let block = paragraph_block("Keep the frame");
        let request = client()
            .append_request("page1", vec![block.clone()])
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(request.url().path(), "/v1/blocks/page1/children");
        assert_eq!(body_json(&request), json!({"children": [block]}));
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", client());
        assert!(!debug.contains("secret_test"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_results_extraction() {
        assert_eq!(results(json!({"results": [1, 2]})).len(), 2);
        assert!(results(json!({"object": "list"})).is_empty());
        assert!(results(json!([1, 2])).is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let config = WorkspaceConfig {
            token: Some("t".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
            ..WorkspaceConfig::default()
        };
        let client = WorkspaceClient::new(&config).unwrap();

        let err = client.get_integration_info().await.unwrap_err();
        assert_eq!(err.category(), Some(ErrorCategory::Network));
    }

    #[test]
    fn test_paragraph_block() {
        let block = paragraph_block("Counted 2-3-4&1");
        assert_eq!(block["type"], "paragraph");
        assert_eq!(
            block["paragraph"]["rich_text"][0]["text"]["content"],
            "Counted 2-3-4&1"
        );
    }
}
