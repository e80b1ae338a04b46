//! HTTP client for the Foreman REST API

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};
use crate::traits::ForemanApi;
use crate::types::{EntityId, EntityKind, unwrap_envelope};

/// Connection settings for [`HttpClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Foreman base URL, e.g. `https://foreman.example.com`
    pub base_url: String,
    /// API user
    pub username: String,
    /// API password
    pub password: String,
    /// Verify the server certificate
    pub verify_ssl: bool,
    /// Total request timeout (none when unset)
    pub timeout: Option<Duration>,
    /// Page size for host listing (server default when unset)
    pub per_page: Option<u64>,
}

impl ClientConfig {
    /// Create a config with TLS verification on and no timeout
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
            verify_ssl: true,
            timeout: None,
            per_page: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .field("per_page", &self.per_page)
            .finish()
    }
}

/// HTTP client for the Foreman API
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
    per_page: Option<u64>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client without contacting the server
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(concat!("foreman-inventory/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Self::with_client(config, client)
    }

    /// Create a client around a custom `reqwest::Client`
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn with_client(config: ClientConfig, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
            username: config.username,
            password: config.password,
            per_page: config.per_page,
        })
    }

    /// Create a client and check that the API answers
    ///
    /// # Errors
    /// Returns [`ClientError::Unreachable`] if the server cannot be reached,
    /// and other errors if the URL is invalid or the server rejects the probe.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let client = Self::new(config)?;
        match client.status().await {
            Ok(_) => Ok(client),
            Err(ClientError::Http(e)) if e.is_connect() || e.is_timeout() => {
                Err(ClientError::Unreachable(e.to_string()))
            }
            // older servers have no status endpoint; reachable is all we need
            Err(ClientError::Api { status: 404, .. }) => Ok(client),
            Err(e) => Err(e),
        }
    }

    /// Build a full URL from a path relative to the base URL
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(ClientError::Url)
    }

    /// Perform an authenticated GET; 404 yields `None`
    async fn get(&self, url: Url) -> Result<Option<Value>> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Some(response.json().await?))
    }

    /// Get server status
    ///
    /// # Errors
    /// Returns an error if the request fails or the server returns an error.
    pub async fn status(&self) -> Result<Value> {
        let url = self.url("api/status")?;
        self.get(url).await?.ok_or_else(|| ClientError::Api {
            status: 404,
            message: "status endpoint not found".to_string(),
        })
    }

    fn hosts_page_url(&self, page: u64) -> Result<Url> {
        let mut url = self.url("api/hosts")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if let Some(per_page) = self.per_page {
                query.append_pair("per_page", &per_page.to_string());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ForemanApi for HttpClient {
    #[instrument(skip(self))]
    async fn index_hosts(&self, page: u64) -> Result<Vec<Value>> {
        let url = self.hosts_page_url(page)?;
        let body = self.get(url).await?.ok_or_else(|| ClientError::Api {
            status: 404,
            message: "host index not found".to_string(),
        })?;
        let hosts = host_entries(body)?;
        debug!(page, count = hosts.len(), "fetched host page");
        Ok(hosts)
    }

    #[instrument(skip(self, kind, id), fields(kind = %kind, id = %id))]
    async fn show(&self, kind: EntityKind, id: &EntityId) -> Result<Option<Value>> {
        let mut url = self.url(&format!("api/{}", kind.collection()))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id.as_str());
        let body = self.get(url).await?;
        if body.is_none() {
            debug!("object not found");
        }
        Ok(body.map(|value| unwrap_envelope(kind, value)))
    }
}

/// Parse the base URL, making sure its path ends with `/` so joins append
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Pull host entries out of an index response
///
/// API v1 answers with a bare array, v2 with `{"results": [...]}`.
fn host_entries(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(ClientError::InvalidResponse(
                "host index has no results array".to_string(),
            )),
        },
        _ => Err(ClientError::InvalidResponse(
            "host index is not a list".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(ClientConfig::new(base, "admin", "secret")).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(ClientConfig::new("https://foreman.local", "a", "b"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_no_timeout_by_default() {
        let config = ClientConfig::new("https://foreman.local", "a", "b");
        assert_eq!(config.timeout, None);
        assert!(HttpClient::new(config).is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new(ClientConfig::new("not a url", "a", "b"));
        assert!(matches!(client, Err(ClientError::Url(_))));
    }

    #[test]
    fn test_url_building() {
        let client = client("https://foreman.local");
        let url = client.url("api/hosts").unwrap();
        assert_eq!(url.as_str(), "https://foreman.local/api/hosts");
    }

    #[test]
    fn test_url_building_keeps_path_prefix() {
        let client = client("https://proxy.local/foreman");
        let url = client.url("api/hosts").unwrap();
        assert_eq!(url.as_str(), "https://proxy.local/foreman/api/hosts");
    }

    #[test]
    fn test_hosts_page_url() {
        let mut client = client("https://foreman.local/");
        let url = client.hosts_page_url(3).unwrap();
        assert_eq!(url.as_str(), "https://foreman.local/api/hosts?page=3");

        client.per_page = Some(100);
        let url = client.hosts_page_url(1).unwrap();
        assert_eq!(url.as_str(), "https://foreman.local/api/hosts?page=1&per_page=100");
    }

    #[test]
    fn test_host_entries_shapes() {
        let v1 = json!([{"host": {"name": "a"}}]);
        assert_eq!(host_entries(v1).unwrap().len(), 1);

        let v2 = json!({"total": 2, "page": 1, "results": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(host_entries(v2).unwrap().len(), 2);

        assert!(matches!(
            host_entries(json!({"error": "nope"})),
            Err(ClientError::InvalidResponse(_))
        ));
        assert!(matches!(
            host_entries(json!("nope")),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("https://foreman.local", "admin", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
        let client = HttpClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("hunter2"));
    }
}
