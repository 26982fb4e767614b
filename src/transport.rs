#![allow(missing_docs)]
//! HTTP transport carrying the pdf4me credential.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Pdf4meConfig;
use crate::error::{Pdf4meError, Result};

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

/// The network seam of the plugin. Implementations already carry authentication.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body to a path relative to the API base URL.
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse>;

    /// GET a polling location, either absolute or relative to the API base URL.
    /// The credential is only sent to the API origin.
    async fn get(&self, location: &str) -> Result<HttpResponse>;

    /// Fetch a remote document. Non-success statuses are API errors.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// [`HttpTransport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    base_url: Url,
    authorization: HeaderValue,
}

impl ReqwestTransport {
    pub fn new(config: &Pdf4meConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Pdf4meError::config("API key is required"));
        }

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Pdf4meError::config(format!("invalid base URL {}: {}", config.base_url, e))
        })?;

        let mut authorization = HeaderValue::from_str(&format!("Basic {}", config.api_key))
            .map_err(|_| Pdf4meError::config("API key contains invalid header characters"))?;
        authorization.set_sensitive(true);

        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("elizaos-plugin-pdf4me/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Pdf4meError::Network)?;

        Ok(Self {
            http,
            base_url,
            authorization,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, location: &str) -> Result<Url> {
        self.base_url.join(location).map_err(|e| {
            Pdf4meError::invalid_response(format!("unusable location {}: {}", location, e))
        })
    }

    fn same_origin(&self, url: &Url) -> bool {
        url.origin() == self.base_url.origin()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        let url = self.resolve(path)?;
        debug!(%url, "POST");

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, self.authorization.clone())
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        HttpResponse::from_reqwest(response).await
    }

    async fn get(&self, location: &str) -> Result<HttpResponse> {
        let url = self.resolve(location)?;
        debug!(%url, "GET");

        let mut request = self.http.get(url.clone());
        if self.same_origin(&url) {
            request = request.header(AUTHORIZATION, self.authorization.clone());
        }

        let response = request.send().await?;

        HttpResponse::from_reqwest(response).await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url).map_err(|e| {
            Pdf4meError::validation("fileUrl", format!("invalid URL {}: {}", url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Pdf4meError::validation(
                "fileUrl",
                format!("unsupported URL scheme: {}", url.scheme()),
            ));
        }
        debug!(%url, "downloading document");

        let mut request = self.http.get(url.clone());
        // The API credential never leaves the API origin.
        if self.same_origin(&url) {
            request = request.header(AUTHORIZATION, self.authorization.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Pdf4meError::api(status.as_u16(), text));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_requires_api_key() {
        let config = Pdf4meConfig::default();
        assert!(ReqwestTransport::new(&config).is_err());
    }

    #[test]
    fn test_transport_rejects_bad_base_url() {
        let config = Pdf4meConfig::new("key").with_base_url("not a url");
        let err = ReqwestTransport::new(&config).unwrap_err();
        assert!(matches!(err, Pdf4meError::Config(_)));
    }

    #[test]
    fn test_resolve_relative_and_absolute_locations() {
        let config = Pdf4meConfig::new("key").with_base_url("https://api.pdf4me.com");
        let transport = ReqwestTransport::new(&config).unwrap();

        assert_eq!(
            transport.resolve("/api/v2/ProcessInvoice").unwrap().as_str(),
            "https://api.pdf4me.com/api/v2/ProcessInvoice"
        );
        assert_eq!(
            transport
                .resolve("https://jobs.pdf4me.com/status/42")
                .unwrap()
                .as_str(),
            "https://jobs.pdf4me.com/status/42"
        );
    }

    #[test]
    fn test_same_origin() {
        let config = Pdf4meConfig::new("key").with_base_url("https://api.pdf4me.com");
        let transport = ReqwestTransport::new(&config).unwrap();

        let own = Url::parse("https://api.pdf4me.com/files/a.pdf").unwrap();
        let foreign = Url::parse("https://example.com/a.pdf").unwrap();
        assert!(transport.same_origin(&own));
        assert!(!transport.same_origin(&foreign));
    }

    #[test]
    fn test_response_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(202, "").with_header("Location", "/jobs/1");
        assert_eq!(response.header("location"), Some("/jobs/1"));
        assert_eq!(response.header("LOCATION"), Some("/jobs/1"));
        assert!(response.is_success());
    }
}
