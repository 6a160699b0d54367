//! HTTP client for Admin API communication.
//!
//! [`HttpClient`] sends exactly one request per call. It never retries and
//! never judges the status code; every response, 2xx or not, is returned as
//! an [`HttpResponse`] for the validator to inspect.

use std::collections::HashMap;

use reqwest::multipart::{Form, Part};

use crate::clients::errors::{HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ShopifyConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A file to send as the `file` part of a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    /// File name reported in the part's `Content-Disposition`.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// The complete file content.
    pub content: Vec<u8>,
}

/// HTTP client bound to one store.
///
/// The client handles:
/// - Base URI construction from the shop domain or base URL override
/// - Default headers including User-Agent and the access token
/// - Logging deprecation notices returned by Shopify
///
/// `HttpClient` is `Send + Sync`.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    base_path: String,
    user_agent: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g. TLS initialization failure).
    pub fn new(config: &ShopifyConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Shopify Admin Tools v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent.clone());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "X-Shopify-Access-Token".to_string(),
            config.access_token().as_ref().to_string(),
        );

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_uri: config.base_uri(),
            base_path: config.admin_path(),
            user_agent,
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the versioned base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers sent on every Admin call.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL for a path relative to the versioned base path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_uri, self.base_path, path)
    }

    /// Sends one request to the Admin API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails validation or no response
    /// arrives. Non-2xx responses are returned as `Ok`.
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut headers = self.default_headers.clone();
        if let Some(body_type) = &request.body_type {
            headers.insert(
                "Content-Type".to_string(),
                body_type.as_content_type().to_string(),
            );
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };
        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "sending Admin API request");
        let res = req_builder.send().await?;
        let response = Self::read_response(res).await?;

        if let Some(reason) = response.deprecation_reason() {
            tracing::warn!(
                "Deprecated request to Shopify API at {}, received reason: {}",
                request.path,
                reason
            );
        }
        if let Some(limit) = response.api_call_limit {
            tracing::debug!(
                used = limit.request_count,
                bucket = limit.bucket_size,
                "Admin API call limit"
            );
        }

        Ok(response)
    }

    /// Sends a multipart POST to an absolute URL outside the Admin API.
    ///
    /// `fields` are added as text parts in order, followed by the `file` part.
    /// No Shopify credentials are attached: the target URL is pre-authorized.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the MIME type cannot be used,
    /// or [`HttpError::Network`] if no response arrives.
    pub async fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
        file: FileUpload,
    ) -> Result<HttpResponse, HttpError> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }

        let part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| InvalidHttpRequestError::InvalidForm {
                reason: e.to_string(),
            })?;
        form = form.part("file", part);

        tracing::debug!(url, fields = fields.len(), "sending staged upload");
        let res = self
            .client
            .post(url)
            .header("User-Agent", &self.user_agent)
            .multipart(form)
            .send()
            .await?;

        Self::read_response(res).await
    }

    async fn read_response(res: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let raw_body = res.text().await?;
        Ok(HttpResponse::new(code, headers, raw_body))
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
