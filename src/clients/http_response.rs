//! HTTP response types.
//!
//! [`HttpResponse`] is the raw result of one call: status, headers, the body
//! parsed as JSON where possible, and the body text verbatim. Nothing here
//! decides whether the call succeeded.

use std::collections::HashMap;

/// REST rate limit information from the `X-Shopify-Shop-Api-Call-Limit` header.
///
/// The header format is "X/Y" where X is the current request count and Y is
/// the bucket size.
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::clients::ApiCallLimit;
///
/// let limit = ApiCallLimit::parse("40/80").unwrap();
/// assert_eq!(limit.request_count, 40);
/// assert_eq!(limit.bucket_size, 80);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiCallLimit {
    /// The current number of requests made in this bucket.
    pub request_count: u32,
    /// The maximum number of requests allowed in this bucket.
    pub bucket_size: u32,
}

impl ApiCallLimit {
    /// Parses the rate limit header value, returning `None` if malformed.
    #[must_use]
    pub fn parse(header_value: &str) -> Option<Self> {
        let (count, size) = header_value.trim().split_once('/')?;
        Some(Self {
            request_count: count.parse().ok()?,
            bucket_size: size.parse().ok()?,
        })
    }
}

/// A raw HTTP response.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The body parsed as JSON, or `{}` when empty or not JSON.
    pub body: serde_json::Value,
    /// The body text exactly as received.
    pub raw_body: String,
    /// Rate limit information, if the header was present.
    pub api_call_limit: Option<ApiCallLimit>,
}

impl HttpResponse {
    /// Creates a response from its parts, parsing the body and known headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, raw_body: String) -> Self {
        let body = if raw_body.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&raw_body).unwrap_or_else(|_| serde_json::json!({}))
        };

        let api_call_limit = headers
            .get("x-shopify-shop-api-call-limit")
            .and_then(|values| values.first())
            .and_then(|value| ApiCallLimit::parse(value));

        Self {
            code,
            headers,
            body,
            raw_body,
            api_call_limit,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `X-Shopify-API-Deprecated-Reason` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.header("x-shopify-api-deprecated-reason")
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
