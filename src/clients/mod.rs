//! Transport layer for the Shopify Admin API.
//!
//! Every function here performs exactly one HTTP exchange and returns the raw
//! response. There is no retry, no backoff, and no status interpretation.
//!
//! # Overview
//!
//! - [`HttpClient`]: one store's HTTP client (JSON POST/PUT, multipart POST)
//! - [`HttpRequest`]: a request relative to `/admin/api/{version}`
//! - [`HttpResponse`]: status, headers, parsed JSON and raw body text
//! - [`graphql::GraphqlClient`]: posts documents to `graphql.json`
//! - [`HttpError`]: a request that never produced a response
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin_tools::clients::{DataType, HttpClient, HttpMethod, HttpRequest};
//! use serde_json::json;
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Put, "themes/1/assets.json")
//!     .body(json!({"asset": {"key": "assets/site.css", "value": "body {}"}}))
//!     .body_type(DataType::Json)
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! println!("HTTP {}", response.code);
//! ```

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{FileUpload, HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{ApiCallLimit, HttpResponse};

pub use graphql::{GraphqlClient, GraphqlError};
