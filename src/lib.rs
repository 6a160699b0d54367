//! # Shopify Admin Tools
//!
//! A small set of Shopify Admin API operations, exposed as agent tools over
//! the Model Context Protocol.
//!
//! ## Overview
//!
//! This crate provides:
//! - Validated, explicitly constructed configuration via [`ShopifyConfig`]
//! - Request builders for `productCreate`, `productCreateMedia`,
//!   `metafieldsSet`, `stagedUploadsCreate`, `fileCreate` and the REST theme
//!   asset endpoint ([`mutations`])
//! - A single-attempt HTTP transport ([`clients`]) and a response validator
//!   ([`validation`]) that maps every failure to an [`AdminError`]
//! - [`AdminClient`], which sequences dependent calls: product creation with
//!   follow-up media and metafields, and the three-step file upload
//! - [`ShopifyTools`], which turns outcomes into stable report strings
//! - An MCP stdio server ([`mcp`]) used by the `shopify-admin-mcp` binary
//!
//! Every call is made once. There is no retry, no caching and no rollback.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_admin_tools::{AccessToken, ApiVersion, ShopDomain, ShopifyConfig};
//!
//! let config = ShopifyConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_example").unwrap())
//!     .api_version(ApiVersion::V2024_01)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
//! ```
//!
//! ## Creating a product
//!
//! ```rust,ignore
//! use shopify_admin_tools::{AdminClient, Metafield, ProductSpec};
//!
//! let client = AdminClient::new(&config)?;
//! let mut spec = ProductSpec::new("Test Shirt");
//! spec.metafields.push(Metafield::new("custom", "color", "red", "single_line_text_field"));
//!
//! match client.create_product(&spec).await {
//!     Ok(created) => println!("created {}", created.id),
//!     Err(e) => eprintln!("{e}; pending: {:?}", e.pending_compensations),
//! }
//! ```
//!
//! ## Error handling
//!
//! Fallible operations return [`AdminError`], whose variants distinguish
//! local validation, transport, protocol-level API errors and field-level
//! user errors. Product creation wraps it in a [`WorkflowError`] that also
//! carries the created product id, if any.

pub mod admin;
pub mod clients;
pub mod config;
pub mod error;
pub mod mcp;
pub mod mutations;
pub mod observability;
pub mod tools;
pub mod validation;

// Re-export public types at crate root for convenience
pub use admin::{
    AdminClient, Compensation, CreatedProduct, OperationResult, WorkflowError, WorkflowState,
};
pub use config::{AccessToken, ApiVersion, BaseUrl, ShopDomain, ShopifyConfig, ShopifyConfigBuilder};
pub use error::{AdminError, ConfigError, TransportError, UserErrorDetail, ValidationError};
pub use mutations::{
    AssetRecord, FileRecord, MediaContentType, MediaItem, Metafield, ProductOption, ProductSpec,
    ProductStatus, ProductVariant, Seo,
};
pub use tools::{ShopifyTools, ToolOutput};

// Re-export HTTP client types
pub use clients::{
    ApiCallLimit, DataType, GraphqlClient, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpResponse, InvalidHttpRequestError,
};
