//! GraphQL client for the Shopify Admin API.
//!
//! [`GraphqlClient`] posts a document and its variables to
//! `/admin/api/{version}/graphql.json` and hands back the raw response.
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The mutation payloads, keyed by root field
//! - `errors`: Protocol-level errors (still HTTP 200)
//! - `extensions`: Query cost information

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
