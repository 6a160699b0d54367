//! Orchestrated Admin API operations.
//!
//! [`AdminClient`] sequences the builder, transport and validator layers into
//! the operations the tool façade exposes:
//!
//! - [`AdminClient::create_product`]: `productCreate`, then optional media
//!   and metafields, tracked as a [`WorkflowState`] saga
//! - [`AdminClient::attach_media`] and [`AdminClient::set_metafields`]: one
//!   validated call each
//! - [`AdminClient::upload_file`]: staged upload, binary POST, `fileCreate`
//! - [`AdminClient::upload_theme_asset`]: one REST `PUT`
//!
//! Every call is awaited before the next is issued. Nothing is retried and
//! nothing is rolled back.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_admin_tools::{AdminClient, ProductSpec, ShopifyConfig};
//!
//! let client = AdminClient::new(&ShopifyConfig::from_env()?)?;
//! let created = client.create_product(&ProductSpec::new("Test Shirt")).await?;
//! println!("created {}", created.id);
//! ```

mod products;
mod uploads;
mod workflow;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::GraphqlClient;
use crate::config::ShopifyConfig;
use crate::error::{AdminError, UserErrorDetail};
use crate::mutations::Mutation;
use crate::validation::{validate_graphql, GraphqlExpectation};

pub use workflow::{
    Compensation, CreatedProduct, OperationResult, WorkflowError, WorkflowState,
};

/// Admin API client for one store.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct AdminClient {
    graphql: Arc<GraphqlClient>,
}

impl AdminClient {
    /// Creates a client for the store described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, AdminError> {
        Ok(Self {
            graphql: Arc::new(GraphqlClient::new(config)?),
        })
    }

    /// Sends `mutation` once and validates the response against `expect`.
    async fn execute(
        &self,
        mutation: Mutation,
        expect: GraphqlExpectation,
    ) -> Result<Value, AdminError> {
        tracing::debug!(operation = mutation.operation, "sending mutation");
        let response = self
            .graphql
            .query(mutation.document, Some(mutation.variables))
            .await?;
        validate_graphql(&response, &expect)
    }
}

/// Deserializes a validated payload node into `T`.
fn decode<T: DeserializeOwned>(operation: &str, value: Value) -> Result<T, AdminError> {
    serde_json::from_value(value).map_err(|e| AdminError::User {
        operation: operation.to_string(),
        errors: vec![UserErrorDetail::general(format!(
            "{operation} returned an unexpected payload: {e}"
        ))],
    })
}

/// Takes the first element of a validated list payload.
fn first_of(operation: &str, what: &str, value: Value) -> Result<Value, AdminError> {
    match value {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    }
    .ok_or_else(|| AdminError::User {
        operation: operation.to_string(),
        errors: vec![UserErrorDetail::general(format!(
            "{operation} returned no {what}"
        ))],
    })
}
