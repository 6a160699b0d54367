//! GraphQL client implementation for the Shopify Admin API.

use crate::clients::graphql::GraphqlError;
use crate::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, ShopifyConfig};

/// GraphQL API client for one store.
///
/// Each [`query`](Self::query) call is a single POST; nothing is retried.
///
/// `GraphqlClient` is `Send + Sync`.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_admin_tools::clients::GraphqlClient;
/// use serde_json::json;
///
/// let client = GraphqlClient::new(&config)?;
/// let response = client
///     .query(
///         "mutation productCreate($input: ProductInput!) { productCreate(input: $input) { product { id } } }",
///         Some(json!({ "input": { "title": "Shirt" } })),
///     )
///     .await?;
/// println!("{}", response.body["data"]);
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &ShopifyConfig) -> Result<Self, GraphqlError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
            api_version: config.api_version().clone(),
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client, for non-GraphQL calls to the same store.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes a GraphQL document against the Admin API.
    ///
    /// The body is `{"query": query, "variables": variables}`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] when no response arrives. Responses
    /// with any status, including GraphQL-level errors, are returned as `Ok`.
    pub async fn query(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<HttpResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });

        let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
            .body(body)
            .body_type(DataType::Json)
            .build()
            .map_err(|e| GraphqlError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}
