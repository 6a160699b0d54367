//! GraphQL-specific error types.
//!
//! Only transport failures are errors at this layer. A GraphQL response with
//! a top-level `errors` list still arrives as HTTP 200 and is judged by
//! [`crate::validation`].

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL Admin API calls.
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::clients::graphql::GraphqlError;
/// use shopify_admin_tools::clients::{HttpError, InvalidHttpRequestError};
///
/// let http_error = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBodyType);
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("body_type"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}
