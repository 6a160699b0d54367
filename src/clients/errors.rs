//! Transport-level error types.
//!
//! These cover failures that happen before a response exists: a request that
//! fails local checks, or a network error from the underlying client. HTTP
//! status codes are not judged here; see [`crate::validation`].

use thiserror::Error;

/// Error returned when an HTTP request fails validation before sending.
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "put".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use put without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A multipart part could not be assembled (e.g. an unparseable MIME type).
    #[error("Invalid multipart form: {reason}")]
    InvalidForm {
        /// Why the form was rejected.
        reason: String,
    },
}

/// Unified error type for transport failures.
///
/// There is no retry variant: every request is attempted exactly once.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
