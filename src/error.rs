//! Error types for the Shopify admin tools.
//!
//! Two families live here:
//!
//! - [`ConfigError`]: invalid or missing configuration, raised while building
//!   a [`ShopifyConfig`](crate::ShopifyConfig).
//! - [`AdminError`]: the failure taxonomy for Admin API operations. Every
//!   layer below the tool façade returns it; only the façade turns it into a
//!   report string.
//!
//! # Taxonomy
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`AdminError::Validation`] | Local input rejected; nothing was sent |
//! | [`AdminError::Transport`] | Network failure or non-success HTTP status |
//! | [`AdminError::Api`] | Shopify rejected the request at the protocol level |
//! | [`AdminError::User`] | Shopify accepted the request but reported field errors |
//!
//! # Example
//!
//! ```rust
//! use shopify_admin_tools::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::{GraphqlError, HttpError};

/// Errors that can occur while building configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Please provide a valid Shopify Admin API access token.")]
    EmptyAccessToken,

    /// Shop domain is invalid.
    #[error("Invalid shop domain '{domain}'. Expected format: 'shop-name' or 'shop-name.myshopify.com'.")]
    InvalidShopDomain {
        /// The invalid domain that was provided.
        domain: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM' (e.g., '2024-01') or 'unstable'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Environment variable {name} must be set (directly or in a .env file).")]
    MissingEnvVar {
        /// The name of the variable.
        name: &'static str,
    },

    /// Base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://proxy.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// A field-level error reported by Shopify in a `userErrors` or
/// `mediaUserErrors` list.
///
/// `field` is the path to the offending input, e.g. `["input", "title"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserErrorDetail {
    /// Path to the input field, when Shopify provides one.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
}

impl UserErrorDetail {
    /// Creates a detail that is not tied to any input field.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Returns the field path joined with `.`, or an empty string.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.field
            .as_ref()
            .map_or_else(String::new, |segments| segments.join("."))
    }
}

impl fmt::Display for UserErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field_path();
        if field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{field}: {}", self.message)
        }
    }
}

/// Local input rejected before anything was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("{operation}: required field '{field}' is missing or empty")]
    MissingField {
        /// The operation being built.
        operation: &'static str,
        /// The API name of the field.
        field: &'static str,
    },

    /// A batch exceeds what a single call accepts.
    #[error("{operation}: at most {max} entries are accepted per call, got {actual}")]
    TooMany {
        /// The operation being built.
        operation: &'static str,
        /// The per-call limit.
        max: usize,
        /// The number of entries supplied.
        actual: usize,
    },

    /// A value is present but not acceptable.
    #[error("{operation}: invalid value for '{field}': {reason}")]
    InvalidValue {
        /// The operation being built.
        operation: &'static str,
        /// The API name of the field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A local file could not be read.
    #[error("could not read file '{path}': {reason}")]
    FileRead {
        /// The path that was requested.
        path: String,
        /// The underlying I/O error message.
        reason: String,
    },
}

/// Network failure or HTTP status outside the accepted range.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A response arrived with a status that the operation does not accept.
    #[error("HTTP {status} from {operation}: {body}")]
    Status {
        /// The operation that was called.
        operation: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, verbatim.
        body: String,
    },
}

/// Failure taxonomy for Admin API operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Malformed or missing local input; never sent over the wire.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network or HTTP-status failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API rejected the request at the protocol level.
    #[error("API error from {operation}: {errors}")]
    Api {
        /// The operation that was called.
        operation: String,
        /// The top-level `errors` value, serialized.
        errors: String,
    },

    /// The API accepted the request but reported semantic errors.
    #[error("User errors from {operation}: {}", join_details(.errors))]
    User {
        /// The operation that was called.
        operation: String,
        /// Every reported error, in order.
        errors: Vec<UserErrorDetail>,
    },
}

impl AdminError {
    /// Returns the field-level descriptors carried by this error.
    ///
    /// Non-user errors produce a single descriptor without a field.
    #[must_use]
    pub fn details(&self) -> Vec<UserErrorDetail> {
        match self {
            Self::User { errors, .. } => errors.clone(),
            other => vec![UserErrorDetail::general(other.to_string())],
        }
    }

    /// Short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Transport(_) => "TransportError",
            Self::Api { .. } => "ApiError",
            Self::User { .. } => "UserError",
        }
    }
}

impl From<HttpError> for AdminError {
    fn from(error: HttpError) -> Self {
        Self::Transport(TransportError::Http(error))
    }
}

impl From<GraphqlError> for AdminError {
    fn from(error: GraphqlError) -> Self {
        match error {
            GraphqlError::Http(e) => e.into(),
        }
    }
}

fn join_details(errors: &[UserErrorDetail]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_access_token_error_message() {
        let message = ConfigError::EmptyAccessToken.to_string();
        assert!(message.contains("Access token cannot be empty"));
    }

    #[test]
    fn test_missing_env_var_names_the_variable() {
        let error = ConfigError::MissingEnvVar {
            name: "SHOPIFY_ACCESS_TOKEN",
        };
        assert!(error.to_string().contains("SHOPIFY_ACCESS_TOKEN"));
    }

    #[test]
    fn test_user_error_detail_display_joins_field_path() {
        let detail = UserErrorDetail {
            field: Some(vec!["input".to_string(), "title".to_string()]),
            message: "can't be blank".to_string(),
        };
        assert_eq!(detail.to_string(), "input.title: can't be blank");
        assert_eq!(UserErrorDetail::general("boom").to_string(), "boom");
    }

    #[test]
    fn test_user_error_lists_every_detail() {
        let error = AdminError::User {
            operation: "productCreate".to_string(),
            errors: vec![
                UserErrorDetail::general("first"),
                UserErrorDetail {
                    field: Some(vec!["handle".to_string()]),
                    message: "taken".to_string(),
                },
            ],
        };
        let message = error.to_string();
        assert!(message.contains("productCreate"));
        assert!(message.contains("first; handle: taken"));
        assert_eq!(error.kind(), "UserError");
        assert_eq!(error.details().len(), 2);
    }

    #[test]
    fn test_transport_status_includes_status_and_body() {
        let error = AdminError::from(TransportError::Status {
            operation: "productCreate".to_string(),
            status: 500,
            body: "Internal Server Error".to_string(),
        });
        let message = error.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
        assert_eq!(error.kind(), "TransportError");
        assert_eq!(error.details().len(), 1);
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = AdminError::from(ValidationError::MissingField {
            operation: "productCreate",
            field: "title",
        });
        let _: &dyn std::error::Error = &error;
    }
}
