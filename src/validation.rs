//! Response validation.
//!
//! Turns a raw [`HttpResponse`] into either the payload node the caller asked
//! for or the most specific [`AdminError`]. GraphQL responses are checked in
//! a fixed order:
//!
//! 1. Non-2xx status: [`AdminError::Transport`], with status and body.
//! 2. A top-level `errors` key, whatever its value: [`AdminError::Api`]. The
//!    body is not read further.
//! 3. Non-empty user-error list for the operation: [`AdminError::User`].
//! 4. Missing or null payload node: [`AdminError::User`].
//!
//! Only a response that passes all four yields its payload.

use serde_json::Value;

use crate::clients::HttpResponse;
use crate::error::{AdminError, TransportError, UserErrorDetail};

/// Status codes a staged-upload target may answer a successful upload with.
pub const UPLOAD_SUCCESS_CODES: [u16; 3] = [200, 201, 204];

/// What a GraphQL mutation response is expected to contain.
///
/// # Example
///
/// ```rust
/// use shopify_admin_tools::validation::GraphqlExpectation;
///
/// let expect = GraphqlExpectation::new("productCreate", "product");
/// assert_eq!(expect.user_errors_key, "userErrors");
///
/// let media = GraphqlExpectation::new("productCreateMedia", "media")
///     .with_user_errors_key("mediaUserErrors");
/// assert_eq!(media.user_errors_key, "mediaUserErrors");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphqlExpectation {
    /// Root field under `data`, e.g. `productCreate`.
    pub operation: &'static str,
    /// Key of the user-error list inside the root field.
    pub user_errors_key: &'static str,
    /// Key of the node that must be present on success.
    pub payload_key: &'static str,
}

impl GraphqlExpectation {
    /// Expects `data.{operation}.{payload_key}` and a `userErrors` list.
    #[must_use]
    pub const fn new(operation: &'static str, payload_key: &'static str) -> Self {
        Self {
            operation,
            user_errors_key: "userErrors",
            payload_key,
        }
    }

    /// Uses a different user-error key, e.g. `mediaUserErrors`.
    #[must_use]
    pub const fn with_user_errors_key(mut self, key: &'static str) -> Self {
        self.user_errors_key = key;
        self
    }
}

/// Validates a GraphQL mutation response and returns its payload node.
///
/// # Errors
///
/// See the [module documentation](self) for the order of checks.
pub fn validate_graphql(
    response: &HttpResponse,
    expect: &GraphqlExpectation,
) -> Result<Value, AdminError> {
    ensure_success_status(response, expect.operation)?;
    ensure_no_top_level_errors(response, expect.operation)?;

    let root = response
        .body
        .get("data")
        .and_then(|data| data.get(expect.operation))
        .unwrap_or(&Value::Null);

    let user_errors = parse_user_errors(root.get(expect.user_errors_key));
    if !user_errors.is_empty() {
        return Err(AdminError::User {
            operation: expect.operation.to_string(),
            errors: user_errors,
        });
    }

    match root.get(expect.payload_key) {
        Some(payload) if !payload.is_null() => Ok(payload.clone()),
        _ => Err(missing_payload(expect.operation, expect.payload_key)),
    }
}

/// Validates a REST response and returns the `payload_key` node.
///
/// Checks status, then a body-level `errors` key, then the payload node.
///
/// # Errors
///
/// [`AdminError::Transport`], [`AdminError::Api`] or [`AdminError::User`],
/// in that order of precedence.
pub fn validate_rest(
    response: &HttpResponse,
    operation: &str,
    payload_key: &'static str,
) -> Result<Value, AdminError> {
    ensure_success_status(response, operation)?;
    ensure_no_top_level_errors(response, operation)?;

    match response.body.get(payload_key) {
        Some(payload) if !payload.is_null() => Ok(payload.clone()),
        _ => Err(missing_payload(operation, payload_key)),
    }
}

/// Validates the response of a direct upload to a staged target.
///
/// The storage endpoint returns no structured errors, so only the status is
/// judged: anything outside [`UPLOAD_SUCCESS_CODES`] is a transport failure.
///
/// # Errors
///
/// Returns [`AdminError::Transport`] for any other status.
pub fn validate_upload_status(response: &HttpResponse, operation: &str) -> Result<(), AdminError> {
    if UPLOAD_SUCCESS_CODES.contains(&response.code) {
        return Ok(());
    }
    Err(status_error(response, operation))
}

fn ensure_success_status(response: &HttpResponse, operation: &str) -> Result<(), AdminError> {
    if response.is_ok() {
        Ok(())
    } else {
        Err(status_error(response, operation))
    }
}

fn ensure_no_top_level_errors(response: &HttpResponse, operation: &str) -> Result<(), AdminError> {
    let Some(errors) = response.body.get("errors") else {
        return Ok(());
    };
    Err(AdminError::Api {
        operation: operation.to_string(),
        errors: errors.to_string(),
    })
}

fn status_error(response: &HttpResponse, operation: &str) -> AdminError {
    if let Some(request_id) = response.request_id() {
        tracing::debug!(operation, status = response.code, request_id, "request failed");
    }
    AdminError::Transport(TransportError::Status {
        operation: operation.to_string(),
        status: response.code,
        body: response.raw_body.clone(),
    })
}

fn missing_payload(operation: &str, payload_key: &str) -> AdminError {
    AdminError::User {
        operation: operation.to_string(),
        errors: vec![UserErrorDetail::general(format!(
            "{operation} returned no {payload_key}"
        ))],
    }
}

/// Reads a `userErrors`-shaped list. Entries that do not match the
/// `{field, message}` shape are kept with their JSON text as the message.
fn parse_user_errors(value: Option<&Value>) -> Vec<UserErrorDetail> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            serde_json::from_value::<UserErrorDetail>(item.clone())
                .unwrap_or_else(|_| UserErrorDetail::general(item.to_string()))
        })
        .collect()
}
