//! JSON-RPC 2.0 message types for the MCP stdio transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision answered when the client does not ask for one.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The message is not valid JSON.
pub const PARSE_ERROR: i32 = -32700;
/// The JSON is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// The method is not supported.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// The params are missing or malformed, or name an unknown tool.
pub const INVALID_PARAMS: i32 = -32602;

/// An incoming request or notification.
///
/// A message without `id` is a notification and never gets a response.
///
/// ```json
/// {"jsonrpc": "2.0", "id": 1, "method": "tools/list"}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct McpRequest {
    /// Protocol marker, expected to be `"2.0"`.
    pub jsonrpc: String,
    /// Request id; absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name, e.g. `tools/call`.
    pub method: String,
    /// Method parameters, if any.
    #[serde(default)]
    pub params: Option<Value>,
}

impl McpRequest {
    /// Returns `true` when the message has no `id`.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// An outgoing response. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct McpResponse {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Echoes the request id; `null` when the request could not be parsed.
    pub id: Value,
    /// The method's result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    /// A response carrying `result`.
    #[must_use]
    pub const fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// A response carrying `error`.
    #[must_use]
    pub const fn error(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct McpError {
    /// One of the JSON-RPC error codes above.
    pub code: i32,
    /// Human-readable description.
    pub message: String,
}

impl McpError {
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: PARSE_ERROR,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {method}"),
        }
    }

    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.into(),
        }
    }
}

/// Parameters of `tools/call`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolCallParams {
    /// Tool name, as listed by `tools/list`.
    pub name: String,
    /// Tool arguments; treated as `{}` when absent.
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_without_id_is_notification() {
        let request: McpRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .unwrap();
        assert!(request.is_notification());
        assert!(request.params.is_none());
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let request: McpRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": "abc", "method": "ping"}))
                .unwrap();
        assert_eq!(request.id, Some(json!("abc")));
    }

    #[test]
    fn test_response_omits_absent_half() {
        let ok = serde_json::to_value(McpResponse::success(json!(1), json!({}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));

        let err = serde_json::to_value(McpResponse::error(
            Value::Null,
            McpError::parse_error("Invalid JSON"),
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32700, "message": "Invalid JSON"}})
        );
    }

    #[test]
    fn test_method_not_found_message() {
        let error = McpError::method_not_found("resources/list");
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found: resources/list");
    }
}
