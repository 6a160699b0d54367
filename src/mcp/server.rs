//! MCP server loop: newline-delimited JSON-RPC over any async reader/writer.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, instrument, warn};

use crate::clients::SDK_VERSION;
use crate::mcp::types::{McpError, McpRequest, McpResponse, ToolCallParams, PROTOCOL_VERSION};
use crate::tools::{tool_definitions, ShopifyTools};

/// Name reported in `initialize`.
pub const SERVER_NAME: &str = "shopify-admin-tools";

/// Serves requests from stdin and writes responses to stdout until stdin
/// closes.
///
/// # Errors
///
/// Returns an I/O error if stdin or stdout fails.
pub async fn run_stdio(tools: ShopifyTools) -> std::io::Result<()> {
    serve(
        &tools,
        BufReader::new(tokio::io::stdin()),
        BufWriter::new(tokio::io::stdout()),
    )
    .await
}

/// Serves one request per line from `reader`, writing one response per line
/// to `writer`. Returns when `reader` reaches EOF.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails.
pub async fn serve<R, W>(tools: &ShopifyTools, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("MCP stdio server started");
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!(len = line.len(), "MCP message received");

        if let Some(response) = handle_message(tools, &line).await {
            let mut json = serde_json::to_string(&response)?;
            json.push('\n');
            writer.write_all(json.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    info!("MCP stdio server stopped (input closed)");
    Ok(())
}

/// Handles one raw message. Returns `None` for notifications.
pub async fn handle_message(tools: &ShopifyTools, line: &str) -> Option<McpResponse> {
    let request: McpRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "failed to parse JSON-RPC message");
            return Some(McpResponse::error(
                Value::Null,
                McpError::parse_error(format!("Invalid JSON: {e}")),
            ));
        }
    };

    if request.is_notification() {
        debug!(method = %request.method, "notification received");
        return None;
    }
    Some(handle_request(tools, request).await)
}

#[instrument(skip(tools, request), fields(method = %request.method))]
async fn handle_request(tools: &ShopifyTools, request: McpRequest) -> McpResponse {
    let id = request.id.unwrap_or(Value::Null);
    if request.jsonrpc != "2.0" {
        return McpResponse::error(id, McpError::invalid_request("jsonrpc must be \"2.0\""));
    }

    let result = match request.method.as_str() {
        "initialize" => Ok(initialize(request.params.as_ref())),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tool_definitions() })),
        "tools/call" => call_tool(tools, request.params).await,
        other => {
            warn!(method = other, "unknown MCP method");
            Err(McpError::method_not_found(other))
        }
    };

    match result {
        Ok(result) => McpResponse::success(id, result),
        Err(error) => McpResponse::error(id, error),
    }
}

fn initialize(params: Option<&Value>) -> Value {
    let protocol_version = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": SERVER_NAME, "version": SDK_VERSION }
    })
}

async fn call_tool(tools: &ShopifyTools, params: Option<Value>) -> Result<Value, McpError> {
    let params: ToolCallParams = params
        .ok_or_else(|| McpError::invalid_params("tools/call requires params"))
        .and_then(|p| {
            serde_json::from_value(p).map_err(|e| McpError::invalid_params(e.to_string()))
        })?;

    let arguments = params.arguments.unwrap_or_else(|| json!({}));
    let output = tools
        .call(&params.name, arguments)
        .await
        .map_err(|e| McpError::invalid_params(e.to_string()))?;

    debug!(tool = %params.name, is_error = output.is_error, "tool call finished");
    Ok(json!({
        "content": [{ "type": "text", "text": output.text }],
        "isError": output.is_error
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminClient;
    use crate::config::{AccessToken, BaseUrl, ShopDomain, ShopifyConfig};
    use crate::mcp::types::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};

    fn offline_tools() -> ShopifyTools {
        let config = ShopifyConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("token").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        ShopifyTools::new(AdminClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_initialize_reports_tools_capability() {
        let tools = offline_tools();
        let response = handle_message(
            &tools,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#,
        )
        .await
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let tools = offline_tools();
        let response = handle_message(
            &tools,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        )
        .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_and_ping() {
        let tools = offline_tools();
        let list = handle_message(&tools, r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#)
            .await
            .unwrap();
        assert_eq!(list.id, json!("a"));
        assert_eq!(list.result.unwrap()["tools"].as_array().unwrap().len(), 5);

        let ping = handle_message(&tools, r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(ping.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let tools = offline_tools();

        let parse = handle_message(&tools, "{not json").await.unwrap();
        assert_eq!(parse.error.unwrap().code, PARSE_ERROR);
        assert_eq!(parse.id, Value::Null);

        let version = handle_message(&tools, r#"{"jsonrpc":"1.0","id":1,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(version.error.unwrap().code, INVALID_REQUEST);

        let unknown = handle_message(&tools, r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(unknown.error.unwrap().code, METHOD_NOT_FOUND);

        let tool = handle_message(
            &tools,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"delete_everything"}}"#,
        )
        .await
        .unwrap();
        let error = tool.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("delete_everything"));
    }

    #[tokio::test]
    async fn test_invalid_tool_arguments_are_reported_as_tool_errors() {
        let tools = offline_tools();
        let response = handle_message(
            &tools,
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"create_shopify_product","arguments":{}}}"#,
        )
        .await
        .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("Error creating product: invalid arguments"));
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_response() {
        let tools = offline_tools();
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        );
        let mut output = Vec::new();
        serve(&tools, input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], 1);
    }
}
