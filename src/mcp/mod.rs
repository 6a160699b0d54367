//! Model Context Protocol server over stdio.
//!
//! Exposes [`ShopifyTools`](crate::ShopifyTools) to agents as MCP tools using
//! newline-delimited JSON-RPC 2.0 on stdin/stdout. Supported methods are
//! `initialize`, `ping`, `tools/list` and `tools/call`; notifications are
//! accepted and never answered.
//!
//! ```json
//! {"jsonrpc": "2.0", "id": 1, "method": "tools/call",
//!  "params": {"name": "create_shopify_product", "arguments": {"title": "Test Shirt"}}}
//! ```
//!
//! Logs go to stderr; stdout carries protocol frames only.

pub mod server;
pub mod types;

pub use server::{handle_message, run_stdio, serve, SERVER_NAME};
pub use types::{McpError, McpRequest, McpResponse};
