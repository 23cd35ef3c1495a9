// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC 2.0 message shapes.
//!
//! Requests are handled as raw [`Value`]s so the `id` round-trips exactly
//! as the client sent it — an integer id must come back as an integer, a
//! string id as a string. Tool failures travel inside `result` with
//! `isError: true`; the JSON-RPC `error` member is reserved for protocol
//! violations.

use serde_json::{json, Value};

/// JSON-RPC version sent on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported by `initialize`.
pub const SERVER_NAME: &str = "mongrate";

/// Protocol error codes (JSON-RPC 2.0 §5.1).
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

/// Success response carrying `result`.
pub fn ok(id: &Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result,
    })
}

/// Protocol-error response carrying `error`.
pub fn error(id: &Value, code: i64, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": { "code": code, "message": message.into() },
    })
}

/// Successful tool invocation: a text content list.
pub fn tool_text(id: &Value, text: impl Into<String>) -> Value {
    ok(
        id,
        json!({
            "content": [{ "type": "text", "text": text.into() }],
            "isError": false,
        }),
    )
}

/// Failed tool invocation: still a `result`, flagged with `isError`.
pub fn tool_error(id: &Value, text: impl Into<String>) -> Value {
    ok(
        id,
        json!({
            "content": [{ "type": "text", "text": text.into() }],
            "isError": true,
        }),
    )
}

/// The `initialize` handshake result.
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        },
    })
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
