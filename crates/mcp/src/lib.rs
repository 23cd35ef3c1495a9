// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mongrate-mcp: MCP (Model Context Protocol) server for the migration
//! engine.
//!
//! Speaks newline-delimited JSON-RPC 2.0 over any pair of byte streams
//! (stdio in production, in-memory duplexes in tests) and exposes engine
//! operations as tools. The database connection is established lazily on
//! the first tool call and re-established when a ping fails.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod protocol;
pub mod server;
pub mod tools;
pub mod wire;

pub use protocol::{PROTOCOL_VERSION, SERVER_NAME};
pub use server::{McpServer, ServeError};
