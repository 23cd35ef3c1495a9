// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! MCP server: reader task, ordered dispatch pump, lazy database session.
//!
//! One server instance serves one reader/writer pair. The reader runs as a
//! spawned task feeding a channel; the pump handles messages strictly in
//! arrival order and writes responses in the same order, so tool handlers
//! never run concurrently. The server exits when the stream ends or the
//! shutdown notify fires, then disconnects the database handle once.

use std::path::Path;
use std::sync::Arc;

use bson::doc;
use mongodb::{Client, Database};
use mongrate_core::{registered_migrations, Config};
use mongrate_engine::{connect, generator, schema, Engine};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex, Notify};
use tracing::{debug, info, warn};

use crate::protocol::{
    self, error, initialize_result, ok, tool_error, tool_text, INVALID_PARAMS, INVALID_REQUEST,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools;
use crate::wire::{JsonStream, WireError};

/// Serve errors
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An established database session: one handle, one engine, reused across
/// tool calls until a ping fails.
struct Conn {
    client: Client,
    db: Database,
    engine: Engine,
}

/// MCP server over the migration engine.
pub struct McpServer {
    config: Config,
    conn: Mutex<Option<Conn>>,
}

impl McpServer {
    /// Build a server. No connection is attempted until the first tool call.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Serve one reader/writer pair until end of stream or shutdown.
    pub async fn serve<R, W>(
        &self,
        reader: R,
        mut writer: W,
        shutdown: Arc<Notify>,
    ) -> Result<(), ServeError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let (tx, mut rx) = mpsc::channel::<Result<Value, WireError>>(16);

        let reader_task = tokio::spawn(async move {
            let mut stream = JsonStream::new(reader);
            loop {
                match stream.next().await {
                    Ok(Some(value)) => {
                        if tx.send(Ok(value)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        let fatal = matches!(err, WireError::Io(_) | WireError::Truncated);
                        if tx.send(Err(err)).await.is_err() || fatal {
                            break;
                        }
                    }
                }
            }
        });

        loop {
            tokio::select! {
                message = rx.recv() => match message {
                    None => {
                        debug!("client stream closed");
                        break;
                    }
                    Some(Ok(request)) => {
                        if let Some(response) = self.dispatch(request).await {
                            write_value(&mut writer, &response).await?;
                        }
                    }
                    Some(Err(err)) => {
                        warn!(error = %err, "failed to decode request");
                        let response =
                            error(&Value::Null, PARSE_ERROR, format!("parse error: {err}"));
                        write_value(&mut writer, &response).await?;
                    }
                },
                _ = shutdown.notified() => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        reader_task.abort();
        self.close().await;
        Ok(())
    }

    /// Disconnect the database handle, if one was ever established.
    pub async fn close(&self) {
        let conn = self.conn.lock().await.take();
        if let Some(conn) = conn {
            conn.client.shutdown().await;
            debug!("database handle closed");
        }
    }

    /// Handle one message. Returns `None` for notifications.
    async fn dispatch(&self, request: Value) -> Option<Value> {
        let Some(object) = request.as_object() else {
            return Some(error(
                &Value::Null,
                INVALID_REQUEST,
                "request must be a JSON object",
            ));
        };

        let id = object.get("id").cloned().unwrap_or(Value::Null);
        let method = object.get("method").and_then(Value::as_str).unwrap_or("");
        let params = object.get("params").cloned().unwrap_or_else(|| Value::Object(Default::default()));

        // Requests without an id are notifications: consumed, never answered.
        if id.is_null() {
            debug!(method, "notification received");
            return None;
        }

        if object.get("jsonrpc").and_then(Value::as_str) != Some(protocol::JSONRPC_VERSION) {
            return Some(error(&id, INVALID_REQUEST, "jsonrpc must be \"2.0\""));
        }

        let response = match method {
            "initialize" => ok(&id, initialize_result()),
            "ping" => ok(&id, Value::Object(Default::default())),
            "tools/list" => ok(&id, serde_json::json!({ "tools": tools::catalog() })),
            "tools/call" => self.handle_tool_call(&id, &params).await,
            "" => error(&id, INVALID_REQUEST, "missing method"),
            other => error(&id, METHOD_NOT_FOUND, format!("unknown method: {other}")),
        };

        Some(response)
    }

    async fn handle_tool_call(&self, id: &Value, params: &Value) -> Value {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return error(id, INVALID_PARAMS, "missing tool name");
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        debug!(tool = name, "tool call");

        match name {
            tools::MIGRATION_STATUS => self.tool_status(id).await,
            tools::MIGRATION_UP => self.tool_up(id, &arguments).await,
            tools::MIGRATION_DOWN => self.tool_down(id, &arguments).await,
            tools::MIGRATION_CREATE => self.tool_create(id, &arguments),
            tools::DATABASE_SCHEMA => self.tool_schema(id).await,
            other => tool_error(id, format!("unknown tool: {other}")),
        }
    }

    async fn tool_status(&self, id: &Value) -> Value {
        let guard = match self.ensure_connection().await {
            Ok(guard) => guard,
            Err(err) => return tool_error(id, format!("Database error: {err}")),
        };
        let Some(conn) = guard.as_ref() else {
            return tool_error(id, "Database error: no connection");
        };

        match conn.engine.status().await {
            Ok(status) => tool_text(id, tools::format_status(&status)),
            Err(err) => tool_error(id, err.to_string()),
        }
    }

    async fn tool_up(&self, id: &Value, arguments: &Value) -> Value {
        let target = str_arg(arguments, "version");

        let guard = match self.ensure_connection().await {
            Ok(guard) => guard,
            Err(err) => return tool_error(id, format!("Database error: {err}")),
        };
        let Some(conn) = guard.as_ref() else {
            return tool_error(id, "Database error: no connection");
        };

        match conn.engine.up(&target).await {
            Ok(()) => tool_text(id, "Migration 'Up' operation completed successfully."),
            Err(err) => tool_error(id, format!("migration up failed: {err}")),
        }
    }

    async fn tool_down(&self, id: &Value, arguments: &Value) -> Value {
        let target = str_arg(arguments, "version");

        let guard = match self.ensure_connection().await {
            Ok(guard) => guard,
            Err(err) => return tool_error(id, format!("Database error: {err}")),
        };
        let Some(conn) = guard.as_ref() else {
            return tool_error(id, "Database error: no connection");
        };

        match conn.engine.down(&target).await {
            Ok(()) => tool_text(id, "Migration 'Down' operation completed successfully."),
            Err(err) => tool_error(id, format!("migration down failed: {err}")),
        }
    }

    /// Creating a migration file is local; no connection involved.
    fn tool_create(&self, id: &Value, arguments: &Value) -> Value {
        let name = str_arg(arguments, "name");
        if name.is_empty() {
            return tool_error(id, "missing required argument: name");
        }
        let description = str_arg(arguments, "description");

        match generator::generate(Path::new(&self.config.migrations_path), &name, &description) {
            Ok(generated) => tool_text(
                id,
                format!("Created new migration file: {}", generated.path.display()),
            ),
            Err(err) => tool_error(id, err.to_string()),
        }
    }

    async fn tool_schema(&self, id: &Value) -> Value {
        let guard = match self.ensure_connection().await {
            Ok(guard) => guard,
            Err(err) => return tool_error(id, format!("Database error: {err}")),
        };
        let Some(conn) = guard.as_ref() else {
            return tool_error(id, "Database error: no connection");
        };

        match schema::inspect(&conn.db).await {
            Ok(collections) => {
                tool_text(id, tools::format_schema(conn.db.name(), &collections))
            }
            Err(err) => tool_error(id, format!("Failed to list collections: {err}")),
        }
    }

    /// Ping the current handle or establish a fresh one.
    ///
    /// The handle and engine live until a ping fails, at which point the
    /// next tool call rebuilds both. Connection faults stay scoped to the
    /// call that provoked them.
    async fn ensure_connection(
        &self,
    ) -> Result<tokio::sync::MutexGuard<'_, Option<Conn>>, mongodb::error::Error> {
        let mut guard = self.conn.lock().await;

        if let Some(conn) = guard.as_ref() {
            if conn.db.run_command(doc! { "ping": 1 }).await.is_ok() {
                return Ok(guard);
            }
            warn!("database ping failed; reconnecting");
        }

        let options = connect::client_options(&self.config).await?;
        let client = Client::with_options(options)?;
        let db = client.database(&self.config.database);
        let engine = Engine::new(
            db.clone(),
            &self.config.migrations_collection,
            registered_migrations(),
        );

        info!(database = %self.config.database, "connected to MongoDB");
        *guard = Some(Conn { client, db, engine });
        Ok(guard)
    }
}

async fn write_value<W: AsyncWrite + Unpin>(
    writer: &mut W,
    value: &Value,
) -> Result<(), std::io::Error> {
    let mut line = value.to_string().into_bytes();
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await
}

fn str_arg(arguments: &Value, key: &str) -> String {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
