// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream framing: JSON values out of an arbitrary byte stream.
//!
//! The canonical framing is one JSON object per line, but clients that
//! pretty-print or batch objects exist, so values are extracted with a
//! streaming decoder instead of a line split: whatever whitespace appears
//! between complete values is skipped.

use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read chunk size.
const CHUNK: usize = 8 * 1024;

/// Framing errors
#[derive(Debug, Error)]
pub enum WireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("unexpected end of stream inside a JSON value")]
    Truncated,
}

/// Incremental JSON value reader over an [`AsyncRead`].
pub struct JsonStream<R> {
    reader: R,
    buf: Vec<u8>,
    eof: bool,
}

impl<R: AsyncRead + Unpin> JsonStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            eof: false,
        }
    }

    /// Next complete JSON value.
    ///
    /// Returns `Ok(None)` at a clean end of stream. On a syntax error the
    /// offending input is discarded through the next newline so the caller
    /// can report a parse error and keep serving.
    pub async fn next(&mut self) -> Result<Option<Value>, WireError> {
        loop {
            if let Some(outcome) = self.try_extract()? {
                return Ok(Some(outcome));
            }

            if self.eof {
                return Ok(None);
            }

            let mut chunk = [0u8; CHUNK];
            let n = self.reader.read(&mut chunk).await?;
            if n == 0 {
                self.eof = true;
                // Trailing bytes that never became a value are a parse error.
                if !self.only_whitespace() {
                    self.buf.clear();
                    return Err(WireError::Truncated);
                }
            } else {
                self.buf.extend_from_slice(&chunk[..n]);
            }
        }
    }

    /// Try to pull one complete value out of the buffer.
    fn try_extract(&mut self) -> Result<Option<Value>, WireError> {
        let start = self
            .buf
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.buf.len());

        if start == self.buf.len() {
            self.buf.clear();
            return Ok(None);
        }

        let (item, offset) = {
            let mut iter =
                serde_json::Deserializer::from_slice(&self.buf[start..]).into_iter::<Value>();
            let item = iter.next();
            (item, iter.byte_offset())
        };

        match item {
            Some(Ok(value)) => {
                self.buf.drain(..start + offset);
                Ok(Some(value))
            }
            Some(Err(err)) if err.is_eof() => Ok(None),
            Some(Err(err)) => {
                // Skip the broken input through the next newline and resync.
                match self.buf[start..].iter().position(|b| *b == b'\n') {
                    Some(nl) => {
                        self.buf.drain(..start + nl + 1);
                    }
                    None => self.buf.clear(),
                }
                Err(WireError::Parse(err))
            }
            None => Ok(None),
        }
    }

    fn only_whitespace(&self) -> bool {
        self.buf.iter().all(|b| b.is_ascii_whitespace())
    }
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
