// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-migration execution.
//!
//! Each migration runs as a pair: the body first, then the record write
//! (insert going up, delete going down). When the deployment supports
//! multi-statement transactions the pair is atomic; when it does not
//! (standalone servers, restricted sharded clusters) the executor detects
//! the driver's rejection and re-runs the pair without a transaction.
//!
//! In the degraded mode a failure between the body and the record write
//! leaves a skew: the data change happened but the log does not say so.
//! The error is surfaced, nothing is rolled back, and the operator either
//! re-runs (safe for idempotent bodies) or reconciles by hand.

use mongodb::error::{ErrorKind, WriteFailure, UNKNOWN_TRANSACTION_COMMIT_RESULT};
use mongodb::{ClientSession, Database};
use mongrate_core::{Direction, Migration};
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{new_record, RecordStore};

/// Bounded commit retries on an unknown commit result.
const MAX_COMMIT_RETRIES: u32 = 3;

/// Execution errors, identifying the version and phase that failed.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("failed to start database session: {0}")]
    Session(#[source] mongodb::error::Error),

    #[error("failed to start transaction for {version}: {source}")]
    Begin {
        version: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("{direction} of {version} failed: {source:#}")]
    Body {
        version: String,
        direction: Direction,
        #[source]
        source: anyhow::Error,
    },

    #[error("record write for {version} failed: {source}")]
    Record {
        version: String,
        #[source]
        source: mongodb::error::Error,
    },

    #[error("commit for {version} failed: {source}")]
    Commit {
        version: String,
        #[source]
        source: mongodb::error::Error,
    },
}

impl ExecuteError {
    /// Whether the underlying driver error means the topology cannot do
    /// transactions at all, as opposed to this transaction failing.
    fn transactions_unsupported(&self) -> bool {
        match self {
            ExecuteError::Session(err)
            | ExecuteError::Begin { source: err, .. }
            | ExecuteError::Record { source: err, .. }
            | ExecuteError::Commit { source: err, .. } => is_unsupported(err),
            ExecuteError::Body { source, .. } => source
                .downcast_ref::<mongodb::error::Error>()
                .is_some_and(is_unsupported),
        }
    }
}

/// Runs planned migrations one at a time.
pub struct Executor<'a> {
    db: &'a Database,
    records: &'a RecordStore,
}

impl<'a> Executor<'a> {
    pub fn new(db: &'a Database, records: &'a RecordStore) -> Self {
        Self { db, records }
    }

    /// Execute one migration in the given direction.
    pub async fn execute(
        &self,
        migration: &dyn Migration,
        direction: Direction,
    ) -> Result<(), ExecuteError> {
        let mut session = self
            .db
            .client()
            .start_session()
            .await
            .map_err(ExecuteError::Session)?;

        match self.transactional(&mut session, migration, direction).await {
            Ok(()) => Ok(()),
            Err(err) if err.transactions_unsupported() => {
                info!(
                    version = migration.version(),
                    "transactions not supported by this deployment; re-running without one"
                );
                self.degraded(&mut session, migration, direction).await
            }
            Err(err) => Err(err),
        }
    }

    /// Transactional path: body and record write commit or abort together.
    async fn transactional(
        &self,
        session: &mut ClientSession,
        migration: &dyn Migration,
        direction: Direction,
    ) -> Result<(), ExecuteError> {
        session
            .start_transaction()
            .await
            .map_err(|source| ExecuteError::Begin {
                version: migration.version().to_string(),
                source,
            })?;

        if let Err(err) = self.pair(session, migration, direction).await {
            if let Err(abort) = session.abort_transaction().await {
                warn!(error = %abort, "failed to abort migration transaction");
            }
            return Err(err);
        }

        let mut retries = 0;
        loop {
            match session.commit_transaction().await {
                Ok(()) => return Ok(()),
                Err(err)
                    if err.contains_label(UNKNOWN_TRANSACTION_COMMIT_RESULT)
                        && retries < MAX_COMMIT_RETRIES =>
                {
                    retries += 1;
                    warn!(
                        version = migration.version(),
                        retries, "unknown commit result, retrying commit"
                    );
                }
                Err(source) => {
                    return Err(ExecuteError::Commit {
                        version: migration.version().to_string(),
                        source,
                    })
                }
            }
        }
    }

    /// Degraded path: same pair, no transaction.
    ///
    /// A failure after the body leaves the skew documented on this module.
    async fn degraded(
        &self,
        session: &mut ClientSession,
        migration: &dyn Migration,
        direction: Direction,
    ) -> Result<(), ExecuteError> {
        match self.pair(session, migration, direction).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if matches!(err, ExecuteError::Record { .. }) {
                    warn!(
                        version = migration.version(),
                        "non-transactional record write failed after the data change; \
                         records and data may be skewed"
                    );
                }
                Err(err)
            }
        }
    }

    /// The ordered pair: data change first, record write second.
    async fn pair(
        &self,
        session: &mut ClientSession,
        migration: &dyn Migration,
        direction: Direction,
    ) -> Result<(), ExecuteError> {
        let version = migration.version().to_string();

        match direction {
            Direction::Up => {
                migration
                    .up(self.db, session)
                    .await
                    .map_err(|source| ExecuteError::Body {
                        version: version.clone(),
                        direction,
                        source,
                    })?;

                self.records
                    .insert_in(&new_record(migration), session)
                    .await
                    .map_err(|source| ExecuteError::Record { version, source })
            }
            Direction::Down => {
                migration
                    .down(self.db, session)
                    .await
                    .map_err(|source| ExecuteError::Body {
                        version: version.clone(),
                        direction,
                        source,
                    })?;

                self.records
                    .delete_in(&version, session)
                    .await
                    .map_err(|source| ExecuteError::Record { version, source })
            }
        }
    }
}

/// Structural classifier for "this topology cannot do transactions".
///
/// Matches the server codes historically returned for the condition
/// (IllegalOperation, NoSuchTransaction, TransactionNotSupported) on
/// command and write-concern errors, with a message match as the final
/// fallback for proxies that rewrite codes.
fn is_unsupported(err: &mongodb::error::Error) -> bool {
    const CODES: [i32; 3] = [20, 251, 303];
    const MESSAGE: &str = "transactions are not supported";

    match &*err.kind {
        ErrorKind::Command(command) => {
            CODES.contains(&command.code) || command.message.to_lowercase().contains(MESSAGE)
        }
        ErrorKind::Write(WriteFailure::WriteConcernError(wc)) => {
            CODES.contains(&wc.code) || wc.message.to_lowercase().contains(MESSAGE)
        }
        _ => err.to_string().to_lowercase().contains(MESSAGE),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
