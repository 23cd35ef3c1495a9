// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection bootstrap.
//!
//! Builds driver options from [`Config`] and verifies reachability with a
//! bounded ping loop before any engine work starts.

use std::time::Duration;

use bson::doc;
use mongodb::options::{ClientOptions, Tls, TlsOptions};
use mongodb::Client;
use mongrate_core::Config;
use thiserror::Error;
use tracing::{debug, warn};

/// Ping attempts before giving up on a fresh connection.
const PING_ATTEMPTS: u32 = 5;

/// Delay between ping attempts.
const PING_DELAY: Duration = Duration::from_secs(2);

/// Connection errors
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid connection url: {0}")]
    Url(#[source] mongodb::error::Error),

    #[error("could not reach MongoDB after {attempts} attempts: {source}")]
    Unreachable {
        attempts: u32,
        #[source]
        source: mongodb::error::Error,
    },
}

/// Build [`ClientOptions`] from the configuration.
pub async fn client_options(config: &Config) -> Result<ClientOptions, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.app_name = Some("mongrate".to_string());
    options.min_pool_size = config.min_pool_size;
    options.max_pool_size = config.max_pool_size;
    options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));

    if config.ssl_enabled {
        options.tls = Some(Tls::Enabled(
            TlsOptions::builder()
                .allow_invalid_certificates(config.ssl_insecure)
                .build(),
        ));
    }

    Ok(options)
}

/// Connect and verify the deployment answers pings.
pub async fn connect(config: &Config) -> Result<Client, ConnectError> {
    let options = client_options(config).await.map_err(ConnectError::Url)?;
    let client = Client::with_options(options).map_err(ConnectError::Url)?;

    retry_ping(&client).await?;
    Ok(client)
}

/// Ping up to [`PING_ATTEMPTS`] times with a fixed delay.
///
/// Deployments behind slow-starting containers routinely fail the first
/// ping; transient connectivity is the one failure class worth retrying.
async fn retry_ping(client: &Client) -> Result<(), ConnectError> {
    let admin = client.database("admin");
    let mut attempt = 0;

    loop {
        attempt += 1;
        match admin.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                debug!(attempt, "MongoDB connection verified");
                return Ok(());
            }
            Err(source) if attempt >= PING_ATTEMPTS => {
                return Err(ConnectError::Unreachable {
                    attempts: attempt,
                    source,
                });
            }
            Err(err) => {
                warn!(attempt, max = PING_ATTEMPTS, error = %err, "MongoDB not ready");
                tokio::time::sleep(PING_DELAY).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "connect_tests.rs"]
mod tests;
