pub mod available;
pub mod config;
pub mod create;
pub mod delete;
pub mod models;

#[cfg(test)]
pub mod test_support;

use anyhow::{Context, Result};
use modelctl_core::{Config, HttpApiClient};

/// Load config and build an authenticated API client.
pub fn connect() -> Result<(Config, HttpApiClient)> {
    let config = Config::load()?;
    let client = HttpApiClient::from_config(&config).context("Error creating API client")?;
    tracing::debug!("using API at {}", client.base_url());
    Ok((config, client))
}
