//! Upstream Sources
//!
//! The boundary between the fetcher and wherever bytes actually come from.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{FetchError, Result};

/// Body PokeAPI sends alongside a missing resource.
const NOT_FOUND_BODY: &[u8] = b"Not Found";

// == Upstream Trait ==
/// Source of raw response bodies keyed by resource address.
///
/// Implementations must report a missing resource as `FetchError::NotFound`
/// and any failure of the retrieval itself as `FetchError::Transport`.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn retrieve(&self, address: &str) -> Result<Bytes>;
}

// == HTTP Upstream ==
/// Retrieves resources over HTTP with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    http_client: Client,
}

impl HttpUpstream {
    /// Creates an upstream whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http_client })
    }

    /// Wraps an existing client.
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn retrieve(&self, address: &str) -> Result<Bytes> {
        let response = self.http_client.get(address).send().await?;
        let status = response.status();
        debug!(address = %address, status = %status, "Upstream responded");

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(address.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "{} returned HTTP {}",
                address, status
            )));
        }

        let body = response.bytes().await?;
        if body.as_ref() == NOT_FOUND_BODY {
            return Err(FetchError::NotFound(address.to_string()));
        }
        Ok(body)
    }
}
