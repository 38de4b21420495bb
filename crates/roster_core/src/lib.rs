//! Client core for the roster entry application.
//!
//! Owns the [`form::FormState`] state machine and the [`DirectoryApi`] seam
//! to the two remote operations the form depends on: fetching the location
//! list and checking whether a name is still available. Ships an in-process
//! mock provider (the default) and an HTTP provider for a real directory
//! server.

use std::{collections::HashSet, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod form;

pub use form::{
    FormPhase, FormState, RosterRow, ValidationRequest, ValidationToken, LOCATIONS_FETCH_ERROR,
    LOCATION_SENTINEL, MISSING_INPUT_ERROR, NAME_VALIDATION_ERROR,
};

/// Opaque directory service consulted by the form.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn locations(&self) -> Result<Vec<String>>;
    async fn is_name_available(&self, name: &str) -> Result<bool>;
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory endpoint '{endpoint}' returned status {status}")]
    Endpoint { endpoint: &'static str, status: u16 },
    #[error("invalid payload from directory endpoint '{endpoint}'")]
    Payload {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(400);

const DEFAULT_MOCK_LOCATIONS: &[&str] = &["Canada", "China", "USA", "Brazil"];

/// Names the mock treats as already claimed, compared case-insensitively.
const DEFAULT_TAKEN_NAMES: &[&str] = &["invalid name", "john smith", "jane doe"];

/// In-process provider with artificial latency, standing in for a real
/// directory server. Default backend of the desktop app.
pub struct MockDirectoryApi {
    latency: Duration,
    locations: Vec<String>,
    taken_names: HashSet<String>,
}

impl Default for MockDirectoryApi {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_LATENCY)
    }
}

impl MockDirectoryApi {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            locations: DEFAULT_MOCK_LOCATIONS
                .iter()
                .map(|location| location.to_string())
                .collect(),
            taken_names: DEFAULT_TAKEN_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_taken_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.taken_names = names
            .into_iter()
            .map(|name| name.into().trim().to_ascii_lowercase())
            .collect();
        self
    }
}

#[async_trait]
impl DirectoryApi for MockDirectoryApi {
    async fn locations(&self) -> Result<Vec<String>> {
        tokio::time::sleep(self.latency).await;
        Ok(self.locations.clone())
    }

    async fn is_name_available(&self, name: &str) -> Result<bool> {
        tokio::time::sleep(self.latency).await;
        let taken = self
            .taken_names
            .contains(&name.trim().to_ascii_lowercase());
        debug!(name, taken, "mock name-availability check");
        Ok(!taken)
    }
}

/// Provider backed by a directory server:
/// `GET {base}/locations` and `GET {base}/names/check?name=...`, both JSON.
pub struct HttpDirectoryApi {
    http: Client,
    base_url: String,
}

impl HttpDirectoryApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .with_context(|| format!("invalid directory server URL '{base_url}'"))?;
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryApi {
    async fn locations(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(format!("{}/locations", self.base_url))
            .send()
            .await
            .context("failed to reach the locations endpoint")?;
        if !response.status().is_success() {
            return Err(DirectoryError::Endpoint {
                endpoint: "locations",
                status: response.status().as_u16(),
            }
            .into());
        }
        response
            .json()
            .await
            .map_err(|source| {
                anyhow::Error::new(DirectoryError::Payload {
                    endpoint: "locations",
                    source,
                })
            })
    }

    async fn is_name_available(&self, name: &str) -> Result<bool> {
        let response = self
            .http
            .get(format!("{}/names/check", self.base_url))
            .query(&[("name", name)])
            .send()
            .await
            .context("failed to reach the name check endpoint")?;
        if !response.status().is_success() {
            return Err(DirectoryError::Endpoint {
                endpoint: "names/check",
                status: response.status().as_u16(),
            }
            .into());
        }
        response
            .json()
            .await
            .map_err(|source| {
                anyhow::Error::new(DirectoryError::Payload {
                    endpoint: "names/check",
                    source,
                })
            })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
