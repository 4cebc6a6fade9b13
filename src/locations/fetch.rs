// src/locations/fetch.rs
// Upstream client. The only place that talks to the network.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::definitions::{FetchPayload, RawLocation};

pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Why a batch could not be obtained. Errors are kept as strings so the
/// outcome can travel inside Bevy events.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Endpoint answered with HTTP {0}")]
    Status(u16),
    #[error("Could not parse payload: {0}")]
    Parse(String),
    #[error("Could not read payload file {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Result of one fetch: the whole batch, or nothing.
pub type FetchOutcome = Result<Vec<RawLocation>, FetchError>;

/// Where and how much to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub endpoint: String,
    pub batch_size: usize,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl FetchRequest {
    fn query(&self) -> [(&'static str, String); 1] {
        [("results", self.batch_size.to_string())]
    }
}

/// Parses a `{ results: [{ location: ... }] }` payload.
pub fn parse_payload(body: &str) -> FetchOutcome {
    let payload: FetchPayload = serde_json::from_str(body)?;
    Ok(payload.results.into_iter().map(|entry| entry.location).collect())
}

/// Fetches one batch asynchronously.
pub async fn fetch_batch(client: &reqwest::Client, request: &FetchRequest) -> FetchOutcome {
    let response = client
        .get(&request.endpoint)
        .query(&request.query())
        .send()
        .await?
        .error_for_status()?;
    let body = response.text().await?;
    parse_payload(&body)
}

/// Blocking variant for the command line. Must not run inside an async runtime.
pub fn fetch_batch_blocking(request: &FetchRequest) -> FetchOutcome {
    let client = reqwest::blocking::Client::new();
    let body = client
        .get(&request.endpoint)
        .query(&request.query())
        .send()?
        .error_for_status()?
        .text()?;
    parse_payload(&body)
}

/// Reads a previously saved payload from disk.
pub fn load_batch_from_file(path: &Path) -> FetchOutcome {
    let body = std::fs::read_to_string(path).map_err(|e| FetchError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_payload(&body)
}
