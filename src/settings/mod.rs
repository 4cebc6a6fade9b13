// src/settings/mod.rs
pub mod io;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::locations::fetch::{FetchRequest, DEFAULT_BATCH_SIZE, DEFAULT_ENDPOINT};
use crate::locations::DisplayMode;

#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub display_mode: DisplayMode,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            batch_size: default_batch_size(),
            display_mode: DisplayMode::default(),
        }
    }
}

impl AppSettings {
    /// Fetch parameters, with optional per-session overrides from the command line.
    pub fn fetch_request(&self, endpoint: Option<&str>, batch_size: Option<usize>) -> FetchRequest {
        FetchRequest {
            endpoint: endpoint.unwrap_or(&self.endpoint).to_string(),
            batch_size: batch_size.unwrap_or(self.batch_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"display_mode":"MatchesOnly"}"#).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(settings.display_mode, DisplayMode::MatchesOnly);
    }

    #[test]
    fn command_line_overrides_win() {
        let settings = AppSettings::default();
        let request = settings.fetch_request(Some("http://localhost:8080/api"), None);
        assert_eq!(request.endpoint, "http://localhost:8080/api");
        assert_eq!(request.batch_size, DEFAULT_BATCH_SIZE);
    }
}
