use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::transport::HttpTransport;

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Distributor endpoint, e.g. `http://localhost:5553`
    pub distributor_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GridConfig {
    pub fn new(distributor_url: impl Into<String>) -> Self {
        GridConfig {
            distributor_url: distributor_url.into(),
            request_timeout_secs: default_timeout_secs(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path).context("reading config file")?;
        let cfg: GridConfig = serde_json::from_str(&raw).context("parsing JSON")?;
        Ok(cfg)
    }

    /// Build the transport this config describes.
    pub fn transport(&self) -> Result<HttpTransport> {
        HttpTransport::with_timeout(
            self.distributor_url.as_str(),
            Duration::from_secs(self.request_timeout_secs),
        )
        .context("creating HTTP transport")
    }
}
