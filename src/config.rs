//! Client configuration, read from the environment.

use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL without the `/api/v1` prefix.
    pub base_url: String,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `ADMIN_API_URL` (required), `ADMIN_API_TOKEN` and
    /// `ADMIN_API_TIMEOUT_SECS` (optional), honoring a local `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("ADMIN_API_URL")
            .map_err(|_| Error::Config("ADMIN_API_URL is not set".into()))?;
        let mut config = Self::new(base_url);
        if let Ok(token) = std::env::var("ADMIN_API_TOKEN") {
            config.token = Some(token);
        }
        if let Some(secs) = std::env::var("ADMIN_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
