#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_secret, validate_url, Validate,
};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://haveibeenpwned.com";
pub const DEFAULT_USER_AGENT: &str = "WeScan Security App";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Everything the HTTP adapter needs to talk to the provider. The key is
/// only ever printed through the redacted `Debug` below.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl ConfigProvider for ProviderConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_secret("api_key", &self.api_key)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        Ok(())
    }
}
