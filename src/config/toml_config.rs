use crate::config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::{validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File form of the provider configuration:
///
/// ```toml
/// [provider]
/// api_key = "${HIBP_API_KEY}"
/// base_url = "https://haveibeenpwned.com"
/// user_agent = "WeScan Security App"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub provider: ProviderSection,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl std::fmt::Debug for ProviderSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSection")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScanError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScanError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HIBP_API_KEY})
    ///
    /// Unset variables are left as-is so validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScanError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Fills unset fields with defaults; the API key has none.
    pub fn into_provider_config(self) -> Result<ProviderConfig> {
        let section = self.provider;
        let api_key = validate_required_field("provider.api_key", &section.api_key)?.clone();

        let config = ProviderConfig {
            base_url: section
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            user_agent: section
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            timeout_seconds: section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        };
        config.validate()?;
        Ok(config)
    }
}
