use crate::config::toml_config::TomlConfig;
use crate::config::{ProviderConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Clone, Parser)]
#[command(name = "wescan")]
#[command(about = "Check whether an email address appears in known data breaches")]
pub struct CliConfig {
    /// Email to check. Without it, addresses are read from stdin one per line
    pub email: Option<String>,

    #[arg(long, env = "HIBP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    /// TOML file with a [provider] table; replaces the provider flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Print the final state as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Resolves the provider settings. A config file replaces the provider
    /// flags, but an explicit `--api-key` (or `HIBP_API_KEY`) still wins.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading provider config from {}", path);
                let mut file = TomlConfig::from_file(path)?;
                if let Some(key) = &self.api_key {
                    file.provider.api_key = Some(key.clone());
                }
                file.into_provider_config()?
            }
            None => ProviderConfig {
                base_url: self.base_url.clone(),
                api_key: self.api_key.clone().unwrap_or_default(),
                user_agent: self.user_agent.clone(),
                timeout_seconds: self.timeout_seconds,
            },
        };
        config.validate()?;
        Ok(config)
    }
}
