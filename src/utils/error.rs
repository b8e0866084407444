use thiserror::Error;

/// Message shown when the provider could not be reached at all.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to check email. Please try again.";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("API error: {status}")]
    ProviderError { status: u16 },

    #[error("Transport failure: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Malformed response from provider: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Provider,
    Transport,
    Configuration,
    Input,
}

impl ScanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScanError::ProviderError { .. } | ScanError::MalformedResponse(_) => {
                ErrorCategory::Provider
            }
            ScanError::TransportError(_) | ScanError::IoError(_) => ErrorCategory::Transport,
            ScanError::ConfigError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScanError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    /// Text placed into `LookupState::Failed`.
    ///
    /// Transport failures collapse to the generic fallback; the underlying
    /// diagnostic only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            ScanError::TransportError(_) => FALLBACK_FAILURE_MESSAGE.to_string(),
            ScanError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScanError::ProviderError { status: 401 } => "Check that the HIBP API key is valid",
            ScanError::ProviderError { status: 429 } => {
                "The provider is rate limiting requests, wait a moment and resubmit"
            }
            ScanError::ProviderError { .. } | ScanError::MalformedResponse(_) => {
                "The provider returned an unexpected answer, try again later"
            }
            ScanError::TransportError(_) | ScanError::IoError(_) => {
                "Check your network connection and resubmit"
            }
            ScanError::ConfigError { .. }
            | ScanError::MissingConfigError { .. }
            | ScanError::InvalidConfigValueError { .. } => {
                "Pass --api-key or set HIBP_API_KEY, and check the config file"
            }
            ScanError::ValidationError { .. } => "Enter an address like your.email@example.com",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
