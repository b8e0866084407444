use crate::utils::error::{Result, ScanError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScanError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ScanError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Secrets are never echoed back in the error.
pub fn validate_secret(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScanError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    // An unsubstituted ${VAR} placeholder from a config file.
    if value.starts_with("${") && value.ends_with('}') {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "<redacted>".to_string(),
            reason: "Environment variable placeholder was not substituted".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Plausibility only: one `@` with something on either side and no whitespace.
/// The provider remains the judge of anything stricter.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ScanError::ValidationError {
            message: "Email address is required".to_string(),
        });
    }

    let plausible = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !plausible {
        return Err(ScanError::ValidationError {
            message: format!("'{}' is not a valid email address", email),
        });
    }
    Ok(())
}
