use crate::domain::model::BreachList;
use crate::domain::ports::{BreachProvider, ConfigProvider};
use crate::utils::error::{Result, ScanError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const API_KEY_HEADER: &str = "hibp-api-key";
const BREACHED_ACCOUNT_PATH: [&str; 3] = ["api", "v3", "breachedaccount"];

/// `BreachProvider` backed by the Have I Been Pwned v3 API.
pub struct HibpClient {
    client: Client,
    base_url: Url,
    api_key: String,
    user_agent: String,
}

impl HibpClient {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let base_url = Url::parse(config.base_url()).map_err(|e| {
            ScanError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: config.base_url().to_string(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key().to_string(),
            user_agent: config.user_agent().to_string(),
        })
    }

    /// `{base}/api/v3/breachedaccount/{email}?truncateResponse=false`, with the
    /// email percent-encoded as a single path segment.
    pub fn breached_account_url(&self, email: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ScanError::ConfigError {
                message: format!("base_url '{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(BREACHED_ACCOUNT_PATH)
            .push(email);
        url.set_query(Some("truncateResponse=false"));
        Ok(url)
    }
}

#[async_trait::async_trait]
impl BreachProvider for HibpClient {
    async fn breached_account(&self, email: &str) -> Result<BreachList> {
        let url = self.breached_account_url(email)?;
        tracing::debug!("Requesting breaches from: {}", url.path());

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Provider response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ScanError::ProviderError {
                status: status.as_u16(),
            });
        }

        // Read first, parse second, so a bad body is a MalformedResponse
        // rather than a transport error.
        let body = response.text().await?;
        let breaches: BreachList = serde_json::from_str(&body)?;
        tracing::debug!("Provider reported {} breaches", breaches.len());
        Ok(breaches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        base_url: String,
        timeout_seconds: u64,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                base_url,
                timeout_seconds: 5,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn api_key(&self) -> &str {
            "test-key"
        }

        fn user_agent(&self) -> &str {
            "WeScan Test"
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }
    }

    #[test]
    fn test_breached_account_url() {
        let client = HibpClient::new(&MockConfig::new("https://haveibeenpwned.com".into())).unwrap();

        let url = client.breached_account_url("test@example.com").unwrap();
        assert_eq!(
            url.as_str(),
            "https://haveibeenpwned.com/api/v3/breachedaccount/test@example.com?truncateResponse=false"
        );

        // Characters that would split or end the segment are escaped.
        let url = client.breached_account_url("a b/c?@example.com").unwrap();
        assert_eq!(url.path(), "/api/v3/breachedaccount/a%20b%2Fc%3F@example.com");
    }

    #[test]
    fn test_breached_account_url_keeps_base_path() {
        let client = HibpClient::new(&MockConfig::new("http://localhost:8080/proxy/".into())).unwrap();
        let url = client.breached_account_url("x@y.z").unwrap();
        assert_eq!(url.path(), "/proxy/api/v3/breachedaccount/x@y.z");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HibpClient::new(&MockConfig::new("not a url".into()));
        assert!(matches!(result, Err(ScanError::InvalidConfigValueError { .. })));
    }

    #[tokio::test]
    async fn test_sends_key_user_agent_and_untruncated_flag() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v3/breachedaccount/test@example.com")
                .query_param("truncateResponse", "false")
                .header("hibp-api-key", "test-key")
                .header("user-agent", "WeScan Test");
            then.status(404);
        });

        let client = HibpClient::new(&MockConfig::new(server.base_url())).unwrap();
        let result = client.breached_account("test@example.com").await.unwrap();

        api_mock.assert();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_success_preserves_provider_order() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path_contains("/api/v3/breachedaccount/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"Name": "LinkedIn", "Title": "LinkedIn", "BreachDate": "2012-05-05", "DataClasses": ["Email addresses", "Passwords"]},
                    {"Name": "Adobe", "Title": "Adobe", "BreachDate": "2013-10-04", "DataClasses": ["Emails"]},
                    {"Name": "Canva", "Title": "Canva", "BreachDate": "2019-05-24", "DataClasses": ["Names"]}
                ]));
        });

        let client = HibpClient::new(&MockConfig::new(server.base_url())).unwrap();
        let result = client.breached_account("leaked@example.com").await.unwrap();

        api_mock.assert();
        let names: Vec<&str> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["LinkedIn", "Adobe", "Canva"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_contains("/api/v3/breachedaccount/");
            then.status(401);
        });

        let client = HibpClient::new(&MockConfig::new(server.base_url())).unwrap();
        let err = client.breached_account("a@b.com").await.unwrap_err();

        assert!(matches!(err, ScanError::ProviderError { status: 401 }));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_malformed_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_contains("/api/v3/breachedaccount/");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = HibpClient::new(&MockConfig::new(server.base_url())).unwrap();
        let err = client.breached_account("a@b.com").await.unwrap_err();

        assert!(matches!(err, ScanError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path_contains("/api/v3/breachedaccount/");
            then.status(404).delay(Duration::from_secs(3));
        });

        let mut config = MockConfig::new(server.base_url());
        config.timeout_seconds = 1;
        let client = HibpClient::new(&config).unwrap();
        let err = client.breached_account("a@b.com").await.unwrap_err();

        assert!(matches!(err, ScanError::TransportError(_)));
    }
}
