use crate::domain::model::BreachList;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Outbound boundary to the breach-data provider.
#[async_trait]
pub trait BreachProvider: Send + Sync {
    /// All breaches the account appears in.
    ///
    /// An unknown account is `Ok(vec![])`, not an error.
    async fn breached_account(&self, email: &str) -> Result<BreachList>;
}
