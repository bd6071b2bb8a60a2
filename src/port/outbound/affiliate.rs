//! Affiliate lookup port.

use async_trait::async_trait;

use crate::domain::affiliate::Affiliate;
use crate::error::Result;

#[async_trait]
pub trait AffiliateStore: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Affiliate>>;
}
