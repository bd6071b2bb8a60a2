//! Market lookup port.

use async_trait::async_trait;

use crate::domain::id::ConditionId;
use crate::domain::market::{MarketSearchHit, MarketStatus};
use crate::error::Result;

#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Markets whose title matches `term`, highest volume first.
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<MarketSearchHit>>;

    /// Resolution flags for the known ids among `condition_ids`.
    async fn statuses(&self, condition_ids: &[ConditionId]) -> Result<Vec<MarketStatus>>;
}
