//! Composition root: storage, services, and invalidation wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::{
    SqliteAffiliateStore, SqliteEventStore, SqliteMarketStore, SqliteSessionStore,
    SqliteSettingsStore,
};
use crate::application::admin::AdminService;
use crate::application::affiliate::AffiliateService;
use crate::application::cache::invalidation::{InvalidationRegistry, TagCacheInvalidator};
use crate::application::cache::response::ResponseCache;
use crate::application::context::AppContext;
use crate::application::listing::EventListing;
use crate::application::market::MarketService;
use crate::application::ranking::RankingPolicies;
use crate::application::settings::SettingsResolver;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::event::EventStore;

/// Open the connection pool and apply migrations when configured.
pub fn connect(config: &Config) -> Result<DbPool> {
    let pool = create_pool(&config.database.url, config.database.pool_size)?;
    if config.database.run_migrations {
        run_migrations(&pool)?;
    }
    info!(
        url = %config.database.url,
        pool_size = config.database.pool_size,
        "Database ready"
    );
    Ok(pool)
}

/// Wire every service over `pool`.
///
/// Every cache that depends on stored data is registered with the
/// invalidation registry here, so recording a mutation reaches all of them.
#[must_use]
pub fn build_context(config: &Config, pool: DbPool) -> AppContext {
    let events: Arc<dyn EventStore> = Arc::new(SqliteEventStore::new(pool.clone()));
    let settings = Arc::new(SettingsResolver::new(Arc::new(SqliteSettingsStore::new(
        pool.clone(),
    ))));
    let responses = Arc::new(ResponseCache::new(
        Duration::from_secs(config.listing.response_cache_ttl_secs),
        config.listing.response_cache_max_entries,
    ));

    let invalidation = Arc::new(
        InvalidationRegistry::new()
            .with(responses.clone())
            .with(settings.clone())
            .with(Arc::new(TagCacheInvalidator::new(Arc::clone(&events)))),
    );

    let listing = Arc::new(EventListing::new(
        Arc::clone(&events),
        RankingPolicies::with_half_life(config.listing.trending_half_life_hours),
        config.listing.limits(),
    ));

    AppContext {
        listing,
        markets: Arc::new(MarketService::new(Arc::new(SqliteMarketStore::new(
            pool.clone(),
        )))),
        affiliates: Arc::new(AffiliateService::new(
            Arc::new(SqliteAffiliateStore::new(pool.clone())),
            config.affiliate.secure_cookie,
        )),
        admin: Arc::new(AdminService::new(
            events,
            Arc::clone(&settings),
            Arc::clone(&invalidation),
        )),
        settings,
        sessions: Arc::new(SqliteSessionStore::new(pool)),
        responses,
        invalidation,
    }
}
