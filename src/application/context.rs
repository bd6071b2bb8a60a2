//! Shared handles for inbound adapters.

use std::sync::Arc;

use super::admin::AdminService;
use super::affiliate::AffiliateService;
use super::cache::invalidation::InvalidationRegistry;
use super::cache::response::ResponseCache;
use super::listing::EventListing;
use super::market::MarketService;
use super::settings::SettingsResolver;
use crate::port::outbound::session::SessionStore;

/// Every service a request handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub listing: Arc<EventListing>,
    pub markets: Arc<MarketService>,
    pub affiliates: Arc<AffiliateService>,
    pub admin: Arc<AdminService>,
    pub settings: Arc<SettingsResolver>,
    pub sessions: Arc<dyn SessionStore>,
    pub responses: Arc<ResponseCache>,
    pub invalidation: Arc<InvalidationRegistry>,
}
