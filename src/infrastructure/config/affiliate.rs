//! Affiliate cookie settings.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AffiliateConfig {
    /// Add the `Secure` attribute to the referral cookie.
    #[serde(default)]
    pub secure_cookie: bool,
}
