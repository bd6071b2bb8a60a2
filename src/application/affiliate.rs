//! Affiliate referral redirects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::affiliate::{
    safe_redirect_target, AffiliateCookie, AFFILIATE_COOKIE_MAX_AGE_SECS, AFFILIATE_COOKIE_NAME,
};
use crate::error::Result;
use crate::port::outbound::affiliate::AffiliateStore;

/// Where to send the visitor, and the cookie to set on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateRedirect {
    pub location: String,
    /// Full `Set-Cookie` header value.
    pub set_cookie: Option<String>,
}

pub struct AffiliateService {
    store: Arc<dyn AffiliateStore>,
    secure_cookie: bool,
}

impl AffiliateService {
    #[must_use]
    pub fn new(store: Arc<dyn AffiliateStore>, secure_cookie: bool) -> Self {
        Self {
            store,
            secure_cookie,
        }
    }

    /// Resolve `/r/{code}?to=`.
    ///
    /// A known code sets the referral cookie and redirects to `to` when it is
    /// a same-origin path. An unknown code, or a failed lookup, redirects to
    /// `/` without a cookie.
    pub async fn resolve(
        &self,
        code: &str,
        to: Option<&str>,
        now: DateTime<Utc>,
    ) -> AffiliateRedirect {
        let code = code.trim();
        let affiliate = if code.is_empty() {
            None
        } else {
            match self.store.find_by_code(code).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(error = %e, code, "Affiliate lookup failed");
                    None
                }
            }
        };

        let Some(affiliate) = affiliate else {
            return AffiliateRedirect {
                location: "/".to_string(),
                set_cookie: None,
            };
        };

        let cookie = AffiliateCookie::new(affiliate.code, now);
        let set_cookie = match format_cookie(&cookie, self.secure_cookie) {
            Ok(header) => Some(header),
            Err(e) => {
                warn!(error = %e, "Failed to encode affiliate cookie");
                None
            }
        };
        let location = safe_redirect_target(to).to_string();
        info!(code = %cookie.affiliate_code, location = %location, "Affiliate referral");

        AffiliateRedirect {
            location,
            set_cookie,
        }
    }
}

/// Render the `Set-Cookie` header for an affiliate cookie.
pub fn format_cookie(cookie: &AffiliateCookie, secure: bool) -> Result<String> {
    let json = serde_json::to_string(cookie)?;
    let value: String = url::form_urlencoded::byte_serialize(json.as_bytes()).collect();
    let mut header = format!(
        "{AFFILIATE_COOKIE_NAME}={value}; Path=/; Max-Age={AFFILIATE_COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax"
    );
    if secure {
        header.push_str("; Secure");
    }
    Ok(header)
}
