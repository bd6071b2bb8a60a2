//! Shared filters: context injection and viewer resolution.

use std::convert::Infallible;

use tracing::warn;
use warp::Filter;

use crate::application::context::AppContext;
use crate::domain::viewer::Viewer;

pub const SESSION_COOKIE: &str = "session_token";

pub fn with_context(
    ctx: AppContext,
) -> impl Filter<Extract = (AppContext,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}

/// The caller, from the session cookie. Missing, unknown, or expired
/// sessions resolve to an anonymous viewer.
pub fn with_viewer(
    ctx: AppContext,
) -> impl Filter<Extract = (Viewer,), Error = Infallible> + Clone {
    warp::cookie::optional::<String>(SESSION_COOKIE)
        .and(with_context(ctx))
        .then(|token: Option<String>, ctx: AppContext| async move {
            resolve_viewer(&ctx, token.as_deref()).await
        })
}

pub async fn resolve_viewer(ctx: &AppContext, token: Option<&str>) -> Viewer {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Viewer::anonymous();
    };
    match ctx.sessions.resolve(token).await {
        Ok(Some(viewer)) => viewer,
        Ok(None) => Viewer::anonymous(),
        Err(e) => {
            warn!(error = %e, "Session lookup failed, treating caller as anonymous");
            Viewer::anonymous()
        }
    }
}
