//! HTTP surface (warp).
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/events` | [`handlers::list_events`] |
//! | `GET /api/events/{slug}/related` | [`handlers::related_events`] |
//! | `GET /api/tags/main` | [`handlers::main_tags`] |
//! | `GET /api/markets/search` | [`handlers::search_markets`] |
//! | `POST /api/markets/status` | [`handlers::market_status`] |
//! | `GET /r/{code}` | [`handlers::affiliate_redirect`] |
//! | `GET /health` | [`handlers::health`] |

pub mod filters;
pub mod handlers;
pub mod query;
pub mod reply;

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use self::filters::{with_context, with_viewer};
use self::query::Params;
use crate::application::context::AppContext;
use crate::error::{Error, Result};

/// Largest accepted request body.
pub const MAX_BODY_BYTES: u64 = 256 * 1024;

/// Every route, with rejections rendered as JSON errors.
pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let events = warp::path!("api" / "events")
        .and(warp::get())
        .and(warp::query::<Params>())
        .and(with_viewer(ctx.clone()))
        .and(with_context(ctx.clone()))
        .and_then(handlers::list_events);

    let related = warp::path!("api" / "events" / String / "related")
        .and(warp::get())
        .and(warp::query::<Params>())
        .and(with_context(ctx.clone()))
        .and_then(handlers::related_events);

    let main_tags = warp::path!("api" / "tags" / "main")
        .and(warp::get())
        .and(warp::query::<Params>())
        .and(with_context(ctx.clone()))
        .and_then(handlers::main_tags);

    let search = warp::path!("api" / "markets" / "search")
        .and(warp::get())
        .and(warp::query::<Params>())
        .and(with_context(ctx.clone()))
        .and_then(handlers::search_markets);

    let status = warp::path!("api" / "markets" / "status")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_context(ctx.clone()))
        .and_then(handlers::market_status);

    let affiliate = warp::path!("r" / String)
        .and(warp::get())
        .and(warp::query::<Params>())
        .and(with_context(ctx))
        .and_then(handlers::affiliate_redirect);

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(handlers::health);

    events
        .or(related)
        .or(main_tags)
        .or(search)
        .or(status)
        .or(affiliate)
        .or(health)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

async fn handle_rejection(
    rejection: Rejection,
) -> std::result::Result<warp::reply::Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found.")
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.")
    } else if rejection.find::<warp::reject::InvalidQuery>().is_some()
        || rejection.find::<warp::reject::LengthRequired>().is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid request.")
    } else {
        tracing::error!(rejection = ?rejection, "Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    };
    Ok(reply::error(status, message))
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(ctx: AppContext, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (bound, server) = warp::serve(routes(ctx))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| Error::Connection(format!("failed to bind {addr}: {e}")))?;
    info!(addr = %bound, "HTTP server listening");
    server.await;
    info!("HTTP server stopped");
    Ok(())
}
