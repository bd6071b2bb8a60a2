//! Request handlers. Each returns a complete response; failures are mapped
//! to status codes here and never surface as rejections.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use warp::http::header::{HeaderValue, LOCATION, SET_COOKIE};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;

use super::query::{parse_limit, parse_list_criteria, pick_locale, Params};
use super::reply;
use crate::application::context::AppContext;
use crate::domain::cache_tag::CacheTag;
use crate::domain::locale::Locale;
use crate::domain::viewer::Viewer;
use crate::error::Error;

pub const EVENT_NOT_FOUND: &str = "Event not found.";
pub const INVALID_BODY: &str = "Invalid request body.";
const RELATED_FAILED: &str = "Failed to load related events.";
const TAGS_FAILED: &str = "Failed to load tags.";
const SEARCH_FAILED: &str = "Failed to search markets.";
const STATUS_FAILED: &str = "Failed to load market status.";

type Reply = Result<Response, warp::Rejection>;

async fn request_locale(ctx: &AppContext, params: &Params) -> Locale {
    let enabled = ctx.settings.enabled_locales().await;
    pick_locale(params.get("locale").map(String::as_str), &enabled)
}

fn cache_hit(ctx: &AppContext, key: &str) -> Option<Response> {
    let body = ctx.responses.get(key)?;
    debug!(key, "Response cache hit");
    Some(reply::raw_json(body.as_ref()))
}

/// Serialize `value`, remember it under `key` when given, and reply.
///
/// `generation` is the response cache generation captured before `value`
/// was read; the body is not cached if an invalidation happened since.
fn render<T: Serialize>(
    ctx: &AppContext,
    key: Option<String>,
    generation: u64,
    tags: Vec<CacheTag>,
    value: &T,
) -> Response {
    let body = match serde_json::to_string(value) {
        Ok(body) => body,
        Err(e) => return reply::failure(&Error::from(e), "Failed to encode response."),
    };
    if let Some(key) = key {
        ctx.responses.insert_at(generation, key, body.as_str(), tags);
    }
    reply::raw_json(body)
}

pub async fn list_events(params: Params, viewer: Viewer, ctx: AppContext) -> Reply {
    let generation = ctx.responses.generation();
    let locale = request_locale(&ctx, &params).await;
    let criteria = match parse_list_criteria(&params, &viewer, locale) {
        Ok(criteria) => criteria,
        Err(message) => return Ok(reply::error(StatusCode::BAD_REQUEST, message)),
    };

    // Only viewer-independent pages are shared.
    let key = criteria.is_anonymous().then(|| criteria.cache_key());
    if let Some(hit) = key.as_deref().and_then(|k| cache_hit(&ctx, k)) {
        return Ok(hit);
    }

    let result = ctx.listing.list_events(&criteria).await;
    let Some(events) = result.data else {
        let message = result.error.unwrap_or_default();
        return Ok(reply::error(StatusCode::INTERNAL_SERVER_ERROR, &message));
    };

    let tags = vec![CacheTag::EventsAll, CacheTag::events(criteria.tag.slug())];
    Ok(render(&ctx, key, generation, tags, &events))
}

pub async fn related_events(slug: String, params: Params, ctx: AppContext) -> Reply {
    let generation = ctx.responses.generation();
    let locale = request_locale(&ctx, &params).await;
    let tag = params.get("tag").map(String::as_str);

    let key = format!(
        "related?slug={slug}&tag={}&locale={locale}",
        tag.unwrap_or_default()
    );
    if let Some(hit) = cache_hit(&ctx, &key) {
        return Ok(hit);
    }

    match ctx.listing.related_events(&slug, tag, locale).await {
        Ok(events) => {
            let tags = vec![CacheTag::event(slug.as_str()), CacheTag::EventsAll];
            Ok(render(&ctx, Some(key), generation, tags, &events))
        }
        Err(Error::NotFound(_)) => Ok(reply::error(StatusCode::NOT_FOUND, EVENT_NOT_FOUND)),
        Err(e) => Ok(reply::failure(&e, RELATED_FAILED)),
    }
}

pub async fn main_tags(params: Params, ctx: AppContext) -> Reply {
    let generation = ctx.responses.generation();
    let locale = request_locale(&ctx, &params).await;
    let key = format!("main-tags?locale={locale}");
    if let Some(hit) = cache_hit(&ctx, &key) {
        return Ok(hit);
    }

    match ctx.listing.main_tags(locale).await {
        Ok(tags) => Ok(render(
            &ctx,
            Some(key),
            generation,
            vec![CacheTag::MainTags(locale)],
            &tags,
        )),
        Err(e) => Ok(reply::failure(&e, TAGS_FAILED)),
    }
}

pub async fn search_markets(params: Params, ctx: AppContext) -> Reply {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let limit = parse_limit(params.get("limit").map(String::as_str));

    match ctx.markets.search(query, limit).await {
        Ok(hits) => Ok(reply::json(&hits, StatusCode::OK)),
        Err(e) => Ok(reply::failure(&e, SEARCH_FAILED)),
    }
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    #[serde(rename = "conditionIds")]
    condition_ids: Vec<String>,
}

pub async fn market_status(body: Bytes, ctx: AppContext) -> Reply {
    let request: StatusRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!(error = %e, "Rejected market status body");
            return Ok(reply::error(StatusCode::BAD_REQUEST, INVALID_BODY));
        }
    };

    match ctx.markets.statuses(&request.condition_ids).await {
        Ok(statuses) => Ok(reply::json(
            &serde_json::json!({ "data": statuses }),
            StatusCode::OK,
        )),
        Err(e) => Ok(reply::failure(&e, STATUS_FAILED)),
    }
}

pub async fn affiliate_redirect(code: String, params: Params, ctx: AppContext) -> Reply {
    let to = params.get("to").map(String::as_str);
    let redirect = ctx.affiliates.resolve(&code, to, Utc::now()).await;

    let location = HeaderValue::from_str(&redirect.location)
        .unwrap_or_else(|_| HeaderValue::from_static("/"));
    let mut response = Response::new(warp::hyper::Body::empty());
    *response.status_mut() = StatusCode::TEMPORARY_REDIRECT;
    response.headers_mut().insert(LOCATION, location);

    if let Some(cookie) = redirect.set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "Dropping unencodable affiliate cookie"),
        }
    }
    Ok(response)
}

pub async fn health() -> Reply {
    Ok(reply::json(&serde_json::json!({ "status": "ok" }), StatusCode::OK))
}
