//! Response builders.

use serde::Serialize;
use serde_json::json;
use tracing::error;
use warp::http::header::{HeaderValue, CONTENT_TYPE};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::error::Error;

/// JSON body with the given status.
pub fn json<T: Serialize>(value: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(value), status).into_response()
}

/// `{"error": message}` with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    json(&json!({ "error": message }), status)
}

/// Pre-serialized JSON, as stored in the response cache.
pub fn raw_json(body: impl Into<String>) -> Response {
    let body: String = body.into();
    let mut response = Response::new(body.into());
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[must_use]
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) | Error::Domain(_) => StatusCode::BAD_REQUEST,
        Error::Unauthorized => StatusCode::UNAUTHORIZED,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log `err` and reply with `message`, using the status its kind maps to.
pub fn failure(err: &Error, message: &str) -> Response {
    if !err.is_client_error() {
        error!(error = %err, "Request failed");
    }
    error(status_for(err), message)
}
