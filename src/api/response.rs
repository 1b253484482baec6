use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

const PLAIN_TEXT_UTF8: &str = "text/plain;charset=UTF-8";
const NO_STORE: &str = "no-store";

/// A plain-text response with caching disabled, the shape DDNS client firmware expects.
pub(super) fn plain_text(status: StatusCode, body: impl Into<Vec<u8>>) -> Response {
    let body = body.into();
    (
        status,
        [
            (CONTENT_TYPE, HeaderValue::from_static(PLAIN_TEXT_UTF8)),
            (CACHE_CONTROL, HeaderValue::from_static(NO_STORE)),
            (CONTENT_LENGTH, HeaderValue::from(body.len())),
        ],
        body,
    )
        .into_response()
}

pub(super) fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
