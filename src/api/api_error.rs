use crate::api::response::plain_text;
use crate::error::Error;
use axum::extract::rejection::QueryRejection;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

const FALLBACK_REASON: &str = "An unexpected error occurred";
const BASIC_CHALLENGE: &str = "Basic realm=\"dynflare\"";

pub(crate) struct APIError(Error);

/// The status and plain-text reason rendered for a failed request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct ErrorOutcome {
    pub status: StatusCode,
    pub reason: String,
}

impl ErrorOutcome {
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }
}

impl From<&Error> for ErrorOutcome {
    fn from(err: &Error) -> Self {
        let status = match err {
            Error::InvalidRequest(_) | Error::InvalidHostname(_) => StatusCode::BAD_REQUEST,
            Error::AuthenticationRequired(_) => StatusCode::UNAUTHORIZED,
            Error::Provider(_)
            | Error::IO(_)
            | Error::InvalidJSON(_)
            | Error::HttpClient(_)
            | Error::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let reason = match err.to_string() {
            reason if reason.is_empty() => FALLBACK_REASON.to_string(),
            reason => reason,
        };
        Self { status, reason }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let outcome = ErrorOutcome::from(&self.0);
        tracing::debug!(
            "responding {} {}: {}",
            outcome.status.as_u16(),
            outcome.status_text(),
            outcome.reason
        );
        let mut response = plain_text(outcome.status, outcome.reason);
        if let Error::AuthenticationRequired(_) = self.0 {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        }
        response
    }
}

impl From<Error> for APIError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<QueryRejection> for APIError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("rejected query string: {rejection}");
        Self(Error::invalid_request("Invalid query parameters"))
    }
}
