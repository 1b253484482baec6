//! Error types.

use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible dynflare error states.
///
/// The first three variants are the request-level failure kinds rendered to DDNS clients by the
/// [HTTP API][crate::api]. Everything else is treated as an unhandled failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a request can be fixed by the caller: an insecure transport, a missing or
    /// malformed `Authorization` header, or missing or malformed query parameters.
    #[error("{0}")]
    InvalidRequest(String),

    /// Returned when credentials are required but were not accepted.
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Returned when the remote DNS provider API reports a failure or returns no match for a
    /// lookup.
    #[error("{0}")]
    Provider(String),

    /// Returned when the `hostname` of an update request isn't a valid DNS name.
    #[error("invalid hostname: {0}")]
    InvalidHostname(#[from] ProtoError),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when the HTTP client used to reach the DNS provider can't be constructed.
    #[error("HTTP client error")]
    HttpClient(#[from] reqwest::Error),

    /// Returned when the HTTP server can't listen on or serve its socket.
    #[error("HTTP server error")]
    Server(#[from] hyper::Error),
}

impl Error {
    pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    pub(crate) fn provider(reason: impl Into<String>) -> Self {
        Self::Provider(reason.into())
    }
}
