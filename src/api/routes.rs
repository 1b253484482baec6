use crate::api::api_error::APIError;
use crate::api::credentials::{Credentials, CredentialsError};
use crate::api::model::UpdateParams;
use crate::api::response::{no_content, plain_text};
use crate::api::server::AppState;
use crate::api::transport::{require_secure_transport, requester_address};
use crate::error::Error;
use crate::provider::UpdateTarget;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::any;
use axum::{middleware, Router};
use axum_extra::extract::WithRejection;
use std::net::SocketAddr;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/myip", any(my_ip))
        .route("/nic/update", any(update))
        .route("/update", any(update))
        .route("/favicon.ico", any(empty))
        .route("/robots.txt", any(empty))
        .fallback(not_found)
        .layer(middleware::from_fn(require_secure_transport))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

async fn my_ip(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Response, APIError> {
    let peer = peer.map(|ConnectInfo(addr)| addr);
    let address = requester_address(&headers, &state.config.client_ip_header, peer)?;
    Ok(plain_text(StatusCode::OK, address.as_bytes()))
}

async fn update(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    WithRejection(Query(params), _): WithRejection<Query<UpdateParams>, APIError>,
) -> Result<Response, APIError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::invalid_request("missing credentials"))?;
    let credentials = authorization
        .to_str()
        .map_err(|_| CredentialsError::Malformed)
        .and_then(Credentials::from_authorization)
        .map_err(|err| {
            tracing::debug!("rejected authorization value: {err}");
            Error::invalid_request("Invalid authorization value")
        })?;

    let target = UpdateTarget::try_from_hostname(params.hostname()?)?;

    let peer = peer.map(|ConnectInfo(addr)| addr);
    let address = requester_address(&headers, &state.config.client_ip_header, peer)?;
    let address = address
        .to_str()
        .map_err(|_| Error::invalid_request("Invalid client address"))?;

    let record_name = &target.record_name;
    let zone_name = &target.zone_name;
    match state
        .provider
        .update_address(&credentials.password, &target, address)
        .await
    {
        Ok(record) => {
            tracing::info!("updated \"{record_name}\" in \"{zone_name}\" to {}", record.content);
            Ok(plain_text(StatusCode::OK, "good"))
        }
        Err(err) => {
            tracing::info!("rejected update of \"{record_name}\" in \"{zone_name}\": {err}");
            Err(err.into())
        }
    }
}

#[allow(clippy::unused_async)]
async fn empty() -> Response {
    no_content()
}

#[allow(clippy::unused_async)]
async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "Not Found.")
}
