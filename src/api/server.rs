use crate::api::routes;
use crate::config::SharedConfig;
use crate::error::Error;
use crate::provider::ProviderClient;
use std::future::Future;
use std::net::{SocketAddr, TcpListener};

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub provider: ProviderClient,
}

/// Bind [`Config::api_bind_addr`][crate::config::Config::api_bind_addr] and return the server
/// future answering DDNS requests on it.
///
/// # Errors
///
/// Returns [`Error::IO`] if the address can't be bound, and [`Error::HttpClient`] or
/// [`Error::Server`] if the provider client or the HTTP server can't be set up.
pub fn new(config: SharedConfig) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let listener = TcpListener::bind(config.api_bind_addr)?;
    serve(listener, config)
}

pub(super) fn serve(
    listener: TcpListener,
    config: SharedConfig,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let provider = ProviderClient::new(&config)?;
    Ok(axum::Server::from_tcp(listener)?.serve(
        routes::new(AppState { config, provider })
            .into_make_service_with_connect_info::<SocketAddr>(),
    ))
}
