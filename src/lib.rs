//! dynflare
//!
//! A small HTTP service that lets router firmware speaking the [dyndns2] update convention keep a
//! record hosted by a REST DNS provider (Cloudflare API v4 shaped) pointed at its current address.
//!
//! Each update request is translated into three sequential provider calls: zone lookup, record
//! lookup and record update. The caller's HTTP Basic password is the provider API token, so no
//! secrets are stored by the service and no state survives a request.
//!
//! [dyndns2]: https://help.dyn.com/remote-access-api/perform-update/
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod provider;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
