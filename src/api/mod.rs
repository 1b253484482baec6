//! HTTP API translating dyndns2-style update requests into DNS provider API calls.
//!
//! dynflare is meant to sit behind a TLS-terminating reverse proxy. Every request, whatever its
//! path, must arrive with both an `https` scheme (from an absolute request target, or the `proto`
//! of an RFC 7239 `Forwarded` header) and `X-Forwarded-Proto: https`. Otherwise it is answered
//! with HTTP 400 (Bad Request).
//!
//! All text responses are `text/plain;charset=UTF-8` with `Cache-Control: no-store`. Errors are
//! a single plain-text line, since router firmware shows it to users verbatim.
//!
//! # API Endpoints
//!
//! ## `/myip` (any method)
//!
//!   Returns HTTP 200 (OK) with the caller's address as the body: the value of the configured
//!   [`Config::client_ip_header`][crate::config::Config::client_ip_header], byte for byte, or the
//!   TCP peer address if the proxy didn't set it.
//!
//! ## `/nic/update`, `/update` (any method)
//!
//!   Expects HTTP Basic credentials and a `hostname` query parameter:
//!
//!   ```bash
//!   ❯ curl -u 'account:<API token>' 'https://ddns.example.com/nic/update?hostname=home.example.com'
//!   good
//!   ```
//!
//!   The password is used as the provider API bearer token. The username is decoded but not
//!   otherwise checked. The zone containing `hostname` is looked up first, then the record, and
//!   finally the record's content is replaced with the caller's address.
//!
//!   The zone is always the last two labels of `hostname`. Names under a multi-label public
//!   suffix can't be updated: `home.example.co.uk` is looked up in zone `co.uk`, which fails
//!   with HTTP 500. A bare `.` is treated as a missing `hostname`.
//!
//!   Returns HTTP 200 (OK) with body `good` on success. Returns HTTP 400 (Bad Request) when
//!   the credentials or `hostname` are missing or malformed, and HTTP 500 (Internal Server Error)
//!   with a reason such as `Failed to find zone 'example.com'` when the provider call fails.
//!
//! ## `/favicon.ico`, `/robots.txt` (any method)
//!
//!   Returns HTTP 204 (No Content).
//!
//! Any other path returns HTTP 404 (Not Found) with body `Not Found.`.

mod api_error;
mod credentials;
mod model;
mod response;
mod routes;
pub mod server;
mod transport;

pub use server::new;
