//! Client for the remote DNS provider API.
//!
//! Three calls are needed to point one record at a new address, always in this order:
//!
//! 1. `GET /zones?name=<zone>` to find the zone containing the record.
//! 2. `GET /zones/<zone id>/dns_records?name=<record>` to find the record.
//! 3. `PUT /zones/<zone id>/dns_records/<record id>` with the full record and its new `content`.
//!
//! Each response is an envelope of the form `{"success": true, "result": ...}`. A missing or false
//! `success`, or an empty `result` list, fails the step. Only the first match of a lookup is used.
//! The bearer token is supplied per call by the requester and never stored.

mod client;
mod model;

pub use client::ProviderClient;
pub use model::{DnsRecord, UpdateTarget, Zone};
