use crate::config::Config;
use crate::error::Error;
use crate::provider::model::{ApiMessage, ApiResponse, DnsRecord, UpdateTarget, Zone};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};

const USER_AGENT: &str = concat!("dynflare/", env!("CARGO_PKG_VERSION"));

/// Why a single remote call didn't produce a usable result. Only ever logged; callers see the
/// step-level [`Error::Provider`] instead.
#[derive(thiserror::Error, Debug)]
enum CallError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider reported failure (HTTP {status}): {messages}")]
    Unsuccessful { status: StatusCode, messages: String },
    #[error("no matching result")]
    NoResult,
}

/// A minimal client for the remote DNS provider API.
///
/// Every call takes the caller's bearer token explicitly. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// # Errors
    ///
    /// Returns [`Error::HttpClient`] if the underlying HTTP client can't be built.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.provider_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.provider_base_url.clone(),
        })
    }

    /// Find the first zone named exactly `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] if the lookup fails or matches nothing.
    pub async fn find_zone(&self, token: &str, name: &str) -> Result<Zone, Error> {
        let request = self
            .http
            .get(format!("{}/zones", self.base_url))
            .query(&[("name", name)]);
        self.call::<Vec<Zone>>(request, token)
            .await
            .and_then(first)
            .map_err(|err| {
                tracing::warn!("zone lookup for \"{name}\" failed: {err}");
                Error::provider(format!("Failed to find zone '{name}'"))
            })
    }

    /// Find the first record named exactly `name` within `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] if the lookup fails or matches nothing.
    pub async fn find_record(
        &self,
        token: &str,
        zone: &Zone,
        name: &str,
    ) -> Result<DnsRecord, Error> {
        let request = self
            .http
            .get(format!("{}/zones/{}/dns_records", self.base_url, zone.id))
            .query(&[("name", name)]);
        let mut record = self
            .call::<Vec<DnsRecord>>(request, token)
            .await
            .and_then(first)
            .map_err(|err| {
                tracing::warn!("record lookup for \"{name}\" in zone {} failed: {err}", zone.id);
                Error::provider(format!("Failed to find dns record '{name}'"))
            })?;
        if record.zone_id.is_empty() {
            record.zone_id = zone.id.clone();
        }
        Ok(record)
    }

    /// Overwrite the record's content with `content` and submit the whole record back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`] if the provider doesn't report success. The `result` it sends
    /// back is not inspected.
    pub async fn update_record(
        &self,
        token: &str,
        mut record: DnsRecord,
        content: &str,
    ) -> Result<DnsRecord, Error> {
        record.content = content.to_string();
        let request = self
            .http
            .put(format!(
                "{}/zones/{}/dns_records/{}",
                self.base_url, record.zone_id, record.id
            ))
            .json(&record);
        match self.call::<IgnoredAny>(request, token).await {
            Ok(_) | Err(CallError::NoResult) => Ok(record),
            Err(err) => {
                tracing::warn!("update of record {} failed: {err}", record.id);
                Err(Error::provider("Failed to update dns record"))
            }
        }
    }

    /// Point the record named by `target` at `content`: zone lookup, then record lookup, then
    /// update. The first failing step ends the sequence.
    ///
    /// # Errors
    ///
    /// Returns the [`Error::Provider`] of the first step that failed.
    pub async fn update_address(
        &self,
        token: &str,
        target: &UpdateTarget,
        content: &str,
    ) -> Result<DnsRecord, Error> {
        let zone = self.find_zone(token, &target.zone_name).await?;
        let record = self.find_record(token, &zone, &target.record_name).await?;
        self.update_record(token, record, content).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<T, CallError> {
        let response = request.bearer_auth(token).send().await?;
        let status = response.status();
        let body: ApiResponse<T> = response.json().await?;
        if body.success != Some(true) {
            return Err(CallError::Unsuccessful {
                status,
                messages: ApiMessage::join(&body.errors),
            });
        }
        body.result.ok_or(CallError::NoResult)
    }
}

fn first<T>(items: Vec<T>) -> Result<T, CallError> {
    items.into_iter().next().ok_or(CallError::NoResult)
}
