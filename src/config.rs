use crate::error::Error;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub type SharedConfig = Arc<Config>;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub api_bind_addr: SocketAddr,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    pub provider_base_url: String,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub provider_timeout: Duration,
    /// Header set by the fronting proxy carrying the caller's address, e.g. `CF-Connecting-IP`.
    pub client_ip_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_timeout: Duration::from_secs(30),
            provider_base_url: DEFAULT_PROVIDER_BASE_URL.to_string(),
            provider_timeout: Duration::from_secs(10),
            client_ip_header: "cf-connecting-ip".to_string(),
        }
    }
}

impl Config {
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf.normalized())
    }

    fn normalized(mut self) -> Self {
        let trimmed_len = self.provider_base_url.trim_end_matches('/').len();
        self.provider_base_url.truncate(trimmed_len);
        self.client_ip_header.make_ascii_lowercase();
        self
    }
}
