use crate::error::Error;
use serde::Deserialize;

/// Query parameters of a `/nic/update` request. Parameters other than `hostname` are ignored.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub(super) struct UpdateParams {
    pub hostname: Option<String>,
}

impl UpdateParams {
    /// The requested hostname, or an [`Error::InvalidRequest`] if it is absent or empty.
    pub fn hostname(&self) -> Result<&str, Error> {
        match self.hostname.as_deref() {
            Some(hostname) if !hostname.is_empty() => Ok(hostname),
            _ => Err(Error::invalid_request("You must specify a hostname")),
        }
    }
}
