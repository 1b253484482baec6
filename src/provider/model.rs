use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use trust_dns_proto::rr::Name;

/// A DNS provider account's container for all records under one registered domain.
#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A single DNS record within a [`Zone`].
///
/// Fields the provider returns beyond the ones named here are kept in `extra` so the record can
/// be submitted back unchanged apart from its `content`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DnsRecord {
    pub id: String,
    #[serde(default, skip_serializing)]
    pub zone_id: String,
    pub name: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The record to update, and the zone expected to contain it, derived from a request hostname.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UpdateTarget {
    pub zone_name: String,
    pub record_name: String,
}

impl UpdateTarget {
    /// The zone is the last two labels of `hostname`. Names are rendered without a trailing dot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHostname`] if `hostname` isn't a valid DNS name, and
    /// [`Error::InvalidRequest`] if it names the DNS root.
    pub fn try_from_hostname(hostname: &str) -> Result<Self, Error> {
        let name = Name::from_str(hostname)?;
        let zone_name = name.trim_to(2).to_string();
        let target = Self {
            zone_name: zone_name.trim_end_matches('.').to_string(),
            record_name: hostname.trim_end_matches('.').to_string(),
        };
        if target.zone_name.is_empty() || target.record_name.is_empty() {
            return Err(Error::invalid_request("You must specify a hostname"));
        }
        Ok(target)
    }
}

#[derive(Deserialize, Debug)]
pub(super) struct ApiResponse<T> {
    pub success: Option<bool>,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
}

#[derive(Deserialize, Debug)]
pub(super) struct ApiMessage {
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl ApiMessage {
    pub fn join(messages: &[ApiMessage]) -> String {
        messages
            .iter()
            .map(|m| match m.code {
                Some(code) => format!("{code}: {}", m.message),
                None => m.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_target_subdomain() {
        let target = UpdateTarget::try_from_hostname("home.example.com").unwrap();
        assert_eq!(target.zone_name, "example.com");
        assert_eq!(target.record_name, "home.example.com");
    }

    #[test]
    fn test_update_target_trailing_dot() {
        let target = UpdateTarget::try_from_hostname("a.b.example.org.").unwrap();
        assert_eq!(target.zone_name, "example.org");
        assert_eq!(target.record_name, "a.b.example.org");
    }

    #[test]
    fn test_update_target_apex() {
        let target = UpdateTarget::try_from_hostname("example.com").unwrap();
        assert_eq!(target.zone_name, "example.com");
        assert_eq!(target.record_name, "example.com");
    }

    #[test]
    fn test_update_target_invalid() {
        let too_long = format!("{}.example.com", "x".repeat(64));
        assert!(matches!(
            UpdateTarget::try_from_hostname(&too_long),
            Err(Error::InvalidHostname(_))
        ));
    }

    #[test]
    fn test_update_target_root_rejected() {
        for hostname in [".", ".."] {
            assert!(matches!(
                UpdateTarget::try_from_hostname(hostname),
                Err(Error::InvalidRequest(_) | Error::InvalidHostname(_))
            ));
        }
        assert!(matches!(
            UpdateTarget::try_from_hostname("."),
            Err(Error::InvalidRequest(reason)) if reason == "You must specify a hostname"
        ));
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let raw = json!({
            "id": "rec1",
            "zone_id": "zone1",
            "name": "home.example.com",
            "type": "A",
            "content": "192.0.2.1",
            "proxied": false,
            "ttl": 1
        });
        let mut record: DnsRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.zone_id, "zone1");
        record.content = "198.51.100.7".to_string();

        let submitted = serde_json::to_value(&record).unwrap();
        assert_eq!(
            submitted,
            json!({
                "id": "rec1",
                "name": "home.example.com",
                "type": "A",
                "content": "198.51.100.7",
                "proxied": false,
                "ttl": 1
            })
        );
    }

    #[test]
    fn test_absent_success_flag() {
        let resp: ApiResponse<Vec<Zone>> = serde_json::from_str(r#"{"result":[]}"#).unwrap();
        assert_eq!(resp.success, None);
        assert!(resp.errors.is_empty());
    }

    #[test]
    fn test_join_messages() {
        let resp: ApiResponse<Vec<Zone>> = serde_json::from_str(
            r#"{"success":false,"errors":[{"code":9109,"message":"Invalid access token"},{"message":"x"}]}"#,
        )
        .unwrap();
        assert_eq!(
            ApiMessage::join(&resp.errors),
            "9109: Invalid access token; x"
        );
    }
}
