use crate::api::api_error::APIError;
use crate::error::Error;
use axum::http::header::FORWARDED;
use axum::http::{HeaderMap, HeaderValue, Request, Uri};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const HTTPS: &str = "https";

/// Middleware rejecting every request that didn't reach the fronting proxy over HTTPS.
pub(super) async fn require_secure_transport<B>(
    request: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    if !is_secure(request.uri(), request.headers()) {
        tracing::debug!("rejected insecure request for {}", request.uri().path());
        return Err(Error::invalid_request("HTTPS is required").into());
    }
    Ok(next.run(request).await)
}

/// Both the request scheme and `X-Forwarded-Proto` must say `https`. The scheme comes from an
/// absolute-form request target, or else the `proto` of the RFC 7239 `Forwarded` header.
fn is_secure(uri: &Uri, headers: &HeaderMap) -> bool {
    let scheme = match uri.scheme_str() {
        Some(scheme) => Some(scheme),
        None => forwarded_proto(headers),
    };
    let forwarded_scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    [scheme, forwarded_scheme]
        .iter()
        .all(|s| s.map_or(false, |s| s.eq_ignore_ascii_case(HTTPS)))
}

/// The `proto` parameter of the first (client-nearest) element of a `Forwarded` header.
fn forwarded_proto(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(FORWARDED)?.to_str().ok()?;
    let element = value.split(',').next()?;
    element.split(';').find_map(|pair| {
        let (key, val) = pair.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("proto")
            .then(|| val.trim().trim_matches('"'))
    })
}

/// The caller's address: the raw value of `header_name` as set by the fronting proxy, or the TCP
/// peer address when that header is absent.
pub(super) fn requester_address(
    headers: &HeaderMap,
    header_name: &str,
    peer: Option<SocketAddr>,
) -> Result<HeaderValue, Error> {
    if let Some(value) = headers.get(header_name) {
        return Ok(value.clone());
    }
    peer.and_then(|addr| HeaderValue::try_from(addr.ip().to_string()).ok())
        .ok_or_else(|| Error::invalid_request("Unable to determine client address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        headers
    }

    #[test]
    fn test_secure_behind_proxy() {
        let uri: Uri = "/nic/update".parse().unwrap();
        let h = headers(&[
            ("forwarded", "for=192.0.2.60;proto=https;by=203.0.113.43"),
            ("x-forwarded-proto", "https"),
        ]);
        assert!(is_secure(&uri, &h));
    }

    #[test]
    fn test_secure_absolute_uri() {
        let uri: Uri = "https://ddns.example.com/myip".parse().unwrap();
        assert!(is_secure(&uri, &headers(&[("x-forwarded-proto", "HTTPS")])));
    }

    #[test]
    fn test_both_indicators_required() {
        let relative: Uri = "/myip".parse().unwrap();
        let absolute_http: Uri = "http://ddns.example.com/myip".parse().unwrap();

        assert!(!is_secure(&relative, &headers(&[])));
        assert!(!is_secure(&relative, &headers(&[("x-forwarded-proto", "https")])));
        assert!(!is_secure(&relative, &headers(&[("forwarded", "proto=https")])));
        assert!(!is_secure(
            &relative,
            &headers(&[("forwarded", "proto=https"), ("x-forwarded-proto", "http")])
        ));
        assert!(!is_secure(
            &absolute_http,
            &headers(&[("forwarded", "proto=https"), ("x-forwarded-proto", "https")])
        ));
    }

    #[test]
    fn test_forwarded_proto_first_element() {
        let h = headers(&[("forwarded", "proto=\"https\", proto=http")]);
        assert_eq!(forwarded_proto(&h), Some("https"));
        let h = headers(&[("forwarded", "for=192.0.2.60")]);
        assert_eq!(forwarded_proto(&h), None);
    }

    #[test]
    fn test_requester_address_prefers_header() {
        let h = headers(&[("cf-connecting-ip", "2001:db8::1")]);
        let peer = Some("127.0.0.1:50000".parse().unwrap());
        assert_eq!(
            requester_address(&h, "cf-connecting-ip", peer).unwrap(),
            "2001:db8::1"
        );
    }

    #[test]
    fn test_requester_address_peer_fallback() {
        let peer = Some("192.0.2.5:50000".parse().unwrap());
        assert_eq!(
            requester_address(&headers(&[]), "cf-connecting-ip", peer).unwrap(),
            "192.0.2.5"
        );
        assert!(matches!(
            requester_address(&headers(&[]), "cf-connecting-ip", None),
            Err(Error::InvalidRequest(_))
        ));
    }
}
