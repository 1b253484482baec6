use base64::engine::{general_purpose, DecodePaddingMode};
use base64::{alphabet, engine, DecodeError, Engine};
use lazy_static::lazy_static;
use std::fmt;
use std::string::FromUtf8Error;
use unicode_normalization::UnicodeNormalization;

/// Username and password decoded from an HTTP Basic `Authorization` header.
///
/// The password is the DNS provider bearer token. The username is decoded but otherwise unused.
#[derive(Clone, Eq, PartialEq)]
pub(super) struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("expected \"<scheme> <credentials>\"")]
    Malformed,
    #[error("invalid encoding: {0}")]
    InvalidEncoding(#[from] DecodeError),
    #[error("decoded credentials are not UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),
    #[error("decoded credentials contain a control character")]
    ControlCharacter,
    #[error("decoded credentials have no ':' separator")]
    MissingSeparator,
}

lazy_static! {
    // Some router firmware omits base64 padding.
    static ref BASE64_ENGINE: engine::GeneralPurpose = engine::GeneralPurpose::new(
        &alphabet::STANDARD,
        general_purpose::PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );
}

impl Credentials {
    /// Parse an `Authorization` header value of the form `<scheme> <base64(user:password)>`.
    ///
    /// The decoded text is NFC normalized and split on its first `:`, so passwords may contain
    /// colons. ASCII control characters anywhere in the decoded text are rejected.
    pub fn from_authorization(value: &str) -> Result<Self, CredentialsError> {
        let (scheme, encoded) = value.split_once(' ').ok_or(CredentialsError::Malformed)?;
        if scheme.is_empty() || encoded.is_empty() {
            return Err(CredentialsError::Malformed);
        }

        let decoded: String = String::from_utf8(BASE64_ENGINE.decode(encoded)?)?
            .nfc()
            .collect();
        if decoded.chars().any(|c| c.is_ascii_control()) {
            return Err(CredentialsError::ControlCharacter);
        }

        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialsError::MissingSeparator)?;
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(raw: &[u8]) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }

    #[test]
    fn test_split_on_first_colon() {
        let creds = Credentials::from_authorization(&basic(b"alice:p@ss:word")).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "p@ss:word");
    }

    #[test]
    fn test_empty_username() {
        let creds = Credentials::from_authorization(&basic(b":token")).unwrap();
        assert_eq!(creds.username, "");
        assert_eq!(creds.password, "token");
    }

    #[test]
    fn test_unpadded_payload() {
        // base64("ab:c") is "YWI6Yw==".
        let creds = Credentials::from_authorization("Basic YWI6Yw").unwrap();
        assert_eq!(creds.username, "ab");
        assert_eq!(creds.password, "c");
    }

    #[test]
    fn test_nfc_normalization() {
        // "e" followed by a combining acute accent composes to U+00E9.
        let creds = Credentials::from_authorization(&basic("jose\u{301}:pw".as_bytes())).unwrap();
        assert_eq!(creds.username, "jos\u{e9}");
    }

    #[test]
    fn test_control_characters_rejected() {
        for raw in [&b"alice:pa\0ss"[..], &b"al\x7fice:pass"[..], &b"alice:pass\n"[..]] {
            assert!(matches!(
                Credentials::from_authorization(&basic(raw)),
                Err(CredentialsError::ControlCharacter)
            ));
        }
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            Credentials::from_authorization(&basic(b"alice")),
            Err(CredentialsError::MissingSeparator)
        ));
    }

    #[test]
    fn test_missing_space() {
        assert!(matches!(
            Credentials::from_authorization("BasicYWxpY2U6cGFzcw=="),
            Err(CredentialsError::Malformed)
        ));
        assert!(matches!(
            Credentials::from_authorization("Basic "),
            Err(CredentialsError::Malformed)
        ));
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            Credentials::from_authorization("Basic not*base64"),
            Err(CredentialsError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            Credentials::from_authorization(&basic(b"\xff\xfe:pw")),
            Err(CredentialsError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::from_authorization(&basic(b"alice:secret-token")).unwrap();
        let debug = format!("{creds:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret-token"));
    }
}
