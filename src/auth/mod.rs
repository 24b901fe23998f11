use axum::http::{header, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::config::BasicAuthConfig;

/// Username and password decoded from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Why a header could not be turned into credentials. Only used for
/// server-side logging; clients always see the same 401 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
    MissingHeader,
    WrongScheme,
    BadEncoding,
    MissingSeparator,
}

impl BasicCredentials {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CredentialsError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(CredentialsError::MissingHeader)?
            .to_str()
            .map_err(|_| CredentialsError::BadEncoding)?;

        Self::parse(value)
    }

    /// Parse the raw header value, e.g. `Basic YWRtaW46c2VjcmV0`
    pub fn parse(value: &str) -> Result<Self, CredentialsError> {
        let (scheme, token) = value
            .trim()
            .split_once(' ')
            .ok_or(CredentialsError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(CredentialsError::WrongScheme);
        }

        let decoded = STANDARD
            .decode(token.trim())
            .map_err(|_| CredentialsError::BadEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::BadEncoding)?;

        // The password may itself contain ':'
        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialsError::MissingSeparator)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Both fields are always compared so the check takes the same time
    /// whichever one is wrong.
    pub fn matches(&self, expected: &BasicAuthConfig) -> bool {
        let user_ok = constant_time_eq(self.username.as_bytes(), expected.username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), expected.password.as_bytes());
        user_ok & pass_ok
    }
}

/// Constant-time byte equality.
///
/// Both inputs are hashed to fixed-size digests first, so neither the
/// position of the first differing byte nor a length mismatch shows up in
/// the comparison time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let a = Sha256::digest(a);
    let b = Sha256::digest(b);
    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}

/// Build a header value for the given credentials
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
