//! `Authorization: ApiKey <token>` header parsing.
//!
//! This module is "core-only": it does not know about axum routing or
//! extensions. Middleware calls `ApiKeyPolicy::extract` and decides how to
//! respond.

use std::fmt;

use axum::http::{HeaderMap, HeaderName, header};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

pub const DEFAULT_SCHEME: &str = "ApiKey";

// Bytes of the SHA-256 digest kept in a fingerprint.
const FINGERPRINT_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyError {
    #[error("no authorization header included")]
    NoAuthHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
}

/// The credential taken from the header.
///
/// `Debug` is redacted; use `fingerprint()` when a log line needs to tell
/// keys apart.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// base64url(SHA-256(key)[..8]), stable across processes.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        URL_SAFE_NO_PAD.encode(&digest[..FINGERPRINT_LEN])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Which header to read and which scheme it must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyPolicy {
    pub header: HeaderName,
    pub scheme: String,
}

impl Default for ApiKeyPolicy {
    fn default() -> Self {
        Self {
            header: header::AUTHORIZATION,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl ApiKeyPolicy {
    pub fn new(header: HeaderName, scheme: impl Into<String>) -> Self {
        Self {
            header,
            scheme: scheme.into(),
        }
    }

    /// Pull `<scheme> <token>` out of `headers`.
    ///
    /// - header missing or empty: `NoAuthHeader`
    /// - anything other than `<scheme><ws><non-empty token>`: `MalformedHeader`
    ///
    /// Whitespace between scheme and token is skipped; the rest of the value
    /// is returned as-is (no decoding).
    pub fn extract(&self, headers: &HeaderMap) -> Result<ApiKey, ApiKeyError> {
        // HeaderMap::get returns the first value when the name repeats.
        let value = headers.get(&self.header).ok_or(ApiKeyError::NoAuthHeader)?;
        if value.is_empty() {
            return Err(ApiKeyError::NoAuthHeader);
        }

        let value = value.to_str().map_err(|_| ApiKeyError::MalformedHeader)?;

        let (scheme, token) = value
            .split_once(char::is_whitespace)
            .ok_or(ApiKeyError::MalformedHeader)?;
        // A run of whitespace is one separator.
        let token = token.trim_start();

        if scheme != self.scheme || token.is_empty() {
            return Err(ApiKeyError::MalformedHeader);
        }

        Ok(ApiKey(token.to_string()))
    }
}

/// Extract the API key from `Authorization: ApiKey <token>`.
pub fn get_api_key(headers: &HeaderMap) -> Result<ApiKey, ApiKeyError> {
    ApiKeyPolicy::default().extract(headers)
}
