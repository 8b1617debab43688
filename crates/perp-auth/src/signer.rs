//! Signer abstraction shared by both exchanges

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

use crate::credentials::Credentials;

/// The request exactly as it will be transmitted
///
/// `path` includes any API prefix, `query` is the already-encoded query
/// string without a leading `?`, and `body` is the exact body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query: &'a str,
    pub body: &'a str,
}

impl<'a> CanonicalRequest<'a> {
    pub fn new(method: &'a str, path: &'a str, query: &'a str, body: &'a str) -> Self {
        Self {
            method,
            path,
            query,
            body,
        }
    }
}

/// Authentication material for a single call
///
/// Built fresh for every request and never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    /// Timestamp that went into the signature
    pub timestamp: String,
    /// Lowercase hex HMAC
    pub signature: String,
    /// Headers to attach, in insertion order
    pub headers: Vec<(&'static str, String)>,
}

impl SignedEnvelope {
    /// Look up a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Signing scheme for one exchange
pub trait Signer: Send + Sync + std::fmt::Debug {
    /// Current timestamp in the unit the exchange expects
    fn timestamp(&self) -> String;

    /// Sign with an explicit timestamp
    ///
    /// Pure: the same inputs always produce the same envelope.
    fn sign_at(
        &self,
        credentials: &Credentials,
        request: &CanonicalRequest<'_>,
        timestamp: &str,
    ) -> SignedEnvelope;

    /// Sign with the current time
    fn sign(&self, credentials: &Credentials, request: &CanonicalRequest<'_>) -> SignedEnvelope {
        let timestamp = self.timestamp();
        self.sign_at(credentials, request, &timestamp)
    }
}

pub(crate) fn hmac_sha512_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

pub(crate) fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}
