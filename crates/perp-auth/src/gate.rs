//! Gate.io API v4 signing
//!
//! ```text
//! SIGN = hex(HMAC-SHA512(secret, METHOD \n PATH \n QUERY \n hex(SHA512(BODY)) \n TIMESTAMP))
//! ```
//!
//! `PATH` carries the `/api/v4` prefix and `TIMESTAMP` is unix seconds. The
//! body hash is always computed, so an empty body contributes the SHA-512 of
//! the empty string.

use sha2::{Digest, Sha512};

use crate::credentials::Credentials;
use crate::signer::{hmac_sha512_hex, CanonicalRequest, SignedEnvelope, Signer};

/// Gate.io request signer
#[derive(Debug, Clone, Copy, Default)]
pub struct GateSigner;

impl GateSigner {
    /// Lowercase hex SHA-512 of the body
    pub fn hashed_payload(body: &str) -> String {
        hex::encode(Sha512::digest(body.as_bytes()))
    }

    /// The canonical string the HMAC is computed over
    pub fn signature_payload(request: &CanonicalRequest<'_>, timestamp: &str) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}",
            request.method,
            request.path,
            request.query,
            Self::hashed_payload(request.body),
            timestamp
        )
    }
}

impl Signer for GateSigner {
    fn timestamp(&self) -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    fn sign_at(
        &self,
        credentials: &Credentials,
        request: &CanonicalRequest<'_>,
        timestamp: &str,
    ) -> SignedEnvelope {
        let payload = Self::signature_payload(request, timestamp);
        let signature = hmac_sha512_hex(credentials.secret(), payload.as_bytes());

        SignedEnvelope {
            timestamp: timestamp.to_string(),
            signature: signature.clone(),
            headers: vec![
                ("KEY", credentials.api_key().to_string()),
                ("Timestamp", timestamp.to_string()),
                ("SIGN", signature),
            ],
        }
    }
}
