//! XT.com futures signing
//!
//! ```text
//! X = "validate-appkey=<key>&validate-timestamp=<ms>"
//! Y = "#<path>" + ("#<query>" if GET/DELETE and non-empty) + ("#<body>" if non-empty)
//! validate-signature = hex(HMAC-SHA256(secret, X + Y))
//! ```
//!
//! The receive window header is never part of the signed string.

use crate::credentials::Credentials;
use crate::signer::{hmac_sha256_hex, CanonicalRequest, SignedEnvelope, Signer};

/// Default receive window in milliseconds
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

/// XT.com request signer
#[derive(Debug, Clone, Copy, Default)]
pub struct XtSigner {
    recv_window: Option<u64>,
}

impl XtSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a `validate-recvwindow` header with every signed call
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    pub fn recv_window(&self) -> Option<u64> {
        self.recv_window
    }

    /// The canonical string the HMAC is computed over
    pub fn signature_payload(
        api_key: &str,
        request: &CanonicalRequest<'_>,
        timestamp: &str,
    ) -> String {
        let mut payload = format!(
            "validate-appkey={}&validate-timestamp={}#{}",
            api_key, timestamp, request.path
        );

        let query_signed = matches!(request.method, "GET" | "DELETE");
        if query_signed && !request.query.is_empty() {
            payload.push('#');
            payload.push_str(request.query);
        }
        if !request.body.is_empty() {
            payload.push('#');
            payload.push_str(request.body);
        }

        payload
    }
}

impl Signer for XtSigner {
    fn timestamp(&self) -> String {
        chrono::Utc::now().timestamp_millis().to_string()
    }

    fn sign_at(
        &self,
        credentials: &Credentials,
        request: &CanonicalRequest<'_>,
        timestamp: &str,
    ) -> SignedEnvelope {
        let payload = Self::signature_payload(credentials.api_key(), request, timestamp);
        let signature = hmac_sha256_hex(credentials.secret(), payload.as_bytes());

        let mut headers = vec![
            ("validate-appkey", credentials.api_key().to_string()),
            ("validate-timestamp", timestamp.to_string()),
            ("validate-signature", signature.clone()),
        ];
        if let Some(window) = self.recv_window {
            headers.push(("validate-recvwindow", window.to_string()));
        }

        SignedEnvelope {
            timestamp: timestamp.to_string(),
            signature,
            headers,
        }
    }
}
