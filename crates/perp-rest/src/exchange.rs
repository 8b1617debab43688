//! Exchange client capability
//!
//! Both exchange clients implement [`ExchangeClient`]. The provided
//! [`ExchangeClient::dispatch`] runs the shared pipeline:
//!
//! 1. refuse private calls without credentials (no I/O)
//! 2. prepare canonical strings
//! 3. sign
//! 4. send one attempt
//! 5. map non-2xx to an exchange error or an unexpected response
//! 6. decode the success body

use async_trait::async_trait;
use perp_auth::{Credentials, SignedEnvelope, Signer};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::dispatcher::{Dispatcher, RawResponse};
use crate::error::{ExchangeError, RestError, RestResult};
use crate::request::{Access, PreparedRequest, RestRequest};

/// Decode a success body into `T`
///
/// An empty body decodes as JSON `null`, which suits `()`, `Option<_>` and
/// [`serde::de::IgnoredAny`] targets and fails for anything else.
pub fn decode_json<T: DeserializeOwned>(body: &str) -> RestResult<T> {
    let parsed = if body.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_str(body)
    };

    parsed.map_err(|source| RestError::Decode {
        source,
        body: body.to_string(),
    })
}

/// An exchange's signing scheme, error shape and transport, behind one call
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Short exchange name used in errors and logs
    fn name(&self) -> &'static str;

    fn dispatcher(&self) -> &Dispatcher;

    /// Scheme and host, without trailing slash
    fn base_url(&self) -> &str;

    /// Prefix prepended to every request path, part of the signed path
    fn path_prefix(&self) -> &str {
        ""
    }

    fn credentials(&self) -> Option<&Credentials>;

    fn signer(&self) -> &dyn Signer;

    /// Sign public calls too when credentials are present
    fn signs_public_requests(&self) -> bool {
        false
    }

    fn prepare(&self, request: &RestRequest) -> RestResult<PreparedRequest> {
        request.prepare(self.path_prefix())
    }

    /// Authentication material for a call, `None` when it goes unsigned
    fn sign(&self, request: &RestRequest, prepared: &PreparedRequest) -> Option<SignedEnvelope> {
        let credentials = self.credentials()?;
        match request.access {
            Access::Private => Some(self.signer().sign(credentials, &prepared.canonical())),
            Access::Public if self.signs_public_requests() => {
                Some(self.signer().sign(credentials, &prepared.canonical()))
            }
            Access::Public => None,
        }
    }

    /// Recognize the exchange's documented error shape
    fn parse_error(&self, status: u16, body: &str) -> Option<ExchangeError>;

    /// Decode a 2xx response
    fn decode<T: DeserializeOwned>(&self, response: RawResponse) -> RestResult<T> {
        decode_json(&response.body)
    }

    /// Run one API call end to end
    async fn dispatch<T: DeserializeOwned + Send>(&self, request: RestRequest) -> RestResult<T> {
        if request.is_private() && self.credentials().is_none() {
            warn!(exchange = self.name(), path = %request.path, "Private endpoint called without credentials");
            return Err(RestError::AuthRequired);
        }

        let prepared = self.prepare(&request)?;
        let envelope = self.sign(&request, &prepared);

        let response = self
            .dispatcher()
            .send(self.base_url(), &prepared, envelope.as_ref())
            .await?;

        if !response.is_success() {
            debug!(exchange = self.name(), status = response.status, "Request rejected");
            return Err(match self.parse_error(response.status, &response.body) {
                Some(err) => RestError::Exchange(err),
                None => RestError::UnexpectedResponse {
                    status: response.status,
                    body: response.body,
                },
            });
        }

        self.decode(response)
    }
}
