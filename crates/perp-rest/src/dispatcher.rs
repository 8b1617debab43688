//! HTTP transport
//!
//! The dispatcher performs exactly one attempt per call. It owns the HTTP
//! connection pool and a cancellation token; it knows nothing about either
//! exchange's response shapes.

use std::time::Duration;

use perp_auth::SignedEnvelope;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::request::{PreparedRequest, CONTENT_TYPE_JSON};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("perp-rest/", env!("CARGO_PKG_VERSION"));

/// Status and full body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends prepared requests
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
    cancellation: CancellationToken,
}

impl Dispatcher {
    /// Build a dispatcher with its own connection pool
    pub fn with_settings(timeout: Duration, user_agent: &str) -> RestResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(RestError::Http)?;
        Ok(Self::from_client(http))
    }

    /// Wrap a caller-supplied client
    ///
    /// The caller's client decides the timeout and pooling.
    pub fn from_client(http: Client) -> Self {
        Self {
            http,
            cancellation: CancellationToken::new(),
        }
    }

    /// Clone sharing the pool but observing a different token
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            http: self.http.clone(),
            cancellation: token,
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Fail every in-flight and future call made through this token
    pub fn cancel_all(&self) {
        self.cancellation.cancel();
    }

    /// Send one request and read the whole body
    ///
    /// Non-2xx statuses are returned, not turned into errors; classifying
    /// them is the exchange client's job.
    pub async fn send(
        &self,
        base_url: &str,
        request: &PreparedRequest,
        envelope: Option<&SignedEnvelope>,
    ) -> RestResult<RawResponse> {
        if self.cancellation.is_cancelled() {
            return Err(RestError::Cancelled);
        }

        let url = request.url(base_url);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCEPT, CONTENT_TYPE_JSON);

        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }
        if let Some(envelope) = envelope {
            for (name, value) in &envelope.headers {
                builder = builder.header(*name, value);
            }
        }

        debug!(method = %request.method, %url, signed = envelope.is_some(), "Sending request");

        let call = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        };

        let response = tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => return Err(RestError::Cancelled),
            result = call => result.map_err(RestError::from_transport)?,
        };

        debug!(status = response.status, bytes = response.body.len(), "Received response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RestRequest;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_error_status_as_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/ping"))
            .and(query_param("a", "1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
            .expect(1)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::with_settings(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT).unwrap();
        let prepared = RestRequest::get("/ping").param("a", 1).prepare("/api/v4").unwrap();
        let response = dispatcher.send(&server.uri(), &prepared, None).await.unwrap();

        assert_eq!(response.status, 418);
        assert_eq!(response.body, "teapot");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_cancelled_before_send() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dispatcher = Dispatcher::from_client(Client::new());
        dispatcher.cancel_all();
        let prepared = RestRequest::get("/ping").prepare("").unwrap();
        let err = dispatcher.send(&server.uri(), &prepared, None).await.unwrap_err();
        assert!(matches!(err, RestError::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let dispatcher =
            Dispatcher::with_settings(Duration::from_millis(100), DEFAULT_USER_AGENT).unwrap();
        let prepared = RestRequest::get("/slow").prepare("").unwrap();
        let err = dispatcher.send(&server.uri(), &prepared, None).await.unwrap_err();
        assert!(matches!(err, RestError::Timeout), "{:?}", err);
    }

    #[tokio::test]
    async fn test_scoped_token_leaves_parent_untouched() {
        let parent = Dispatcher::from_client(Client::new());
        let scoped = parent.with_cancellation(CancellationToken::new());
        scoped.cancel_all();
        assert!(scoped.cancellation_token().is_cancelled());
        assert!(!parent.cancellation_token().is_cancelled());
    }
}
