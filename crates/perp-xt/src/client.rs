//! Main XT.com futures client

use std::time::Duration;

use perp_auth::{Credentials, Signer, XtSigner};
use perp_rest::{
    CancellationToken, Dispatcher, ExchangeClient, ExchangeError, RawResponse, RestError,
    RestResult, DEFAULT_TIMEOUT,
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::types::{Balance, Depth, EntityId, Order, PlaceOrderRequest, Position, Ticker, Underlying};

/// USDT-margined host
pub const DEFAULT_USDT_BASE_URL: &str = "https://fapi.xt.com";
/// Coin-margined host
pub const DEFAULT_COIN_BASE_URL: &str = "https://dapi.xt.com";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "XT_API_KEY";
/// Environment variable holding the API secret
pub const ENV_API_SECRET: &str = "XT_API_SECRET";

const DEFAULT_USER_AGENT: &str = concat!("perp-xt/", env!("CARGO_PKG_VERSION"));

/// XT.com futures REST client
///
/// Public calls are never signed. Cloning is cheap: clones share the
/// connection pool and cancellation token.
///
/// # Example
///
/// ```no_run
/// use perp_xt::{Underlying, XtClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = XtClient::new()?;
///     let depth = client.get_depth("btc_usdt", 10).await?;
///     println!("spread: {:?}", depth.spread());
///
///     // With authentication for private endpoints
///     let auth_client = XtClient::from_env()?;
///     let balances = auth_client.get_balances().await?;
///
///     // Coin-margined markets
///     let coin = auth_client.with_underlying(Underlying::CoinMargined);
///     let positions = coin.account()?.positions(None).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct XtClient {
    dispatcher: Dispatcher,
    credentials: Option<Credentials>,
    usdt_base_url: String,
    coin_base_url: String,
    underlying: Underlying,
    signer: XtSigner,
}

impl XtClient {
    /// Create a client without authentication
    ///
    /// Only market endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from a key pair
    ///
    /// An empty key or secret yields a public-only client.
    pub fn from_keys(api_key: &str, secret_key: &str) -> RestResult<Self> {
        let mut config = ClientConfig::new();
        config.credentials = Credentials::from_pair(api_key, secret_key);
        Self::with_config(config)
    }

    /// Create a client from `XT_API_KEY` / `XT_API_SECRET`
    pub fn from_env() -> RestResult<Self> {
        let credentials = Credentials::from_env(ENV_API_KEY, ENV_API_SECRET)?;
        Self::with_credentials(credentials)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let dispatcher = match config.http_client {
            Some(http) => Dispatcher::from_client(http),
            None => Dispatcher::with_settings(
                config.timeout,
                config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
            )?,
        };

        let signer = match config.recv_window {
            Some(window) => XtSigner::new().with_recv_window(window),
            None => XtSigner::new(),
        };

        let usdt_base_url = config.usdt_base_url.trim_end_matches('/').to_string();
        let coin_base_url = config.coin_base_url.trim_end_matches('/').to_string();
        info!(
            usdt_base_url = %usdt_base_url,
            coin_base_url = %coin_base_url,
            authenticated = config.credentials.is_some(),
            "Created XT.com futures client"
        );

        Ok(Self {
            dispatcher,
            credentials: config.credentials,
            usdt_base_url,
            coin_base_url,
            underlying: config.underlying,
            signer,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Contract family the client talks to
    pub fn underlying(&self) -> Underlying {
        self.underlying
    }

    /// Clone targeting the other contract family
    pub fn with_underlying(&self, underlying: Underlying) -> Self {
        let mut client = self.clone();
        client.underlying = underlying;
        client
    }

    /// Clone whose calls fail with [`RestError::Cancelled`] once `token` fires
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        let mut client = self.clone();
        client.dispatcher = self.dispatcher.with_cancellation(token);
        client
    }

    /// Cancel every in-flight request sharing this client's token
    pub fn cancel_all_requests(&self) {
        self.dispatcher.cancel_all();
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        self.dispatcher.cancellation_token()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get the 24h ticker of a symbol
    pub async fn get_ticker(&self, symbol: &str) -> RestResult<Ticker> {
        self.market().ticker(symbol).await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `symbol` - Lower-case symbol (e.g., "btc_usdt")
    /// * `level` - Levels per side, 1 to 50
    pub async fn get_depth(&self, symbol: &str, level: u32) -> RestResult<Depth> {
        self.market().depth(symbol, level).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(self))
    }

    /// Get balances of every coin
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.account()?.balances().await
    }

    /// Get all positions
    pub async fn get_positions(&self) -> RestResult<Vec<Position>> {
        self.account()?.positions(None).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(TradingEndpoints::new(self))
    }

    /// Place a new order
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> RestResult<EntityId> {
        self.trading()?.place_order(order).await
    }

    /// Get an order by id
    pub async fn get_order(&self, order_id: i64) -> RestResult<Order> {
        self.trading()?.order(order_id).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: i64) -> RestResult<EntityId> {
        self.trading()?.cancel_order(order_id).await
    }
}

impl ExchangeClient for XtClient {
    fn name(&self) -> &'static str {
        crate::EXCHANGE
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn base_url(&self) -> &str {
        match self.underlying {
            Underlying::UsdtMargined => &self.usdt_base_url,
            Underlying::CoinMargined => &self.coin_base_url,
        }
    }

    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    fn signer(&self) -> &dyn Signer {
        &self.signer
    }

    fn parse_error(&self, status: u16, body: &str) -> Option<ExchangeError> {
        crate::error::parse_error(status, body)
    }

    /// Unwrap the response envelope; a non-zero `returnCode` is an error here too
    fn decode<T: DeserializeOwned>(&self, response: RawResponse) -> RestResult<T> {
        crate::error::decode_envelope(response.status, &response.body)
    }
}

impl std::fmt::Debug for XtClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XtClient")
            .field("base_url", &self.base_url())
            .field("underlying", &self.underlying)
            .field("recv_window", &self.signer.recv_window())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// USDT-margined host override
    pub usdt_base_url: String,
    /// Coin-margined host override
    pub coin_base_url: String,
    /// Contract family to start with
    pub underlying: Underlying,
    /// `validate-recvwindow` in milliseconds; the header is omitted when unset
    pub recv_window: Option<u64>,
    /// Pre-built HTTP client; replaces `timeout` and `user_agent`
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            usdt_base_url: DEFAULT_USDT_BASE_URL.to_string(),
            coin_base_url: DEFAULT_COIN_BASE_URL.to_string(),
            underlying: Underlying::UsdtMargined,
            recv_window: None,
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Point both contract families at one host, e.g. a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.usdt_base_url = base_url.clone();
        self.coin_base_url = base_url;
        self
    }

    /// Set the USDT-margined host; a trailing `/` is dropped
    pub fn with_usdt_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.usdt_base_url = base_url.into();
        self
    }

    /// Set the coin-margined host; a trailing `/` is dropped
    pub fn with_coin_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.coin_base_url = base_url.into();
        self
    }

    /// Set the contract family
    pub fn with_underlying(mut self, underlying: Underlying) -> Self {
        self.underlying = underlying;
        self
    }

    /// Send `validate-recvwindow` with signed calls
    pub fn with_recv_window(mut self, millis: u64) -> Self {
        self.recv_window = Some(millis);
        self
    }

    /// Use an existing HTTP client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perp_rest::RestRequest;

    #[test]
    fn test_client_without_credentials() {
        let client = XtClient::new().unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), DEFAULT_USDT_BASE_URL);
    }

    #[test]
    fn test_underlying_selects_host() {
        let client = XtClient::new().unwrap();
        let coin = client.with_underlying(Underlying::CoinMargined);
        assert_eq!(coin.base_url(), DEFAULT_COIN_BASE_URL);
        assert_eq!(client.base_url(), DEFAULT_USDT_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(3))
            .with_usdt_base_url("http://localhost:8080/")
            .with_coin_base_url("http://localhost:8081")
            .with_underlying(Underlying::CoinMargined)
            .with_recv_window(5000);

        assert_eq!(config.recv_window, Some(5000));

        let client = XtClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081");
        assert_eq!(
            client.with_underlying(Underlying::UsdtMargined).base_url(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_auth_required_error() {
        let client = XtClient::new().unwrap();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_public_calls_never_signed() {
        let keyed = XtClient::from_keys("key", "secret").unwrap();
        let req = RestRequest::get("/future/market/v1/public/time");
        let prepared = keyed.prepare(&req).unwrap();
        assert!(keyed.sign(&req, &prepared).is_none());

        let req = req.private();
        let envelope = keyed.sign(&req, &prepared).unwrap();
        assert_eq!(envelope.header("validate-appkey"), Some("key"));
        assert_eq!(envelope.header("validate-recvwindow"), None);
    }

    #[test]
    fn test_recv_window_header_when_configured() {
        let client = XtClient::with_config(
            ClientConfig::new()
                .with_credentials(Credentials::new("key", "secret").unwrap())
                .with_recv_window(3000),
        )
        .unwrap();
        let req = RestRequest::get("/future/user/v1/balance/list").private();
        let prepared = client.prepare(&req).unwrap();
        let envelope = client.sign(&req, &prepared).unwrap();
        assert_eq!(envelope.header("validate-recvwindow"), Some("3000"));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = XtClient::from_keys("key", "secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("secret"));
    }
}
