//! Main Gate.io futures client

use std::time::Duration;

use perp_auth::{Credentials, GateSigner, Signer};
use perp_rest::{
    CancellationToken, Dispatcher, ExchangeClient, ExchangeError, Method, PreparedRequest,
    RestError, RestRequest, RestResult, DEFAULT_TIMEOUT,
};
use tracing::info;

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::types::{
    CreateFuturesOrderRequest, FuturesAccount, FuturesOrder, OrderBook, Position, Settle, Ticker,
};

/// Production host
pub const DEFAULT_BASE_URL: &str = "https://api.gateio.ws";

/// Prefix of every API v4 path, part of the signed path
pub const API_PREFIX: &str = "/api/v4";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "GATE_API_KEY";
/// Environment variable holding the API secret
pub const ENV_API_SECRET: &str = "GATE_API_SECRET";

const DEFAULT_USER_AGENT: &str = concat!("perp-gateio/", env!("CARGO_PKG_VERSION"));

/// Gate.io futures REST client
///
/// Cloning is cheap: clones share the connection pool and cancellation token.
///
/// # Example
///
/// ```no_run
/// use perp_gateio::{GateClient, Settle};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = GateClient::new()?;
///     let tickers = client.market().tickers(Some("BTC_USDT")).await?;
///
///     // With authentication for private endpoints
///     let auth_client = GateClient::from_env()?;
///     let account = auth_client.get_account().await?;
///     println!("{} available", account.available);
///
///     // BTC-settled markets
///     let btc = auth_client.with_settle(Settle::Btc);
///     let positions = btc.account()?.positions(None).await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct GateClient {
    dispatcher: Dispatcher,
    credentials: Option<Credentials>,
    base_url: String,
    settle: Settle,
    signer: GateSigner,
}

impl GateClient {
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

    /// Create a client from `GATE_API_KEY` / `GATE_API_SECRET`
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

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, authenticated = config.credentials.is_some(), "Created Gate.io futures client");

        Ok(Self {
            dispatcher,
            credentials: config.credentials,
            base_url,
            settle: config.settle,
            signer: GateSigner,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Settle currency used in endpoint paths
    pub fn settle(&self) -> Settle {
        self.settle
    }

    /// Clone targeting another settle currency
    pub fn with_settle(&self, settle: Settle) -> Self {
        let mut client = self.clone();
        client.settle = settle;
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

    pub(crate) fn futures_path(&self, suffix: &str) -> String {
        format!("/futures/{}{}", self.settle, suffix)
    }

    /// Path of one item under a settle-scoped collection, e.g. `/orders/{id}`
    ///
    /// The id goes into the signed path verbatim, so anything that would
    /// reshape the URL is rejected before the call is built.
    pub(crate) fn item_path(&self, collection: &str, id: &str) -> RestResult<String> {
        Ok(self.futures_path(&format!("{}/{}", collection, path_segment(id)?)))
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get tickers, optionally for a single contract
    pub async fn get_tickers(&self, contract: Option<&str>) -> RestResult<Vec<Ticker>> {
        self.market().tickers(contract).await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `contract` - Contract name (e.g., "BTC_USDT")
    /// * `limit` - Number of levels per side
    pub async fn get_order_book(&self, contract: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        self.market().order_book(contract, None, limit, false).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.credentials.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(AccountEndpoints::new(self))
    }

    /// Get the futures account
    pub async fn get_account(&self) -> RestResult<FuturesAccount> {
        self.account()?.futures_account().await
    }

    /// Get all open positions
    pub async fn get_positions(&self) -> RestResult<Vec<Position>> {
        self.account()?.positions(Some(true)).await
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
    pub async fn create_order(&self, order: &CreateFuturesOrderRequest) -> RestResult<FuturesOrder> {
        self.trading()?.create_order(order).await
    }

    /// Cancel an order by id
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<FuturesOrder> {
        self.trading()?.cancel_order(order_id).await
    }
}

impl ExchangeClient for GateClient {
    fn name(&self) -> &'static str {
        crate::EXCHANGE
    }

    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path_prefix(&self) -> &str {
        API_PREFIX
    }

    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    fn signer(&self) -> &dyn Signer {
        &self.signer
    }

    /// Gate.io accepts signed public calls, and a keyed client always signs
    fn signs_public_requests(&self) -> bool {
        true
    }

    fn prepare(&self, request: &RestRequest) -> RestResult<PreparedRequest> {
        let mut prepared = request.prepare(API_PREFIX)?;
        if prepared.content_type.is_none() && prepared.method != Method::GET {
            prepared.content_type = Some(perp_rest::request::CONTENT_TYPE_JSON);
        }
        Ok(prepared)
    }

    fn parse_error(&self, status: u16, body: &str) -> Option<ExchangeError> {
        crate::error::parse_error(status, body)
    }
}

impl std::fmt::Debug for GateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateClient")
            .field("base_url", &self.base_url)
            .field("settle", &self.settle)
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
    /// Host override, e.g. the testnet or a mock server
    pub base_url: String,
    /// Settle currency for endpoint paths
    pub settle: Settle,
    /// Pre-built HTTP client; replaces `timeout` and `user_agent`
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            settle: Settle::Usdt,
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

    /// Set base URL; a trailing `/` is dropped
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set settle currency
    pub fn with_settle(mut self, settle: Settle) -> Self {
        self.settle = settle;
        self
    }

    /// Use an existing HTTP client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

/// Accept ids made of `[A-Za-z0-9_.-]` only
fn path_segment(id: &str) -> RestResult<&str> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'));
    if valid {
        Ok(id)
    } else {
        Err(RestError::InvalidParameter(format!("invalid path id: {:?}", id)))
    }
}
