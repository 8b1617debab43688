//! Typed REST client for Gate.io API v4 perpetual futures
//!
//! # Features
//!
//! - **Market Data**: Contracts, tickers, order book, trades, candlesticks, funding
//! - **Account**: Balances, positions, leverage, margin, dual mode, ledger
//! - **Trading**: Place, amend and cancel orders, fills, price-triggered orders
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA512 over the method, `/api/v4` path, query string, SHA-512 of the
//! body and a unix-seconds timestamp. A client holding credentials signs
//! public calls too.
//!
//! # Example
//!
//! ```no_run
//! use perp_gateio::{CreateFuturesOrderRequest, GateClient, HistoryQuery};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = GateClient::new()?;
//!     let book = client.get_order_book("BTC_USDT", Some(10)).await?;
//!     println!("BTC_USDT spread: {:?}", book.spread());
//!
//!     let trades = client.market().trades("BTC_USDT", &HistoryQuery::new().limit(20)).await?;
//!     println!("{} trades", trades.len());
//!
//!     // Private endpoints (auth required)
//!     let auth_client = GateClient::from_env()?;
//!     let order = CreateFuturesOrderRequest::limit("BTC_USDT", 1, Decimal::new(30000, 0))
//!         .post_only()
//!         .with_text("t-example");
//!     let placed = auth_client.create_order(&order).await?;
//!     auth_client.cancel_order(&placed.id.to_string()).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

/// Exchange name used in errors and logs
pub const EXCHANGE: &str = "gateio";

// Re-export main types
pub use client::{ClientConfig, GateClient, API_PREFIX, DEFAULT_BASE_URL};
pub use error::GateApiError;
pub use perp_rest::{CancellationToken, Credentials, ErrorCode, ExchangeError, RestError, RestResult};

pub use types::{
    // Market data
    BookLevel, Candlestick, Contract, ContractStats, FundingRate, InsuranceRecord, Liquidation,
    OrderBook, PremiumIndex, RiskLimitTier, Ticker, Trade,
    // Account
    AccountBookEntry, AccountHistory, FuturesAccount, Position, PositionClose, PositionCloseOrder,
    // Trading
    AmendOrder, AutoSize, CountdownCancelAll, CreateFuturesOrderRequest, CreatePriceOrderRequest,
    DualSide, FuturesOrder, MyTrade, OrderSide, OrderStatus, PriceOrderId, PriceTriggeredOrder,
    StpAction, TimeInForce, TriggerCondition, TriggerPriceType, TriggerRule, TriggeredOrderSpec,
    // Shared
    CandleQuery, HistoryQuery, Settle,
};
