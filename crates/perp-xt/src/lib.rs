//! Typed REST client for XT.com perpetual futures
//!
//! # Features
//!
//! - **Market Data**: Symbols, tickers, depth, deals, klines, funding, open interest
//! - **Account**: Balances, ledger, positions, leverage, margin, watch list
//! - **Trading**: Orders, plan orders, take-profit / stop-loss, track orders
//!
//! USDT-margined and coin-margined contracts live on separate hosts; pick one
//! with [`Underlying`].
//!
//! # Authentication
//!
//! Private endpoints require API credentials. Requests are signed with
//! HMAC-SHA256 over `validate-appkey=..&validate-timestamp=..#path`, followed
//! by `#query` for GET/DELETE and `#body` when there is one. Public calls are
//! sent unsigned.
//!
//! # Responses
//!
//! Every response is wrapped in `{returnCode, msgInfo, error, result}`. The
//! client returns `result`; a non-zero `returnCode` becomes
//! [`RestError::Exchange`] even on HTTP 200.
//!
//! # Example
//!
//! ```no_run
//! use perp_xt::{KlineQuery, OrderSide, PlaceOrderRequest, PositionSide, XtClient};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = XtClient::new()?;
//!     let ticker = client.get_ticker("btc_usdt").await?;
//!     println!("btc_usdt last: {}", ticker.close);
//!
//!     let klines = client.market().klines("btc_usdt", &KlineQuery::new("1h").limit(24)).await?;
//!     println!("{} klines", klines.len());
//!
//!     // Private endpoints (auth required)
//!     let auth_client = XtClient::from_env()?;
//!     let order = PlaceOrderRequest::limit(
//!         "btc_usdt",
//!         OrderSide::Buy,
//!         PositionSide::Long,
//!         Decimal::ONE,
//!         Decimal::new(30000, 0),
//!     )
//!     .post_only();
//!     let placed = auth_client.place_order(&order).await?;
//!     println!("placed {:?}", placed.as_deref());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

/// Exchange name used in errors and logs
pub const EXCHANGE: &str = "xt";

// Re-export main types
pub use client::{ClientConfig, XtClient, DEFAULT_COIN_BASE_URL, DEFAULT_USDT_BASE_URL};
pub use error::XtResponse;
pub use perp_rest::{CancellationToken, Credentials, ErrorCode, ExchangeError, RestError, RestResult};

pub use types::{
    // Market data
    AggTicker, BookTicker, ClientIp, Contract, Deal, Depth, DepthLevel, FundingRate,
    FundingRateRecord, Kline, LeverageBracket, LeverageDetail, OpenInterest, PriceTick,
    RiskBalance, SymbolList, Ticker,
    // Account
    AccountInfo, AdlQuantile, Balance, BalanceBill, BreakPosition, CompatBalance, FundingFee,
    ListenKey, Position, StepRate,
    // Trading
    CreatePlanOrderRequest, CreateProfitStopRequest, CreateTrackOrderRequest, EntityId,
    EntrustListQuery, Fill, FillQuery, Order, OrderListQuery, PlaceOrderRequest, PlanOrder,
    ProfitStop, TrackOrder, UpdateOrderRequest, UpdateProfitStopRequest,
    // Enums
    Direction, EntrustType, MarginAdjust, OrderSide, OrderType, PositionSide, PositionType,
    TimeInForce, TrackCallback, TriggerPriceType, Underlying,
    // Shared
    Cursor, CursorQuery, KlineQuery, Page, PageQuery,
};
