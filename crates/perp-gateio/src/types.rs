//! Types for Gate.io futures requests and responses
//!
//! Prices and balances arrive as decimal strings. Fields that identify a
//! record are required; descriptive fields default when the exchange omits
//! them.

use perp_rest::Params;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Settle currency of a futures market
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Settle {
    /// USDT-margined perpetuals
    #[default]
    Usdt,
    /// BTC-margined perpetuals
    Btc,
}

impl Settle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usdt => "usdt",
            Self::Btc => "btc",
        }
    }
}

impl std::fmt::Display for Settle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Finished,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Good till cancelled
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Pending or cancelled (post only)
    Poc,
    /// Fill or kill
    Fok,
}

/// Self-trade prevention action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StpAction {
    /// Cancel newest
    Cn,
    /// Cancel oldest
    Co,
    /// Cancel both
    Cb,
}

/// Which side of a dual-mode position a close order targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSize {
    CloseLong,
    CloseShort,
}

/// Side of a dual-mode position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DualSide {
    DualLong,
    DualShort,
}

impl std::fmt::Display for DualSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DualLong => write!(f, "dual_long"),
            Self::DualShort => write!(f, "dual_short"),
        }
    }
}

/// Side filter for cancel-all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Bids only
    Bid,
    /// Asks only
    Ask,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// Trigger comparison, sent as an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TriggerRule {
    /// Fire when price >= trigger price
    GreaterOrEqual,
    /// Fire when price <= trigger price
    LessOrEqual,
}

impl From<TriggerRule> for u8 {
    fn from(rule: TriggerRule) -> Self {
        match rule {
            TriggerRule::GreaterOrEqual => 1,
            TriggerRule::LessOrEqual => 2,
        }
    }
}

impl TryFrom<u8> for TriggerRule {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::GreaterOrEqual),
            2 => Ok(Self::LessOrEqual),
            other => Err(format!("unknown trigger rule {}", other)),
        }
    }
}

/// Price source a trigger watches, sent as an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TriggerPriceType {
    #[default]
    Last,
    Mark,
    Index,
}

impl From<TriggerPriceType> for u8 {
    fn from(kind: TriggerPriceType) -> Self {
        match kind {
            TriggerPriceType::Last => 0,
            TriggerPriceType::Mark => 1,
            TriggerPriceType::Index => 2,
        }
    }
}

impl TryFrom<u8> for TriggerPriceType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Last),
            1 => Ok(Self::Mark),
            2 => Ok(Self::Index),
            other => Err(format!("unknown trigger price type {}", other)),
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Paging and time window shared by history endpoints
///
/// Only the fields that are set are sent. Each endpoint documents which of
/// them the exchange honours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub last_id: Option<String>,
    /// Start time, unix seconds
    pub from: Option<i64>,
    /// End time, unix seconds
    pub to: Option<i64>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn last_id(mut self, last_id: impl Into<String>) -> Self {
        self.last_id = Some(last_id.into());
        self
    }

    pub fn range(mut self, from: i64, to: i64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params
            .insert_opt("limit", self.limit)
            .insert_opt("offset", self.offset)
            .insert_opt("last_id", self.last_id.as_deref())
            .insert_opt("from", self.from)
            .insert_opt("to", self.to);
    }
}

/// Interval and window for candle-shaped endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandleQuery {
    /// e.g. `1m`, `5m`, `1h`, `1d`
    pub interval: Option<String>,
    pub limit: Option<u32>,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl CandleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn range(mut self, from: i64, to: i64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params
            .insert_opt("interval", self.interval.as_deref())
            .insert_opt("limit", self.limit)
            .insert_opt("from", self.from)
            .insert_opt("to", self.to);
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Futures contract specification
#[derive(Debug, Clone, Deserialize)]
pub struct Contract {
    /// Contract name, e.g. `BTC_USDT`
    pub name: String,
    #[serde(rename = "type", default)]
    pub contract_type: String,
    #[serde(default)]
    pub quanto_multiplier: String,
    #[serde(default)]
    pub leverage_min: String,
    #[serde(default)]
    pub leverage_max: String,
    #[serde(default)]
    pub maintenance_rate: String,
    #[serde(default)]
    pub mark_type: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub index_price: String,
    #[serde(default)]
    pub last_price: String,
    #[serde(default)]
    pub maker_fee_rate: String,
    #[serde(default)]
    pub taker_fee_rate: String,
    #[serde(default)]
    pub order_price_round: String,
    #[serde(default)]
    pub mark_price_round: String,
    #[serde(default)]
    pub funding_rate: String,
    #[serde(default)]
    pub funding_rate_indicative: String,
    /// Seconds between funding settlements
    #[serde(default)]
    pub funding_interval: i64,
    #[serde(default)]
    pub funding_next_apply: f64,
    #[serde(default)]
    pub funding_cap_ratio: String,
    #[serde(default)]
    pub funding_offset: i64,
    #[serde(default)]
    pub funding_impact_value: String,
    #[serde(default)]
    pub interest_rate: String,
    #[serde(default)]
    pub risk_limit_base: String,
    #[serde(default)]
    pub risk_limit_step: String,
    #[serde(default)]
    pub risk_limit_max: String,
    #[serde(default)]
    pub order_size_min: i64,
    #[serde(default)]
    pub order_size_max: i64,
    #[serde(default)]
    pub order_price_deviate: String,
    #[serde(default)]
    pub ref_discount_rate: String,
    #[serde(default)]
    pub ref_rebate_rate: String,
    #[serde(default)]
    pub orderbook_id: i64,
    #[serde(default)]
    pub trade_id: i64,
    #[serde(default)]
    pub trade_size: i64,
    #[serde(default)]
    pub position_size: i64,
    #[serde(default)]
    pub long_users: i64,
    #[serde(default)]
    pub short_users: i64,
    #[serde(default)]
    pub orders_limit: i64,
    #[serde(default)]
    pub config_change_time: f64,
    #[serde(default)]
    pub create_time: f64,
    #[serde(default)]
    pub in_delisting: bool,
    #[serde(default)]
    pub enable_bonus: bool,
    #[serde(default)]
    pub enable_credit: bool,
    #[serde(default)]
    pub is_pre_market: bool,
    #[serde(default)]
    pub cross_leverage_default: String,
    #[serde(default)]
    pub voucher_leverage: String,
}

impl Contract {
    /// Last traded price
    pub fn last(&self) -> Option<Decimal> {
        self.last_price.parse().ok()
    }

    /// Mark price
    pub fn mark(&self) -> Option<Decimal> {
        self.mark_price.parse().ok()
    }

    /// Value of one contract in the base currency
    pub fn multiplier(&self) -> Option<Decimal> {
        self.quanto_multiplier.parse().ok()
    }
}

/// Contract statistics sample
#[derive(Debug, Clone, Deserialize)]
pub struct ContractStats {
    /// Sample time, unix seconds
    pub time: i64,
    #[serde(default)]
    pub lsr_taker: f64,
    #[serde(default)]
    pub lsr_account: f64,
    #[serde(default)]
    pub long_liq_size: i64,
    #[serde(default)]
    pub long_liq_amount: f64,
    #[serde(default)]
    pub long_liq_usd: f64,
    #[serde(default)]
    pub short_liq_size: i64,
    #[serde(default)]
    pub short_liq_amount: f64,
    #[serde(default)]
    pub short_liq_usd: f64,
    #[serde(default)]
    pub open_interest: i64,
    #[serde(default)]
    pub open_interest_usd: f64,
    #[serde(default)]
    pub top_lsr_account: f64,
    #[serde(default)]
    pub top_lsr_size: f64,
    #[serde(default)]
    pub long_taker_size: i64,
    #[serde(default)]
    pub short_taker_size: i64,
    #[serde(default)]
    pub mark_price: Option<Decimal>,
}

/// Order book level
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookLevel {
    /// Price
    #[serde(rename = "p")]
    pub price: Decimal,
    /// Size in contracts
    #[serde(rename = "s")]
    pub size: i64,
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Book id, present when requested with `with_id`
    #[serde(default)]
    pub id: Option<i64>,
    /// Response time, unix seconds with fraction
    #[serde(default)]
    pub current: f64,
    /// Last book change, unix seconds with fraction
    #[serde(default)]
    pub update: f64,
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
    /// Contract the book was requested for; filled in by the client
    #[serde(default)]
    pub contract: String,
}

impl OrderBook {
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|level| level.price)
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|level| level.price)
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Public trade
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub id: i64,
    /// Trade time, unix seconds with fraction
    pub create_time: f64,
    #[serde(default)]
    pub contract: String,
    /// Positive for buys, negative for sells
    pub size: i64,
    pub price: Decimal,
    #[serde(default)]
    pub is_internal: bool,
}

/// Candlestick
#[derive(Debug, Clone, Deserialize)]
pub struct Candlestick {
    /// Open time, unix seconds
    pub t: i64,
    /// Volume in contracts
    #[serde(default)]
    pub v: Option<i64>,
    pub o: Decimal,
    pub h: Decimal,
    pub l: Decimal,
    pub c: Decimal,
    /// Traded value in the quote currency
    #[serde(default)]
    pub sum: Option<Decimal>,
}

/// Premium index candle
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumIndex {
    /// Open time, unix seconds
    pub t: i64,
    pub o: Decimal,
    pub h: Decimal,
    pub l: Decimal,
    pub c: Decimal,
}

/// 24h ticker
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub contract: String,
    #[serde(default)]
    pub last: String,
    #[serde(default)]
    pub change_percentage: String,
    #[serde(default)]
    pub total_size: String,
    #[serde(default)]
    pub low_24h: String,
    #[serde(default)]
    pub high_24h: String,
    #[serde(default)]
    pub volume_24h: String,
    #[serde(default)]
    pub volume_24h_btc: String,
    #[serde(default)]
    pub volume_24h_usd: String,
    #[serde(default)]
    pub volume_24h_base: String,
    #[serde(default)]
    pub volume_24h_quote: String,
    #[serde(default)]
    pub volume_24h_settle: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub funding_rate: String,
    #[serde(default)]
    pub funding_rate_indicative: String,
    #[serde(default)]
    pub index_price: String,
    #[serde(default)]
    pub quanto_base_rate: Option<String>,
    #[serde(default)]
    pub highest_bid: Option<String>,
    #[serde(default)]
    pub lowest_ask: Option<String>,
}

impl Ticker {
    pub fn last_price(&self) -> Option<Decimal> {
        self.last.parse().ok()
    }

    pub fn mark(&self) -> Option<Decimal> {
        self.mark_price.parse().ok()
    }

    pub fn funding(&self) -> Option<Decimal> {
        self.funding_rate.parse().ok()
    }

    pub fn bid_price(&self) -> Option<Decimal> {
        self.highest_bid.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn ask_price(&self) -> Option<Decimal> {
        self.lowest_ask.as_deref().and_then(|s| s.parse().ok())
    }

    /// Average of best bid and best ask
    pub fn mid_price(&self) -> Option<Decimal> {
        let ask = self.ask_price()?;
        let bid = self.bid_price()?;
        Some((ask + bid) / Decimal::TWO)
    }
}

/// Funding rate history entry
#[derive(Debug, Clone, Deserialize)]
pub struct FundingRate {
    /// Unix seconds
    pub t: i64,
    /// Rate
    pub r: Decimal,
}

/// Insurance fund balance entry
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceRecord {
    /// Unix seconds
    pub t: i64,
    /// Fund balance
    #[serde(rename = "b", alias = "d")]
    pub balance: Decimal,
}

/// Liquidation record
#[derive(Debug, Clone, Deserialize)]
pub struct Liquidation {
    /// Unix seconds
    pub time: i64,
    pub contract: String,
    pub size: i64,
    #[serde(default)]
    pub leverage: String,
    #[serde(default)]
    pub margin: String,
    #[serde(default)]
    pub entry_price: String,
    #[serde(default)]
    pub liq_price: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub order_id: i64,
    #[serde(default)]
    pub order_price: String,
    #[serde(default)]
    pub fill_price: String,
    #[serde(default)]
    pub left: i64,
}

/// Risk limit tier
#[derive(Debug, Clone, Deserialize)]
pub struct RiskLimitTier {
    pub tier: i64,
    pub risk_limit: String,
    #[serde(default)]
    pub initial_rate: String,
    #[serde(default)]
    pub maintenance_rate: String,
    #[serde(default)]
    pub leverage_max: String,
    #[serde(default)]
    pub contract: Option<String>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Futures account
#[derive(Debug, Clone, Deserialize)]
pub struct FuturesAccount {
    pub currency: String,
    #[serde(default)]
    pub user: i64,
    pub total: Decimal,
    #[serde(default)]
    pub unrealised_pnl: String,
    #[serde(default)]
    pub position_margin: String,
    #[serde(default)]
    pub order_margin: String,
    pub available: Decimal,
    #[serde(default)]
    pub point: String,
    #[serde(default)]
    pub bonus: String,
    #[serde(default)]
    pub in_dual_mode: bool,
    #[serde(default)]
    pub enable_credit: bool,
    #[serde(default)]
    pub position_initial_margin: String,
    #[serde(default)]
    pub maintenance_margin: String,
    #[serde(default)]
    pub history: AccountHistory,
}

impl FuturesAccount {
    pub fn unrealised(&self) -> Option<Decimal> {
        self.unrealised_pnl.parse().ok()
    }
}

/// Cumulative account statistics
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountHistory {
    pub dnw: String,
    pub pnl: String,
    pub fee: String,
    pub refr: String,
    pub fund: String,
    pub point_dnw: String,
    pub point_fee: String,
    pub point_refr: String,
    pub bonus_dnw: String,
    pub bonus_offset: String,
}

/// Futures position
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub contract: String,
    /// Signed size in contracts, negative when short
    pub size: i64,
    #[serde(default)]
    pub user: i64,
    #[serde(default)]
    pub leverage: String,
    #[serde(default)]
    pub risk_limit: String,
    #[serde(default)]
    pub leverage_max: String,
    #[serde(default)]
    pub maintenance_rate: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub margin: String,
    #[serde(default)]
    pub entry_price: String,
    #[serde(default)]
    pub liq_price: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub initial_margin: String,
    #[serde(default)]
    pub maintenance_margin: String,
    #[serde(default)]
    pub unrealised_pnl: String,
    #[serde(default)]
    pub realised_pnl: String,
    #[serde(default)]
    pub history_pnl: String,
    #[serde(default)]
    pub last_close_pnl: String,
    #[serde(default)]
    pub realised_point: String,
    #[serde(default)]
    pub history_point: String,
    #[serde(default)]
    pub adl_ranking: i64,
    #[serde(default)]
    pub pending_orders: i64,
    #[serde(default)]
    pub close_order: Option<PositionCloseOrder>,
    /// `single`, `dual_long` or `dual_short`
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub cross_leverage_limit: String,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.size == 0
    }

    pub fn entry(&self) -> Option<Decimal> {
        self.entry_price.parse().ok()
    }

    pub fn liquidation(&self) -> Option<Decimal> {
        self.liq_price.parse().ok()
    }

    pub fn unrealised(&self) -> Option<Decimal> {
        self.unrealised_pnl.parse().ok()
    }
}

/// Pending close order attached to a position
#[derive(Debug, Clone, Deserialize)]
pub struct PositionCloseOrder {
    pub id: i64,
    pub price: String,
    #[serde(default)]
    pub is_liq: bool,
}

/// Account ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBookEntry {
    pub time: f64,
    pub change: Decimal,
    pub balance: Decimal,
    /// `dnw`, `pnl`, `fee`, `refr`, `fund`, ...
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub trade_id: String,
}

/// Closed position record
#[derive(Debug, Clone, Deserialize)]
pub struct PositionClose {
    pub time: f64,
    pub contract: String,
    /// `long` or `short`
    pub side: String,
    pub pnl: Decimal,
    #[serde(default)]
    pub text: String,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Futures order as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct FuturesOrder {
    pub id: i64,
    pub contract: String,
    /// Signed size, negative for sells
    pub size: i64,
    /// `open` or `finished`
    pub status: String,
    #[serde(default)]
    pub user: i64,
    #[serde(default)]
    pub create_time: f64,
    #[serde(default)]
    pub finish_time: Option<f64>,
    #[serde(default)]
    pub finish_as: Option<String>,
    #[serde(default)]
    pub iceberg: i64,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub close: bool,
    #[serde(default)]
    pub is_close: bool,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub is_reduce_only: bool,
    #[serde(default)]
    pub is_liq: bool,
    #[serde(default)]
    pub tif: String,
    #[serde(default)]
    pub left: i64,
    #[serde(default)]
    pub fill_price: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tkfr: String,
    #[serde(default)]
    pub mkfr: String,
    #[serde(default)]
    pub refu: i64,
    #[serde(default)]
    pub auto_size: Option<String>,
    #[serde(default)]
    pub stp_act: Option<String>,
    #[serde(default)]
    pub stp_id: Option<i64>,
}

impl FuturesOrder {
    pub fn is_open(&self) -> bool {
        self.status == "open"
    }

    /// Contracts filled so far
    pub fn filled(&self) -> i64 {
        self.size.abs() - self.left.abs()
    }

    pub fn average_fill(&self) -> Option<Decimal> {
        self.fill_price.parse().ok()
    }
}

/// Request to place a futures order
///
/// `size` is signed: positive buys, negative sells. Market orders are sent
/// with price `0` and `ioc`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFuturesOrderRequest {
    pub contract: String,
    pub size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub close: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reduce_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tif: Option<TimeInForce>,
    /// Client tag, must start with `t-`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_size: Option<AutoSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_act: Option<StpAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stp_id: Option<i64>,
}

impl CreateFuturesOrderRequest {
    fn base(contract: impl Into<String>, size: i64) -> Self {
        Self {
            contract: contract.into(),
            size,
            iceberg: None,
            price: None,
            close: false,
            reduce_only: false,
            tif: None,
            text: None,
            auto_size: None,
            stp_act: None,
            stp_id: None,
        }
    }

    /// Create a limit order
    pub fn limit(contract: impl Into<String>, size: i64, price: Decimal) -> Self {
        let mut order = Self::base(contract, size);
        order.price = Some(price);
        order.tif = Some(TimeInForce::Gtc);
        order
    }

    /// Create a market order
    pub fn market(contract: impl Into<String>, size: i64) -> Self {
        let mut order = Self::base(contract, size);
        order.price = Some(Decimal::ZERO);
        order.tif = Some(TimeInForce::Ioc);
        order
    }

    /// Close the whole single-mode position at market
    pub fn close_position(contract: impl Into<String>) -> Self {
        let mut order = Self::market(contract, 0);
        order.close = true;
        order
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.tif = Some(tif);
        self
    }

    /// Maker only
    pub fn post_only(self) -> Self {
        self.with_time_in_force(TimeInForce::Poc)
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    pub fn with_iceberg(mut self, display_size: i64) -> Self {
        self.iceberg = Some(display_size);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_auto_size(mut self, auto_size: AutoSize) -> Self {
        self.auto_size = Some(auto_size);
        self
    }

    pub fn with_stp(mut self, action: StpAction, id: i64) -> Self {
        self.stp_act = Some(action);
        self.stp_id = Some(id);
        self
    }
}

/// Personal fill
#[derive(Debug, Clone, Deserialize)]
pub struct MyTrade {
    pub id: i64,
    pub create_time: f64,
    pub contract: String,
    #[serde(default)]
    pub order_id: String,
    pub size: i64,
    pub price: Decimal,
    /// `taker` or `maker`
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub fee: String,
    #[serde(default)]
    pub point_fee: String,
}

/// Amendment of an open order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmendOrder {
    pub size: Option<i64>,
    pub price: Option<Decimal>,
    pub amend_text: Option<String>,
}

impl AmendOrder {
    pub fn size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.amend_text = Some(text.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with_opt("size", self.size)
            .with_opt("price", self.price)
            .with_opt("amend_text", self.amend_text.as_deref())
    }
}

// ============================================================================
// Price-Triggered Orders
// ============================================================================

/// Order placed once a trigger fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredOrderSpec {
    pub contract: String,
    /// Signed size; 0 with `close` to close the position
    #[serde(default)]
    pub size: i64,
    /// `0` for market
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub close: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tif: Option<TimeInForce>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reduce_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_size: Option<String>,
    #[serde(default, skip_serializing)]
    pub is_reduce_only: bool,
    #[serde(default, skip_serializing)]
    pub is_close: bool,
}

/// Trigger condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCondition {
    #[serde(default)]
    pub price_type: TriggerPriceType,
    pub price: Decimal,
    pub rule: TriggerRule,
    /// Seconds until the trigger expires, 0 for never
    #[serde(default)]
    pub expiration: i64,
}

/// Request to create a price-triggered order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePriceOrderRequest {
    pub initial: TriggeredOrderSpec,
    pub trigger: TriggerCondition,
    /// e.g. `close-long-order`, `plan-close-short-position`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<String>,
}

impl CreatePriceOrderRequest {
    /// Place `size` contracts at `price` (0 for market) once `rule` holds
    pub fn new(
        contract: impl Into<String>,
        size: i64,
        price: Decimal,
        trigger_price: Decimal,
        rule: TriggerRule,
    ) -> Self {
        Self {
            initial: TriggeredOrderSpec {
                contract: contract.into(),
                size,
                price,
                close: false,
                tif: if price.is_zero() {
                    Some(TimeInForce::Ioc)
                } else {
                    Some(TimeInForce::Gtc)
                },
                text: None,
                reduce_only: false,
                auto_size: None,
                is_reduce_only: false,
                is_close: false,
            },
            trigger: TriggerCondition {
                price_type: TriggerPriceType::Last,
                price: trigger_price,
                rule,
                expiration: 0,
            },
            order_type: None,
        }
    }

    pub fn with_price_type(mut self, price_type: TriggerPriceType) -> Self {
        self.trigger.price_type = price_type;
        self
    }

    pub fn with_expiration(mut self, seconds: i64) -> Self {
        self.trigger.expiration = seconds;
        self
    }

    pub fn reduce_only(mut self) -> Self {
        self.initial.reduce_only = true;
        self
    }

    pub fn with_order_type(mut self, order_type: impl Into<String>) -> Self {
        self.order_type = Some(order_type.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.initial.text = Some(text.into());
        self
    }
}

/// Id of a newly created price-triggered order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceOrderId {
    pub id: i64,
}

/// Price-triggered order
#[derive(Debug, Clone, Deserialize)]
pub struct PriceTriggeredOrder {
    pub id: i64,
    pub initial: TriggeredOrderSpec,
    pub trigger: TriggerCondition,
    /// `open`, `finished`, `inactive`, `invalid`
    pub status: String,
    #[serde(default)]
    pub user: i64,
    #[serde(default)]
    pub create_time: f64,
    #[serde(default)]
    pub finish_time: f64,
    #[serde(default)]
    pub trade_id: i64,
    #[serde(default)]
    pub finish_as: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub order_type: String,
    #[serde(default)]
    pub me_order_id: i64,
}

/// Dead man's switch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownCancelAll {
    /// Seconds until all orders are cancelled, 0 to disarm
    pub timeout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
}
