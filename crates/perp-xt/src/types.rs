//! Types for XT.com futures requests and responses
//!
//! Field names follow the exchange's camelCase JSON. Prices and quantities
//! arrive as decimal strings; nullable fields are `Option`.

use perp_rest::{Params, RestError, RestResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Enums
// ============================================================================

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Order side
    pub enum OrderSide {
        Buy => "BUY",
        Sell => "SELL",
    }
}

wire_enum! {
    /// Order type
    pub enum OrderType {
        Limit => "LIMIT",
        Market => "MARKET",
    }
}

wire_enum! {
    /// Position direction
    pub enum PositionSide {
        Long => "LONG",
        Short => "SHORT",
        /// One-way mode, track orders only
        Both => "BOTH",
    }
}

wire_enum! {
    /// Time in force
    pub enum TimeInForce {
        /// Good till cancelled
        Gtc => "GTC",
        /// Immediate or cancel
        Ioc => "IOC",
        /// Fill or kill
        Fok => "FOK",
        /// Post only
        Gtx => "GTX",
    }
}

wire_enum! {
    /// Price source a trigger watches
    pub enum TriggerPriceType {
        IndexPrice => "INDEX_PRICE",
        MarkPrice => "MARK_PRICE",
        LatestPrice => "LATEST_PRICE",
    }
}

wire_enum! {
    /// Plan (trigger) order type
    pub enum EntrustType {
        /// Limit order once take-profit triggers
        TakeProfit => "TAKE_PROFIT",
        /// Limit order once stop triggers
        Stop => "STOP",
        TakeProfitMarket => "TAKE_PROFIT_MARKET",
        StopMarket => "STOP_MARKET",
    }
}

impl EntrustType {
    /// Limit entrust types place a priced order once triggered
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::TakeProfit | Self::Stop)
    }
}

wire_enum! {
    /// Margin mode of a position
    pub enum PositionType {
        Crossed => "CROSSED",
        Isolated => "ISOLATED",
    }
}

wire_enum! {
    /// Position margin adjustment
    pub enum MarginAdjust {
        Add => "ADD",
        Sub => "SUB",
    }
}

wire_enum! {
    /// Paging direction of cursor endpoints
    pub enum Direction {
        Next => "NEXT",
        Prev => "PREV",
    }
}

wire_enum! {
    /// Trailing distance of a track order
    pub enum TrackCallback {
        Fixed => "FIXED",
        Proportion => "PROPORTION",
    }
}

/// Contract family, each served from its own host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Underlying {
    /// USDT-margined, `fapi.xt.com`
    #[default]
    UsdtMargined,
    /// Coin-margined, `dapi.xt.com`
    CoinMargined,
}

// ============================================================================
// Pagination
// ============================================================================

/// Page-numbered listing
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    /// Page size
    #[serde(default)]
    pub ps: u32,
    #[serde(default)]
    pub total: u64,
}

/// Cursor-paged listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Cursor<T> {
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Page and time window of page-numbered endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Start time, unix milliseconds
    pub start_time: Option<i64>,
    /// End time, unix milliseconds
    pub end_time: Option<i64>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params
            .insert_opt("page", self.page)
            .insert_opt("size", self.size)
            .insert_opt("startTime", self.start_time)
            .insert_opt("endTime", self.end_time);
    }
}

/// Cursor and time window of cursor-paged endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorQuery {
    pub direction: Option<Direction>,
    /// Anchor record id
    pub id: Option<i64>,
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

impl CursorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from `id` in `direction`
    pub fn from_id(mut self, id: i64, direction: Direction) -> Self {
        self.id = Some(id);
        self.direction = Some(direction);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params
            .insert_opt("direction", self.direction)
            .insert_opt("id", self.id)
            .insert_opt("limit", self.limit)
            .insert_opt("startTime", self.start_time)
            .insert_opt("endTime", self.end_time);
    }
}

/// Interval and window for klines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KlineQuery {
    /// e.g. `1m`, `5m`, `1h`, `1d`
    pub interval: String,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
}

impl KlineQuery {
    pub fn new(interval: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub(crate) fn apply(&self, params: &mut Params) {
        params
            .insert("interval", &self.interval)
            .insert_opt("startTime", self.start_time)
            .insert_opt("endTime", self.end_time)
            .insert_opt("limit", self.limit);
    }
}

/// Identifier returned by create calls
///
/// The exchange answers with a string, a number or an empty object depending
/// on the endpoint; anything other than a string or number maps to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct EntityId(pub Option<String>);

impl From<Value> for EntityId {
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) if !id.is_empty() => Self(Some(id)),
            Value::Number(id) => Self(Some(id.to_string())),
            _ => Self(None),
        }
    }
}

impl EntityId {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Caller address as seen by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct ClientIp {
    pub ip: String,
}

/// Contract configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i64,
    /// Lower-case symbol, e.g. `btc_usdt`
    pub symbol: String,
    #[serde(default)]
    pub contract_type: String,
    #[serde(default)]
    pub underlying_type: String,
    #[serde(default)]
    pub contract_size: Decimal,
    #[serde(default)]
    pub trade_switch: bool,
    #[serde(default)]
    pub open_switch: bool,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub init_leverage: u32,
    #[serde(default)]
    pub init_position_type: String,
    #[serde(default)]
    pub base_coin: String,
    #[serde(default)]
    pub quote_coin: String,
    #[serde(default)]
    pub price_precision: u32,
    #[serde(default)]
    pub quantity_precision: u32,
    #[serde(default)]
    pub min_qty: Decimal,
    #[serde(default)]
    pub min_notional: Decimal,
    #[serde(default)]
    pub max_notional: Decimal,
    #[serde(default)]
    pub min_step_price: Decimal,
    #[serde(default)]
    pub maker_fee: Decimal,
    #[serde(default)]
    pub taker_fee: Decimal,
    /// Comma-separated, e.g. `LIMIT,MARKET`
    #[serde(default)]
    pub support_order_type: String,
    #[serde(default)]
    pub support_time_in_force: String,
    #[serde(default)]
    pub support_entrust_type: String,
    #[serde(default)]
    pub support_position_type: String,
    #[serde(default)]
    pub max_open_orders: u32,
    #[serde(default)]
    pub max_entrusts: u32,
    #[serde(default)]
    pub onboard_date: i64,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Symbol list of the v3 market endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolList {
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub version: String,
    pub symbols: Vec<Contract>,
}

/// One leverage tier
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageBracket {
    pub bracket: u32,
    #[serde(default)]
    pub symbol: String,
    pub maint_margin_rate: Decimal,
    pub max_leverage: Decimal,
    #[serde(default)]
    pub min_leverage: Decimal,
    pub max_nominal_value: Decimal,
    #[serde(default)]
    pub start_margin_rate: Decimal,
    #[serde(default)]
    pub max_start_margin_rate: Decimal,
}

/// Leverage tiers of a symbol
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageDetail {
    pub symbol: String,
    #[serde(default)]
    pub leverage_brackets: Vec<LeverageBracket>,
}

/// 24h ticker
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    /// Quote volume
    #[serde(rename = "a", default)]
    pub amount: Decimal,
    /// Base volume
    #[serde(rename = "v", default)]
    pub volume: Decimal,
    /// 24h change ratio
    #[serde(rename = "r", default)]
    pub change: Decimal,
}

/// Public trade
#[derive(Debug, Clone, Deserialize)]
pub struct Deal {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "p")]
    pub price: Decimal,
    #[serde(rename = "a")]
    pub amount: Decimal,
    /// Taker side, `BID` or `ASK`
    #[serde(rename = "m", default)]
    pub side: String,
}

/// Depth level as `[price, quantity]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DepthLevel(pub Decimal, pub Decimal);

impl DepthLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn quantity(&self) -> Decimal {
        self.1
    }
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "u", default)]
    pub update_id: i64,
    #[serde(rename = "a", default)]
    pub asks: Vec<DepthLevel>,
    #[serde(rename = "b", default)]
    pub bids: Vec<DepthLevel>,
}

impl Depth {
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(DepthLevel::price)
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(DepthLevel::price)
    }

    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Index or mark price
#[derive(Debug, Clone, Deserialize)]
pub struct PriceTick {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "p")]
    pub price: Decimal,
}

/// Candlestick
#[derive(Debug, Clone, Deserialize)]
pub struct Kline {
    #[serde(rename = "s", default)]
    pub symbol: String,
    /// Open time, unix milliseconds
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "a", default)]
    pub amount: Decimal,
    #[serde(rename = "v", default)]
    pub volume: Decimal,
}

/// Ticker with index, mark and top of book
#[derive(Debug, Clone, Deserialize)]
pub struct AggTicker {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "o", default)]
    pub open: Decimal,
    #[serde(rename = "h", default)]
    pub high: Decimal,
    #[serde(rename = "l", default)]
    pub low: Decimal,
    #[serde(rename = "a", default)]
    pub amount: Decimal,
    #[serde(rename = "v", default)]
    pub volume: Decimal,
    #[serde(rename = "r", default)]
    pub change: Decimal,
    #[serde(rename = "i")]
    pub index_price: Option<Decimal>,
    #[serde(rename = "m")]
    pub mark_price: Option<Decimal>,
    #[serde(rename = "bp")]
    pub bid_price: Option<Decimal>,
    #[serde(rename = "ap")]
    pub ask_price: Option<Decimal>,
}

/// Current funding rate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    pub symbol: String,
    pub funding_rate: Decimal,
    pub next_collection_time: Option<i64>,
    /// Hours between collections
    pub collection_internal: Option<u32>,
}

/// Historical funding rate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateRecord {
    pub id: String,
    pub symbol: String,
    pub funding_rate: Decimal,
    pub created_time: i64,
}

/// Best bid and ask
#[derive(Debug, Clone, Deserialize)]
pub struct BookTicker {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "t")]
    pub time: i64,
    #[serde(rename = "ap")]
    pub ask_price: Decimal,
    #[serde(rename = "aq")]
    pub ask_qty: Decimal,
    #[serde(rename = "bp")]
    pub bid_price: Decimal,
    #[serde(rename = "bq")]
    pub bid_qty: Decimal,
}

impl BookTicker {
    pub fn mid_price(&self) -> Decimal {
        (self.ask_price + self.bid_price) / Decimal::TWO
    }
}

/// Risk fund balance entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBalance {
    pub id: String,
    pub coin: String,
    pub amount: Decimal,
    pub created_time: i64,
}

/// Open interest
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterest {
    pub symbol: String,
    pub open_interest: Decimal,
    #[serde(default)]
    pub open_interest_usd: Decimal,
    pub time: i64,
}

// ============================================================================
// Account Types
// ============================================================================

/// Futures account flags
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub allow_open_position: bool,
    #[serde(default)]
    pub allow_trade: bool,
    #[serde(default)]
    pub allow_transfer: bool,
    /// Opening time; a string or a number depending on the account
    #[serde(default)]
    pub open_time: Value,
    #[serde(default)]
    pub state: i32,
}

/// Key for the private websocket stream
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    pub listen_key: String,
}

/// Balance of one coin
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin: String,
    pub wallet_balance: Decimal,
    pub available_balance: Decimal,
    #[serde(default)]
    pub isolated_margin: Decimal,
    #[serde(default)]
    pub crossed_margin: Decimal,
    #[serde(default)]
    pub open_order_margin_frozen: Decimal,
    #[serde(default)]
    pub bonus: Decimal,
    #[serde(default)]
    pub coupon: Decimal,
}

/// Balance of one coin as reported by the compatibility listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatBalance {
    #[serde(default)]
    pub account_id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub coin: String,
    /// 1 for coin-margined, 2 for USDT-margined
    #[serde(default)]
    pub underlying_type: u8,
    pub wallet_balance: Decimal,
    #[serde(default)]
    pub open_order_margin_frozen: Decimal,
    #[serde(default)]
    pub isolated_margin: Decimal,
    #[serde(default)]
    pub crossed_margin: Decimal,
    /// Net asset balance
    #[serde(default)]
    pub amount: Decimal,
    /// Margin balance
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub convert_btc_amount: Decimal,
    #[serde(default)]
    pub convert_usdt_amount: Decimal,
    #[serde(default)]
    pub profit: Decimal,
    #[serde(default)]
    pub not_profit: Decimal,
    #[serde(default)]
    pub bonus: Decimal,
    #[serde(default)]
    pub coupon: Decimal,
}

impl CompatBalance {
    pub fn underlying(&self) -> Option<Underlying> {
        match self.underlying_type {
            1 => Some(Underlying::CoinMargined),
            2 => Some(Underlying::UsdtMargined),
            _ => None,
        }
    }
}

/// Ledger entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBill {
    pub id: i64,
    pub coin: String,
    #[serde(default)]
    pub symbol: String,
    /// `EXCHANGE`, `CLOSE_POSITION`, `FUND`, `FEE`, `ADL`, ...
    #[serde(rename = "type")]
    pub bill_type: String,
    /// `ADD` or `SUB`
    pub side: String,
    pub amount: Decimal,
    #[serde(default)]
    pub after_amount: Decimal,
    pub created_time: i64,
}

/// Funding fee paid or received
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingFee {
    pub id: i64,
    pub symbol: String,
    pub coin: String,
    /// Fee amount
    pub cast: Decimal,
    pub position_side: String,
    pub created_time: i64,
}

/// Position
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub position_side: PositionSide,
    pub position_type: PositionType,
    pub position_size: Decimal,
    #[serde(default)]
    pub available_close_size: Decimal,
    #[serde(default)]
    pub close_order_size: Decimal,
    #[serde(default)]
    pub entry_price: Decimal,
    #[serde(default)]
    pub break_price: Decimal,
    #[serde(default)]
    pub cal_mark_price: Decimal,
    #[serde(rename = "floatingPL", default)]
    pub floating_pl: Decimal,
    #[serde(default)]
    pub realized_profit: Decimal,
    #[serde(default)]
    pub isolated_margin: Decimal,
    #[serde(default)]
    pub open_order_margin_frozen: Decimal,
    pub leverage: u32,
    #[serde(default)]
    pub auto_margin: bool,
    #[serde(default)]
    pub contract_type: String,
    pub profit_id: Option<i64>,
    pub trigger_price_type: Option<TriggerPriceType>,
    pub trigger_profit_price: Option<Decimal>,
    pub trigger_stop_price: Option<Decimal>,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.position_size.is_zero()
    }

    /// Liquidation price, `None` when there is none
    pub fn liquidation(&self) -> Option<Decimal> {
        (!self.break_price.is_zero()).then_some(self.break_price)
    }
}

/// Maker and taker fee rates
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRate {
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
}

/// Auto-deleverage queue position
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdlQuantile {
    pub symbol: String,
    pub long_quantile: u8,
    pub short_quantile: u8,
}

/// Position under margin call
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakPosition {
    pub symbol: String,
    pub position_side: PositionSide,
    pub position_type: PositionType,
    pub position_size: Decimal,
    #[serde(default)]
    pub entry_price: Decimal,
    /// `0` means no margin call
    #[serde(default)]
    pub break_price: Decimal,
    #[serde(default)]
    pub cal_mark_price: Decimal,
    #[serde(default)]
    pub isolated_margin: Decimal,
    pub leverage: u32,
    #[serde(default)]
    pub contract_type: String,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: i64,
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub order_side: OrderSide,
    pub order_type: OrderType,
    pub position_side: PositionSide,
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub price: Decimal,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    #[serde(default)]
    pub margin_frozen: Decimal,
    #[serde(default)]
    pub close_profit: Decimal,
    /// `NEW`, `PARTIALLY_FILLED`, `FILLED`, `CANCELED`, `REJECTED`, `EXPIRED`, ...
    pub state: String,
    pub trigger_profit_price: Option<Decimal>,
    pub trigger_stop_price: Option<Decimal>,
    /// Id of the plan order that placed this one
    pub source_id: Option<i64>,
    pub force_close: Option<bool>,
    pub close_position: Option<bool>,
    pub created_time: i64,
}

impl Order {
    pub fn is_open(&self) -> bool {
        matches!(self.state.as_str(), "NEW" | "PARTIALLY_FILLED")
    }

    pub fn remaining(&self) -> Decimal {
        self.orig_qty - self.executed_qty
    }
}

/// Fill
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub exec_id: String,
    pub order_id: i64,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub fee: Decimal,
    pub fee_coin: String,
    /// `TAKER` or `MAKER`
    pub taker_maker: String,
    pub timestamp: i64,
}

/// Plan (trigger) order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOrder {
    pub entrust_id: i64,
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub entrust_type: EntrustType,
    pub order_side: OrderSide,
    pub position_side: PositionSide,
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub price: Decimal,
    pub stop_price: Decimal,
    pub orig_qty: Decimal,
    pub trigger_price_type: Option<TriggerPriceType>,
    /// `NOT_TRIGGERED`, `TRIGGERING`, `TRIGGERED`, `USER_REVOCATION`, ...
    pub state: String,
    pub close_position: Option<bool>,
    pub created_time: i64,
}

/// Take-profit / stop-loss attached to a position
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitStop {
    pub profit_id: i64,
    pub symbol: String,
    pub position_side: PositionSide,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    #[serde(default)]
    pub position_size: Decimal,
    #[serde(default)]
    pub entry_price: Decimal,
    #[serde(default)]
    pub isolated_margin: Decimal,
    pub trigger_profit_price: Option<Decimal>,
    pub trigger_stop_price: Option<Decimal>,
    pub state: String,
    pub created_time: i64,
}

/// Trailing (track) order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOrder {
    pub track_id: i64,
    pub symbol: String,
    pub order_side: OrderSide,
    pub position_side: PositionSide,
    /// `1` proportion, `2` fixed
    #[serde(default)]
    pub callback: String,
    pub callback_val: Decimal,
    pub activation_price: Option<Decimal>,
    #[serde(default)]
    pub config_activation: bool,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stop_price: Decimal,
    #[serde(default)]
    pub current_price: Decimal,
    #[serde(default)]
    pub avg_price: Decimal,
    pub orig_qty: Decimal,
    #[serde(default)]
    pub executed_qty: Decimal,
    pub trigger_price_type: Option<TriggerPriceType>,
    pub state: String,
    #[serde(default)]
    pub desc: String,
    pub created_time: i64,
    #[serde(default)]
    pub updated_time: i64,
}

// ============================================================================
// Trading Requests
// ============================================================================

/// New order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub order_side: OrderSide,
    pub order_type: OrderType,
    /// Quantity in contracts
    pub orig_qty: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_stop_price: Option<Decimal>,
    pub position_side: PositionSide,
}

impl PlaceOrderRequest {
    /// Limit order, good till cancelled
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        position_side: PositionSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            client_order_id: None,
            symbol: symbol.into(),
            order_side: side,
            order_type: OrderType::Limit,
            orig_qty: quantity,
            price: Some(price),
            time_in_force: Some(TimeInForce::Gtc),
            trigger_profit_price: None,
            trigger_stop_price: None,
            position_side,
        }
    }

    /// Market order
    pub fn market(
        symbol: impl Into<String>,
        side: OrderSide,
        position_side: PositionSide,
        quantity: Decimal,
    ) -> Self {
        Self {
            client_order_id: None,
            symbol: symbol.into(),
            order_side: side,
            order_type: OrderType::Market,
            orig_qty: quantity,
            price: None,
            time_in_force: None,
            trigger_profit_price: None,
            trigger_stop_price: None,
            position_side,
        }
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Post only
    pub fn post_only(self) -> Self {
        self.with_time_in_force(TimeInForce::Gtx)
    }

    pub fn with_take_profit(mut self, trigger_price: Decimal) -> Self {
        self.trigger_profit_price = Some(trigger_price);
        self
    }

    pub fn with_stop_loss(mut self, trigger_price: Decimal) -> Self {
        self.trigger_stop_price = Some(trigger_price);
        self
    }

    /// Checks the exchange would reject anyway
    pub fn validate(&self) -> RestResult<()> {
        if self.symbol.is_empty() {
            return Err(RestError::InvalidParameter("symbol is required".to_string()));
        }
        if self.orig_qty <= Decimal::ZERO {
            return Err(RestError::InvalidParameter("quantity must be positive".to_string()));
        }
        if self.order_type == OrderType::Limit && self.price.is_none() {
            return Err(RestError::InvalidParameter("limit orders require a price".to_string()));
        }
        Ok(())
    }
}

/// Change to an open order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_qty: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_stop_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price_type: Option<TriggerPriceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_delegate_order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_delegate_time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_delegate_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_delegate_order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_delegate_time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_delegate_price: Option<Decimal>,
    /// Chase the best price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_order: Option<bool>,
}

impl UpdateOrderRequest {
    pub fn new(order_id: i64) -> Self {
        Self {
            order_id,
            ..Default::default()
        }
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.orig_qty = Some(quantity);
        self
    }

    pub fn take_profit(mut self, trigger_price: Decimal) -> Self {
        self.trigger_profit_price = Some(trigger_price);
        self
    }

    pub fn stop_loss(mut self, trigger_price: Decimal) -> Self {
        self.trigger_stop_price = Some(trigger_price);
        self
    }
}

/// Filter for the open order list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    /// e.g. `NEW`, `PARTIALLY_FILLED`, `UNFINISHED`
    pub state: Option<String>,
    pub symbol: Option<String>,
    pub client_order_id: Option<String>,
    pub page: PageQuery,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    pub fn paged(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with_opt("state", self.state.as_deref())
            .with_opt("symbol", self.symbol.as_deref())
            .with_opt("clientOrderId", self.client_order_id.as_deref());
        self.page.apply(&mut params);
        params
    }
}

/// Filter for fills
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillQuery {
    pub order_id: Option<i64>,
    pub symbol: Option<String>,
    pub page: PageQuery,
}

impl FillQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_id(mut self, order_id: i64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn paged(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with_opt("orderId", self.order_id)
            .with_opt("symbol", self.symbol.as_deref());
        self.page.apply(&mut params);
        params
    }
}

/// New plan (trigger) order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanOrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    pub symbol: String,
    pub order_side: OrderSide,
    pub entrust_type: EntrustType,
    pub orig_qty: Decimal,
    /// Required for limit entrust types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Trigger price
    pub stop_price: Decimal,
    pub time_in_force: TimeInForce,
    pub trigger_price_type: TriggerPriceType,
    pub position_side: PositionSide,
}

impl CreatePlanOrderRequest {
    /// Market order once `stop_price` is reached on the latest price
    pub fn market(
        symbol: impl Into<String>,
        entrust_type: EntrustType,
        side: OrderSide,
        position_side: PositionSide,
        quantity: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self {
            client_order_id: None,
            symbol: symbol.into(),
            order_side: side,
            entrust_type,
            orig_qty: quantity,
            price: None,
            stop_price,
            time_in_force: TimeInForce::Ioc,
            trigger_price_type: TriggerPriceType::LatestPrice,
            position_side,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    pub fn with_trigger_price_type(mut self, kind: TriggerPriceType) -> Self {
        self.trigger_price_type = kind;
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.client_order_id = Some(id.into());
        self
    }

    /// Limit entrust types need a price; market ones only take IOC
    pub fn validate(&self) -> RestResult<()> {
        if self.entrust_type.is_limit() && self.price.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} plan orders require a price",
                self.entrust_type
            )));
        }
        if !self.entrust_type.is_limit() && self.time_in_force != TimeInForce::Ioc {
            return Err(RestError::InvalidParameter(format!(
                "{} plan orders only support IOC",
                self.entrust_type
            )));
        }
        Ok(())
    }
}

/// Filter for plan and profit-stop lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrustListQuery {
    pub symbol: String,
    /// `NOT_TRIGGERED`, `TRIGGERING`, `TRIGGERED`, `UNFINISHED`, `HISTORY`, ...
    pub state: String,
    pub page: PageQuery,
}

impl EntrustListQuery {
    pub fn new(symbol: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            state: state.into(),
            page: PageQuery::default(),
        }
    }

    pub fn paged(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new()
            .with("symbol", &self.symbol)
            .with("state", &self.state);
        self.page.apply(&mut params);
        params
    }
}

/// New take-profit / stop-loss on a position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfitStopRequest {
    pub symbol: String,
    pub orig_qty: Decimal,
    pub trigger_profit_price: Decimal,
    pub trigger_stop_price: Decimal,
    /// Expiry, unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_time: Option<i64>,
    pub position_side: PositionSide,
}

/// Change to a take-profit / stop-loss
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfitStopRequest {
    pub profit_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_profit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_stop_price: Option<Decimal>,
}

/// New trailing (track) order
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTrackOrderRequest {
    pub symbol: String,
    pub order_side: OrderSide,
    pub position_side: PositionSide,
    pub position_type: PositionType,
    pub orig_qty: Decimal,
    pub callback: TrackCallback,
    /// Trailing distance, must be positive
    pub callback_val: Decimal,
    pub trigger_price_type: TriggerPriceType,
    pub activation_price: Option<Decimal>,
    pub client_order_id: Option<String>,
    pub expire_time: Option<i64>,
}

impl CreateTrackOrderRequest {
    pub(crate) fn params(&self) -> RestResult<Params> {
        if self.callback_val <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(
                "callback value must be positive".to_string(),
            ));
        }

        Ok(Params::new()
            .with("symbol", &self.symbol)
            .with("orderSide", self.order_side)
            .with("positionSide", self.position_side)
            .with("positionType", self.position_type)
            .with("origQty", self.orig_qty)
            .with("callback", self.callback)
            .with("callbackVal", self.callback_val)
            .with("triggerPriceType", self.trigger_price_type)
            .with_opt("activationPrice", self.activation_price)
            .with_opt("clientOrderId", self.client_order_id.as_deref())
            .with_opt("expireTime", self.expire_time))
    }
}
