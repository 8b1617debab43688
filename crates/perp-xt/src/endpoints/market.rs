//! Public market data endpoints
//!
//! These endpoints do not require authentication and are never signed.

use perp_rest::{ExchangeClient, Params, RestRequest, RestResult};
use tracing::{debug, instrument};

use crate::client::XtClient;
use crate::types::{
    AggTicker, BookTicker, ClientIp, Contract, Cursor, CursorQuery, Deal, Depth, FundingRate,
    FundingRateRecord, Kline, KlineQuery, LeverageDetail, OpenInterest, PriceTick, RiskBalance,
    SymbolList, Ticker,
};

const MARKET: &str = "/future/market/v1/public";

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a XtClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a XtClient) -> Self {
        Self { client }
    }

    /// Get server time in unix milliseconds
    #[instrument(skip(self))]
    pub async fn server_time(&self) -> RestResult<i64> {
        debug!("Fetching server time");
        self.get(format!("{}/time", MARKET), Params::new()).await
    }

    /// Get the caller's address as seen by the exchange
    #[instrument(skip(self))]
    pub async fn client_ip(&self) -> RestResult<ClientIp> {
        debug!("Fetching client IP");
        self.get("/future/public/client".to_string(), Params::new()).await
    }

    /// List settlement coins
    #[instrument(skip(self))]
    pub async fn coins(&self) -> RestResult<Vec<String>> {
        debug!("Fetching coins");
        self.get(format!("{}/symbol/coins", MARKET), Params::new()).await
    }

    /// Get the configuration of one symbol
    #[instrument(skip(self))]
    pub async fn symbol(&self, symbol: &str) -> RestResult<Contract> {
        debug!("Fetching symbol {}", symbol);
        self.get(format!("{}/symbol/detail", MARKET), symbol_param(symbol))
            .await
    }

    /// List every symbol
    #[instrument(skip(self))]
    pub async fn symbols(&self) -> RestResult<SymbolList> {
        debug!("Fetching symbol list");
        self.get("/future/market/v3/public/symbol/list".to_string(), Params::new())
            .await
    }

    /// Get the leverage tiers of one symbol
    #[instrument(skip(self))]
    pub async fn leverage_bracket(&self, symbol: &str) -> RestResult<LeverageDetail> {
        debug!("Fetching leverage brackets for {}", symbol);
        self.get(format!("{}/leverage/bracket/detail", MARKET), symbol_param(symbol))
            .await
    }

    /// Get the leverage tiers of every symbol
    #[instrument(skip(self))]
    pub async fn leverage_brackets(&self) -> RestResult<Vec<LeverageDetail>> {
        debug!("Fetching all leverage brackets");
        self.get(format!("{}/leverage/bracket/list", MARKET), Params::new())
            .await
    }

    /// Get the 24h ticker of one symbol
    #[instrument(skip(self))]
    pub async fn ticker(&self, symbol: &str) -> RestResult<Ticker> {
        debug!("Fetching ticker for {}", symbol);
        self.get(format!("{}/q/ticker", MARKET), symbol_param(symbol)).await
    }

    /// Get 24h tickers of every symbol
    #[instrument(skip(self))]
    pub async fn tickers(&self) -> RestResult<Vec<Ticker>> {
        debug!("Fetching tickers");
        self.get(format!("{}/q/tickers", MARKET), Params::new()).await
    }

    /// Get recent public trades
    ///
    /// # Arguments
    /// * `num` - Number of trades
    #[instrument(skip(self))]
    pub async fn deals(&self, symbol: &str, num: u32) -> RestResult<Vec<Deal>> {
        debug!("Fetching deals for {}", symbol);
        let params = symbol_param(symbol).with("num", num);
        self.get(format!("{}/q/deal", MARKET), params).await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `level` - Levels per side, 1 to 50
    #[instrument(skip(self))]
    pub async fn depth(&self, symbol: &str, level: u32) -> RestResult<Depth> {
        debug!("Fetching depth for {}", symbol);
        let params = symbol_param(symbol).with("level", level);
        self.get(format!("{}/q/depth", MARKET), params).await
    }

    /// Get the index price of one symbol
    #[instrument(skip(self))]
    pub async fn index_price(&self, symbol: &str) -> RestResult<PriceTick> {
        debug!("Fetching index price for {}", symbol);
        self.get(format!("{}/q/symbol-index-price", MARKET), symbol_param(symbol))
            .await
    }

    /// Get index prices of every symbol
    #[instrument(skip(self))]
    pub async fn index_prices(&self) -> RestResult<Vec<PriceTick>> {
        debug!("Fetching index prices");
        self.get(format!("{}/q/index-price", MARKET), Params::new()).await
    }

    /// Get the mark price of one symbol
    #[instrument(skip(self))]
    pub async fn mark_price(&self, symbol: &str) -> RestResult<PriceTick> {
        debug!("Fetching mark price for {}", symbol);
        self.get(format!("{}/q/symbol-mark-price", MARKET), symbol_param(symbol))
            .await
    }

    /// Get mark prices of every symbol
    #[instrument(skip(self))]
    pub async fn mark_prices(&self) -> RestResult<Vec<PriceTick>> {
        debug!("Fetching mark prices");
        self.get(format!("{}/q/mark-price", MARKET), Params::new()).await
    }

    /// Get candlesticks
    #[instrument(skip(self))]
    pub async fn klines(&self, symbol: &str, query: &KlineQuery) -> RestResult<Vec<Kline>> {
        debug!("Fetching {} klines for {}", query.interval, symbol);
        let mut params = symbol_param(symbol);
        query.apply(&mut params);
        self.get(format!("{}/q/kline", MARKET), params).await
    }

    /// Get the aggregated ticker of one symbol
    #[instrument(skip(self))]
    pub async fn agg_ticker(&self, symbol: &str) -> RestResult<AggTicker> {
        debug!("Fetching aggregated ticker for {}", symbol);
        self.get(format!("{}/q/agg-ticker", MARKET), symbol_param(symbol))
            .await
    }

    /// Get aggregated tickers of every symbol
    #[instrument(skip(self))]
    pub async fn agg_tickers(&self) -> RestResult<Vec<AggTicker>> {
        debug!("Fetching aggregated tickers");
        self.get(format!("{}/q/agg-tickers", MARKET), Params::new()).await
    }

    /// Get the current funding rate
    #[instrument(skip(self))]
    pub async fn funding_rate(&self, symbol: &str) -> RestResult<FundingRate> {
        debug!("Fetching funding rate for {}", symbol);
        self.get(format!("{}/q/funding-rate", MARKET), symbol_param(symbol))
            .await
    }

    /// Get historical funding rates
    #[instrument(skip(self))]
    pub async fn funding_rate_records(
        &self,
        symbol: &str,
        query: &CursorQuery,
    ) -> RestResult<Cursor<FundingRateRecord>> {
        debug!("Fetching funding rate records for {}", symbol);
        let mut params = symbol_param(symbol);
        query.apply(&mut params);
        self.get(format!("{}/q/funding-rate-record", MARKET), params).await
    }

    /// Get best bid and ask of one symbol
    #[instrument(skip(self))]
    pub async fn book_ticker(&self, symbol: &str) -> RestResult<BookTicker> {
        debug!("Fetching book ticker for {}", symbol);
        self.get(format!("{}/q/ticker/book", MARKET), symbol_param(symbol))
            .await
    }

    /// Get best bid and ask of every symbol
    #[instrument(skip(self))]
    pub async fn book_tickers(&self) -> RestResult<Vec<BookTicker>> {
        debug!("Fetching book tickers");
        self.get(format!("{}/q/ticker/books", MARKET), Params::new()).await
    }

    /// Get risk fund balance history
    #[instrument(skip(self))]
    pub async fn risk_balance(
        &self,
        symbol: &str,
        query: &CursorQuery,
    ) -> RestResult<Cursor<RiskBalance>> {
        debug!("Fetching risk balance for {}", symbol);
        let mut params = symbol_param(symbol);
        query.apply(&mut params);
        self.get(format!("{}/contract/risk-balance", MARKET), params).await
    }

    /// Get open interest
    #[instrument(skip(self))]
    pub async fn open_interest(&self, symbol: &str) -> RestResult<OpenInterest> {
        debug!("Fetching open interest for {}", symbol);
        self.get(format!("{}/contract/open-interest", MARKET), symbol_param(symbol))
            .await
    }

    async fn get<T>(&self, path: String, params: Params) -> RestResult<T>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let req = RestRequest::get(path).query(params);
        self.client.dispatch(req).await
    }
}

fn symbol_param(symbol: &str) -> Params {
    Params::new().with("symbol", symbol)
}
