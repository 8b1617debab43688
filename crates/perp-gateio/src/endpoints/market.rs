//! Public market data endpoints
//!
//! These endpoints don't require authentication. A client holding
//! credentials still signs them.

use perp_rest::{ExchangeClient, Params, RestRequest, RestResult};
use tracing::{debug, instrument};

use crate::client::GateClient;
use crate::types::{
    CandleQuery, Candlestick, Contract, ContractStats, FundingRate, HistoryQuery, InsuranceRecord,
    Liquidation, OrderBook, PremiumIndex, RiskLimitTier, Ticker, Trade,
};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a GateClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a GateClient) -> Self {
        Self { client }
    }

    /// List all contracts
    #[instrument(skip(self))]
    pub async fn contracts(&self) -> RestResult<Vec<Contract>> {
        debug!("Fetching contracts");
        let req = RestRequest::get(self.client.futures_path("/contracts"));
        self.client.dispatch(req).await
    }

    /// Get a single contract
    #[instrument(skip(self))]
    pub async fn contract(&self, contract: &str) -> RestResult<Contract> {
        debug!("Fetching contract {}", contract);
        let req = RestRequest::get(self.client.item_path("/contracts", contract)?);
        self.client.dispatch(req).await
    }

    /// Get contract statistics
    ///
    /// # Arguments
    /// * `contract` - Contract name (e.g., "BTC_USDT")
    /// * `query` - Interval (`5m`, `15m`, `30m`, `1h`, `4h`, `1d`), limit and window
    #[instrument(skip(self))]
    pub async fn contract_stats(
        &self,
        contract: &str,
        query: &CandleQuery,
    ) -> RestResult<Vec<ContractStats>> {
        debug!("Fetching contract stats for {}", contract);
        let mut params = Params::new().with("contract", contract);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/contract_stats")).query(params);
        self.client.dispatch(req).await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `contract` - Contract name
    /// * `interval` - Price merge precision, `"0"` for none
    /// * `limit` - Levels per side
    /// * `with_id` - Return the book id
    #[instrument(skip(self))]
    pub async fn order_book(
        &self,
        contract: &str,
        interval: Option<&str>,
        limit: Option<u32>,
        with_id: bool,
    ) -> RestResult<OrderBook> {
        debug!("Fetching order book for {}", contract);
        let params = Params::new()
            .with("contract", contract)
            .with_opt("interval", interval)
            .with_opt("limit", limit)
            .with_opt("with_id", with_id.then_some(true));

        let req = RestRequest::get(self.client.futures_path("/order_book")).query(params);
        let mut book: OrderBook = self.client.dispatch(req).await?;
        book.contract = contract.to_string();
        Ok(book)
    }

    /// Get recent public trades
    ///
    /// Honours `limit`, `offset`, `last_id`, `from` and `to`.
    #[instrument(skip(self))]
    pub async fn trades(&self, contract: &str, query: &HistoryQuery) -> RestResult<Vec<Trade>> {
        debug!("Fetching trades for {}", contract);
        let mut params = Params::new().with("contract", contract);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/trades")).query(params);
        self.client.dispatch(req).await
    }

    /// Get candlesticks
    ///
    /// Prefix the contract with `mark_` or `index_` for mark or index price candles.
    #[instrument(skip(self))]
    pub async fn candlesticks(
        &self,
        contract: &str,
        query: &CandleQuery,
    ) -> RestResult<Vec<Candlestick>> {
        debug!("Fetching candlesticks for {}", contract);
        let mut params = Params::new().with("contract", contract);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/candlesticks")).query(params);
        self.client.dispatch(req).await
    }

    /// Get premium index candles
    #[instrument(skip(self))]
    pub async fn premium_index(
        &self,
        contract: &str,
        query: &CandleQuery,
    ) -> RestResult<Vec<PremiumIndex>> {
        debug!("Fetching premium index for {}", contract);
        let mut params = Params::new().with("contract", contract);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/premium_index")).query(params);
        self.client.dispatch(req).await
    }

    /// Get tickers for all contracts, or one
    #[instrument(skip(self))]
    pub async fn tickers(&self, contract: Option<&str>) -> RestResult<Vec<Ticker>> {
        debug!("Fetching tickers");
        let req = RestRequest::get(self.client.futures_path("/tickers")).param_opt("contract", contract);
        self.client.dispatch(req).await
    }

    /// Get funding rate history
    #[instrument(skip(self))]
    pub async fn funding_rate(&self, contract: &str, limit: Option<u32>) -> RestResult<Vec<FundingRate>> {
        debug!("Fetching funding rate history for {}", contract);
        let req = RestRequest::get(self.client.futures_path("/funding_rate"))
            .param("contract", contract)
            .param_opt("limit", limit);
        self.client.dispatch(req).await
    }

    /// Get insurance fund history
    #[instrument(skip(self))]
    pub async fn insurance(&self, limit: Option<u32>) -> RestResult<Vec<InsuranceRecord>> {
        debug!("Fetching insurance ledger");
        let req = RestRequest::get(self.client.futures_path("/insurance")).param_opt("limit", limit);
        self.client.dispatch(req).await
    }

    /// Get liquidation history
    ///
    /// # Arguments
    /// * `contract` - Restrict to one contract
    /// * `at` - Exact liquidation time, unix seconds
    /// * `query` - Honours `limit`, `from` and `to`
    #[instrument(skip(self))]
    pub async fn liquidations(
        &self,
        contract: Option<&str>,
        at: Option<i64>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<Liquidation>> {
        debug!("Fetching liquidation history");
        let mut params = Params::new().with_opt("contract", contract).with_opt("at", at);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/liq_orders")).query(params);
        self.client.dispatch(req).await
    }

    /// Get risk limit tiers for a contract
    #[instrument(skip(self))]
    pub async fn risk_limit_tiers(&self, contract: &str) -> RestResult<Vec<RiskLimitTier>> {
        debug!("Fetching risk limit tiers for {}", contract);
        let req = RestRequest::get(self.client.futures_path("/risk_limit_tiers")).param("contract", contract);
        self.client.dispatch(req).await
    }
}
