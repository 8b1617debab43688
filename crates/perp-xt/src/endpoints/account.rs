//! Private account and position endpoints
//!
//! These endpoints require authentication.

use perp_rest::{ExchangeClient, Params, RestRequest, RestResult};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use crate::client::XtClient;
use crate::types::{
    AccountInfo, AdlQuantile, Balance, BalanceBill, BreakPosition, CompatBalance, Cursor,
    CursorQuery, FundingFee, ListenKey, MarginAdjust, Position, PositionSide, PositionType,
    StepRate,
};

const USER: &str = "/future/user/v1";

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a XtClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a XtClient) -> Self {
        Self { client }
    }

    /// Get account flags
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> RestResult<AccountInfo> {
        debug!("Fetching account info");
        let req = RestRequest::get(format!("{}/account/info", USER)).private();
        self.client.dispatch(req).await
    }

    /// Get a key for the private websocket stream
    #[instrument(skip(self))]
    pub async fn listen_key(&self) -> RestResult<ListenKey> {
        debug!("Fetching listen key");
        let req = RestRequest::get(format!("{}/user/listen-key", USER)).private();
        self.client.dispatch(req).await
    }

    /// Open the futures account
    #[instrument(skip(self))]
    pub async fn open_account(&self) -> RestResult<bool> {
        debug!("Opening futures account");
        let req = RestRequest::post(format!("{}/account/open", USER)).private();
        self.client.dispatch(req).await
    }

    /// Get the balance of one coin
    #[instrument(skip(self))]
    pub async fn balance(&self, coin: &str) -> RestResult<Balance> {
        debug!("Fetching {} balance", coin);
        let req = RestRequest::get(format!("{}/balance/detail", USER))
            .param("coin", coin)
            .private();
        self.client.dispatch(req).await
    }

    /// Get balances of every coin
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        debug!("Fetching balances");
        let req = RestRequest::get(format!("{}/balance/list", USER)).private();
        self.client.dispatch(req).await
    }

    /// Get balances from the compatibility listing
    ///
    /// # Arguments
    /// * `account_id` - Query another account of the caller
    #[instrument(skip(self))]
    pub async fn compat_balances(
        &self,
        account_id: Option<&str>,
    ) -> RestResult<Vec<CompatBalance>> {
        debug!("Fetching compat balances");
        let req = RestRequest::get(format!("{}/compat/balance/list", USER))
            .param_opt("queryAccountId", account_id)
            .private();
        self.client.dispatch(req).await
    }

    /// List ledger entries of a symbol
    #[instrument(skip(self))]
    pub async fn balance_bills(
        &self,
        symbol: &str,
        query: &CursorQuery,
    ) -> RestResult<Cursor<BalanceBill>> {
        debug!("Fetching balance bills for {}", symbol);
        let mut params = Params::new().with("symbol", symbol);
        query.apply(&mut params);

        let req = RestRequest::get(format!("{}/balance/bills", USER))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// List funding fees paid or received
    #[instrument(skip(self))]
    pub async fn funding_fees(
        &self,
        symbol: &str,
        query: &CursorQuery,
    ) -> RestResult<Cursor<FundingFee>> {
        debug!("Fetching funding fees for {}", symbol);
        let mut params = Params::new().with("symbol", symbol);
        query.apply(&mut params);

        let req = RestRequest::get(format!("{}/balance/funding-rate-list", USER))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// List positions
    #[instrument(skip(self))]
    pub async fn positions(&self, symbol: Option<&str>) -> RestResult<Vec<Position>> {
        debug!("Fetching positions");
        let req = RestRequest::get(format!("{}/position/list", USER))
            .param_opt("symbol", symbol)
            .private();
        self.client.dispatch(req).await
    }

    /// List positions with a non-zero size
    #[instrument(skip(self))]
    pub async fn active_positions(&self, symbol: Option<&str>) -> RestResult<Vec<Position>> {
        debug!("Fetching active positions");
        let req = RestRequest::get(format!("{}/position", USER))
            .param_opt("symbol", symbol)
            .private();
        self.client.dispatch(req).await
    }

    /// Get the caller's fee rates
    #[instrument(skip(self))]
    pub async fn step_rate(&self) -> RestResult<StepRate> {
        debug!("Fetching fee rates");
        let req = RestRequest::get(format!("{}/user/step-rate", USER)).private();
        self.client.dispatch(req).await
    }

    /// Set the leverage of one side of a position
    #[instrument(skip(self))]
    pub async fn adjust_leverage(
        &self,
        symbol: &str,
        position_side: PositionSide,
        leverage: u32,
    ) -> RestResult<()> {
        debug!("Setting {} {} leverage to {}", symbol, position_side, leverage);
        let params = Params::new()
            .with("symbol", symbol)
            .with("positionSide", position_side)
            .with("leverage", leverage);
        self.post_form(format!("{}/position/adjust-leverage", USER), params)
            .await
    }

    /// Add or remove isolated margin
    #[instrument(skip(self))]
    pub async fn adjust_margin(
        &self,
        symbol: &str,
        margin: Decimal,
        adjust: MarginAdjust,
        position_side: Option<PositionSide>,
    ) -> RestResult<()> {
        debug!("Adjusting {} margin: {} {}", symbol, adjust, margin);
        let params = Params::new()
            .with("symbol", symbol)
            .with("margin", margin)
            .with("type", adjust)
            .with_opt("positionSide", position_side);
        self.post_form(format!("{}/position/margin", USER), params).await
    }

    /// Market-close every position
    #[instrument(skip(self))]
    pub async fn close_all_positions(&self) -> RestResult<bool> {
        debug!("Closing all positions");
        let req = RestRequest::post(format!("{}/position/close-all", USER)).private();
        self.client.dispatch(req).await
    }

    /// Get auto-deleverage quantiles
    #[instrument(skip(self))]
    pub async fn adl_quantiles(&self) -> RestResult<Vec<AdlQuantile>> {
        debug!("Fetching ADL quantiles");
        let req = RestRequest::get(format!("{}/position/adl", USER)).private();
        self.client.dispatch(req).await
    }

    /// Add a symbol to the watch list
    #[instrument(skip(self))]
    pub async fn collection_add(&self, symbol: &str) -> RestResult<bool> {
        debug!("Adding {} to collection", symbol);
        let req = RestRequest::post(format!("{}/user/collection/add", USER))
            .form(Params::new().with("symbol", symbol))
            .private();
        self.client.dispatch(req).await
    }

    /// Remove a symbol from the watch list
    #[instrument(skip(self))]
    pub async fn collection_cancel(&self, symbol: &str) -> RestResult<bool> {
        debug!("Removing {} from collection", symbol);
        let req = RestRequest::post(format!("{}/user/collection/cancel", USER))
            .form(Params::new().with("symbol", symbol))
            .private();
        self.client.dispatch(req).await
    }

    /// List watched symbols
    #[instrument(skip(self))]
    pub async fn collection_list(&self) -> RestResult<Vec<String>> {
        debug!("Fetching collection");
        let req = RestRequest::get(format!("{}/user/collection/list", USER)).private();
        self.client.dispatch(req).await
    }

    /// Switch a position between cross and isolated margin
    #[instrument(skip(self))]
    pub async fn change_position_type(
        &self,
        symbol: &str,
        position_side: PositionSide,
        position_type: PositionType,
    ) -> RestResult<()> {
        debug!("Switching {} {} to {}", symbol, position_side, position_type);
        let params = Params::new()
            .with("symbol", symbol)
            .with("positionSide", position_side)
            .with("positionType", position_type);
        self.post_form(format!("{}/position/change-type", USER), params)
            .await
    }

    /// List positions under margin call
    #[instrument(skip(self))]
    pub async fn break_list(&self, symbol: Option<&str>) -> RestResult<Vec<BreakPosition>> {
        debug!("Fetching margin call list");
        let req = RestRequest::get(format!("{}/position/break-list", USER))
            .param_opt("symbol", symbol)
            .private();
        self.client.dispatch(req).await
    }

    /// Form POST whose result carries nothing of interest
    async fn post_form(&self, path: String, params: Params) -> RestResult<()> {
        let req = RestRequest::post(path).form(params).private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }
}
