//! Private account and position endpoints
//!
//! These endpoints require authentication.

use std::collections::HashMap;

use perp_rest::{ExchangeClient, Params, RestRequest, RestResult};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::client::GateClient;
use crate::types::{
    AccountBookEntry, Contract, DualSide, FuturesAccount, HistoryQuery, Position, PositionClose,
};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a GateClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a GateClient) -> Self {
        Self { client }
    }

    /// Get the futures account
    #[instrument(skip(self))]
    pub async fn futures_account(&self) -> RestResult<FuturesAccount> {
        debug!("Fetching futures account");
        let req = RestRequest::get(self.client.futures_path("/accounts")).private();
        self.client.dispatch(req).await
    }

    /// List positions
    ///
    /// # Arguments
    /// * `holding` - `Some(true)` returns only non-zero positions
    #[instrument(skip(self))]
    pub async fn positions(&self, holding: Option<bool>) -> RestResult<Vec<Position>> {
        debug!("Fetching positions");
        let req = RestRequest::get(self.client.futures_path("/positions"))
            .param_opt("holding", holding)
            .private();
        self.client.dispatch(req).await
    }

    /// Get a single-mode position
    #[instrument(skip(self))]
    pub async fn position(&self, contract: &str) -> RestResult<Position> {
        debug!("Fetching position for {}", contract);
        let req = RestRequest::get(self.position_path(contract, "")?).private();
        self.client.dispatch(req).await
    }

    /// Add or remove position margin
    ///
    /// # Arguments
    /// * `change` - Positive adds margin, negative removes it
    #[instrument(skip(self))]
    pub async fn update_margin(&self, contract: &str, change: Decimal) -> RestResult<Position> {
        debug!("Updating margin for {} by {}", contract, change);
        let req = RestRequest::post(self.position_path(contract, "/margin")?)
            .param("change", change)
            .private();
        self.client.dispatch(req).await
    }

    /// Set position leverage
    ///
    /// # Arguments
    /// * `leverage` - `0` switches to cross margin
    /// * `cross_leverage_limit` - Leverage cap under cross margin
    #[instrument(skip(self))]
    pub async fn update_leverage(
        &self,
        contract: &str,
        leverage: Decimal,
        cross_leverage_limit: Option<Decimal>,
    ) -> RestResult<Position> {
        debug!("Updating leverage for {} to {}", contract, leverage);
        let req = RestRequest::post(self.position_path(contract, "/leverage")?)
            .param("leverage", leverage)
            .param_opt("cross_leverage_limit", cross_leverage_limit)
            .private();
        self.client.dispatch(req).await
    }

    /// Set position risk limit
    #[instrument(skip(self))]
    pub async fn update_risk_limit(&self, contract: &str, risk_limit: Decimal) -> RestResult<Position> {
        debug!("Updating risk limit for {} to {}", contract, risk_limit);
        let req = RestRequest::post(self.position_path(contract, "/risk_limit")?)
            .param("risk_limit", risk_limit)
            .private();
        self.client.dispatch(req).await
    }

    /// Enable or disable dual (hedge) mode
    #[instrument(skip(self))]
    pub async fn set_dual_mode(&self, dual_mode: bool) -> RestResult<FuturesAccount> {
        debug!("Setting dual mode to {}", dual_mode);
        let req = RestRequest::post(self.client.futures_path("/dual_mode"))
            .param("dual_mode", dual_mode)
            .private();
        self.client.dispatch(req).await
    }

    /// Get both legs of a dual-mode position
    #[instrument(skip(self))]
    pub async fn dual_mode_position(&self, contract: &str) -> RestResult<Vec<Position>> {
        debug!("Fetching dual mode position for {}", contract);
        let req = RestRequest::get(self.dual_path(contract, "")?).private();
        self.client.dispatch(req).await
    }

    /// Add or remove margin on one leg of a dual-mode position
    #[instrument(skip(self))]
    pub async fn update_dual_mode_margin(
        &self,
        contract: &str,
        change: Decimal,
        dual_side: DualSide,
    ) -> RestResult<Vec<Position>> {
        debug!("Updating {} margin for {} by {}", dual_side, contract, change);
        let req = RestRequest::post(self.dual_path(contract, "/margin")?)
            .param("change", change)
            .param("dual_side", dual_side)
            .private();
        self.client.dispatch(req).await
    }

    /// Set leverage of a dual-mode position
    #[instrument(skip(self))]
    pub async fn update_dual_mode_leverage(
        &self,
        contract: &str,
        leverage: Decimal,
        cross_leverage_limit: Option<Decimal>,
    ) -> RestResult<Vec<Position>> {
        debug!("Updating dual mode leverage for {} to {}", contract, leverage);
        let req = RestRequest::post(self.dual_path(contract, "/leverage")?)
            .param("leverage", leverage)
            .param_opt("cross_leverage_limit", cross_leverage_limit)
            .private();
        self.client.dispatch(req).await
    }

    /// Set risk limit of a dual-mode position
    #[instrument(skip(self))]
    pub async fn update_dual_mode_risk_limit(
        &self,
        contract: &str,
        risk_limit: Decimal,
    ) -> RestResult<Vec<Position>> {
        debug!("Updating dual mode risk limit for {} to {}", contract, risk_limit);
        let req = RestRequest::post(self.dual_path(contract, "/risk_limit")?)
            .param("risk_limit", risk_limit)
            .private();
        self.client.dispatch(req).await
    }

    /// List account ledger entries
    ///
    /// # Arguments
    /// * `contract` - Restrict to one contract
    /// * `entry_type` - `dnw`, `pnl`, `fee`, `refr`, `fund`, ...
    /// * `query` - Honours `limit`, `offset`, `from` and `to`
    #[instrument(skip(self))]
    pub async fn account_book(
        &self,
        contract: Option<&str>,
        entry_type: Option<&str>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<AccountBookEntry>> {
        debug!("Fetching account book");
        let mut params = Params::new()
            .with_opt("contract", contract)
            .with_opt("type", entry_type);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/account_book"))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// List closed positions
    ///
    /// # Arguments
    /// * `contract` - Restrict to one contract
    /// * `side` - `long` or `short`
    /// * `pnl` - `profit` or `loss`
    /// * `query` - Honours `limit`, `offset`, `from` and `to`
    #[instrument(skip(self))]
    pub async fn position_close_history(
        &self,
        contract: Option<&str>,
        side: Option<&str>,
        pnl: Option<&str>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<PositionClose>> {
        debug!("Fetching position close history");
        let mut params = Params::new()
            .with_opt("contract", contract)
            .with_opt("side", side)
            .with_opt("pnl", pnl);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/position_close"))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// List dual-compounding contracts
    #[instrument(skip(self))]
    pub async fn dual_comp_contracts(&self) -> RestResult<Vec<Contract>> {
        debug!("Fetching dual comp contracts");
        let req = RestRequest::get(self.client.futures_path("/dual_comp/contracts")).private();
        self.client.dispatch(req).await
    }

    /// List the constituents of a dual-compounding index, keyed by exchange
    ///
    /// # Arguments
    /// * `index` - Index name (e.g., "BTC_USDT_DUAL")
    #[instrument(skip(self))]
    pub async fn dual_comp_index_constituents(
        &self,
        index: &str,
    ) -> RestResult<HashMap<String, Vec<String>>> {
        debug!("Fetching constituents of {}", index);
        let path = self.client.item_path("/dual_comp/index_constituents", index)?;
        let req = RestRequest::get(path).private();
        self.client.dispatch(req).await
    }

    fn position_path(&self, contract: &str, suffix: &str) -> RestResult<String> {
        Ok(self.client.item_path("/positions", contract)? + suffix)
    }

    fn dual_path(&self, contract: &str, suffix: &str) -> RestResult<String> {
        Ok(self.client.item_path("/dual_comp/positions", contract)? + suffix)
    }
}
