//! Private trading endpoints
//!
//! These endpoints require authentication.

use perp_rest::{ExchangeClient, Params, RestError, RestRequest, RestResult};
use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::GateClient;
use crate::types::{
    AmendOrder, CountdownCancelAll, CreateFuturesOrderRequest, CreatePriceOrderRequest,
    FuturesOrder, HistoryQuery, MyTrade, OrderSide, OrderStatus, PriceOrderId,
    PriceTriggeredOrder,
};

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a GateClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a GateClient) -> Self {
        Self { client }
    }

    /// Place a new order
    #[instrument(skip(self, order), fields(contract = %order.contract, size = order.size))]
    pub async fn create_order(&self, order: &CreateFuturesOrderRequest) -> RestResult<FuturesOrder> {
        debug!("Placing order");
        let req = RestRequest::post(self.client.futures_path("/orders"))
            .json(order)?
            .private();
        self.client.dispatch(req).await
    }

    /// List orders
    ///
    /// # Arguments
    /// * `status` - `open` or `finished`
    /// * `contract` - Required when listing open orders
    /// * `query` - Honours `limit`, `offset`, `last_id`, `from` and `to`
    #[instrument(skip(self))]
    pub async fn orders(
        &self,
        status: OrderStatus,
        contract: Option<&str>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<FuturesOrder>> {
        if status == OrderStatus::Open && contract.is_none() {
            return Err(RestError::InvalidParameter(
                "contract is required when listing open orders".to_string(),
            ));
        }

        debug!("Fetching {} orders", status);
        let mut params = Params::new()
            .with("status", status)
            .with_opt("contract", contract);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/orders"))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel all open orders of a contract
    ///
    /// # Arguments
    /// * `side` - Only cancel bids or asks
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(
        &self,
        contract: &str,
        side: Option<OrderSide>,
    ) -> RestResult<Vec<FuturesOrder>> {
        debug!("Cancelling all orders for {}", contract);
        let req = RestRequest::delete(self.client.futures_path("/orders"))
            .param("contract", contract)
            .param_opt("side", side)
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel several orders by id
    ///
    /// Sends the ids as a JSON array body.
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self, order_ids: &[&str]) -> RestResult<Vec<FuturesOrder>> {
        if order_ids.is_empty() {
            return Err(RestError::InvalidParameter("no order ids to cancel".to_string()));
        }

        debug!("Cancelling {} orders", order_ids.len());
        let req = RestRequest::delete(self.client.futures_path("/orders"))
            .json(order_ids)?
            .private();
        self.client.dispatch(req).await
    }

    /// Get an order by id or `t-` text
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: &str) -> RestResult<FuturesOrder> {
        debug!("Fetching order {}", order_id);
        let req = RestRequest::get(self.order_path(order_id)?).private();
        self.client.dispatch(req).await
    }

    /// Cancel an order by id or `t-` text
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<FuturesOrder> {
        debug!("Cancelling order {}", order_id);
        let req = RestRequest::delete(self.order_path(order_id)?).private();
        self.client.dispatch(req).await
    }

    /// Change size or price of an open order
    #[instrument(skip(self))]
    pub async fn amend_order(&self, order_id: &str, amend: &AmendOrder) -> RestResult<FuturesOrder> {
        let params = amend.params();
        if params.is_empty() {
            return Err(RestError::InvalidParameter(
                "amendment must change size or price".to_string(),
            ));
        }

        debug!("Amending order {}", order_id);
        let req = RestRequest::put(self.order_path(order_id)?)
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// List personal fills
    ///
    /// # Arguments
    /// * `contract` - Restrict to one contract
    /// * `order_id` - Restrict to one order
    /// * `query` - Honours `limit`, `offset`, `last_id`, `from` and `to`
    #[instrument(skip(self))]
    pub async fn my_trades(
        &self,
        contract: Option<&str>,
        order_id: Option<&str>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<MyTrade>> {
        debug!("Fetching personal trades");
        let mut params = Params::new()
            .with_opt("contract", contract)
            .with_opt("order", order_id);
        query.apply(&mut params);

        let req = RestRequest::get(self.client.futures_path("/my_trades"))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    // ========================================================================
    // Price-Triggered Orders
    // ========================================================================

    /// Create a price-triggered order
    ///
    /// The settle currency is added to the body from the client.
    #[instrument(skip(self, order), fields(contract = %order.initial.contract))]
    pub async fn create_price_order(&self, order: &CreatePriceOrderRequest) -> RestResult<PriceOrderId> {
        #[derive(Serialize)]
        struct WithSettle<'a> {
            #[serde(flatten)]
            order: &'a CreatePriceOrderRequest,
            settle: &'static str,
        }

        debug!("Placing price-triggered order");
        let body = WithSettle {
            order,
            settle: self.client.settle().as_str(),
        };
        let req = RestRequest::post(self.client.futures_path("/price_orders"))
            .json(&body)?
            .private();
        self.client.dispatch(req).await
    }

    /// List price-triggered orders
    ///
    /// # Arguments
    /// * `status` - `open` or `finished`
    /// * `query` - Honours `limit` and `offset`
    #[instrument(skip(self))]
    pub async fn price_orders(
        &self,
        status: OrderStatus,
        contract: Option<&str>,
        query: &HistoryQuery,
    ) -> RestResult<Vec<PriceTriggeredOrder>> {
        debug!("Fetching {} price-triggered orders", status);
        let params = Params::new()
            .with("status", status)
            .with_opt("contract", contract)
            .with_opt("limit", query.limit)
            .with_opt("offset", query.offset);

        let req = RestRequest::get(self.client.futures_path("/price_orders"))
            .query(params)
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel all open price-triggered orders of a contract
    #[instrument(skip(self))]
    pub async fn cancel_price_orders(&self, contract: &str) -> RestResult<Vec<PriceTriggeredOrder>> {
        debug!("Cancelling price-triggered orders for {}", contract);
        let req = RestRequest::delete(self.client.futures_path("/price_orders"))
            .param("contract", contract)
            .private();
        self.client.dispatch(req).await
    }

    /// Get a price-triggered order
    #[instrument(skip(self))]
    pub async fn price_order(&self, order_id: &str) -> RestResult<PriceTriggeredOrder> {
        debug!("Fetching price-triggered order {}", order_id);
        let req = RestRequest::get(self.price_order_path(order_id)?).private();
        self.client.dispatch(req).await
    }

    /// Cancel a price-triggered order
    #[instrument(skip(self))]
    pub async fn cancel_price_order(&self, order_id: &str) -> RestResult<PriceTriggeredOrder> {
        debug!("Cancelling price-triggered order {}", order_id);
        let req = RestRequest::delete(self.price_order_path(order_id)?).private();
        self.client.dispatch(req).await
    }

    /// Arm or disarm the countdown that cancels all orders
    #[instrument(skip(self))]
    pub async fn countdown_cancel_all(&self, countdown: &CountdownCancelAll) -> RestResult<()> {
        debug!("Setting countdown cancel to {}s", countdown.timeout);
        let req = RestRequest::post(self.client.futures_path("/countdown_cancel_all"))
            .json(countdown)?
            .private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }

    fn order_path(&self, order_id: &str) -> RestResult<String> {
        self.client.item_path("/orders", order_id)
    }

    fn price_order_path(&self, order_id: &str) -> RestResult<String> {
        self.client.item_path("/price_orders", order_id)
    }
}
