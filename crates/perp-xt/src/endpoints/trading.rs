//! Private trading endpoints
//!
//! These endpoints require authentication. Order placement and updates
//! send JSON bodies; cancels and track orders send form bodies.

use perp_rest::{ExchangeClient, Params, RestError, RestRequest, RestResult};
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use crate::client::XtClient;
use crate::types::{
    CreatePlanOrderRequest, CreateProfitStopRequest, CreateTrackOrderRequest, Cursor,
    CursorQuery, EntityId, EntrustListQuery, Fill, FillQuery, Order, OrderListQuery, Page,
    PageQuery, PlaceOrderRequest, PlanOrder, ProfitStop, TrackOrder, UpdateOrderRequest,
    UpdateProfitStopRequest,
};

const ORDER: &str = "/future/trade/v1/order";
const ENTRUST: &str = "/future/trade/v1/entrust";

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a XtClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a XtClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// Limit orders without a price are rejected before any request is sent.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, side = %order.order_side))]
    pub async fn place_order(&self, order: &PlaceOrderRequest) -> RestResult<EntityId> {
        order.validate()?;
        debug!("Placing order");
        let req = RestRequest::post(format!("{}/create", ORDER))
            .json(order)?
            .private();
        self.client.dispatch(req).await
    }

    /// Place several orders at once
    ///
    /// The orders travel as a JSON array in the `list` form field.
    #[instrument(skip(self, orders), fields(count = orders.len()))]
    pub async fn place_batch_orders(&self, orders: &[PlaceOrderRequest]) -> RestResult<bool> {
        if orders.is_empty() {
            return Err(RestError::InvalidParameter("no orders to place".to_string()));
        }
        for order in orders {
            order.validate()?;
        }

        debug!("Placing {} orders", orders.len());
        let list = serde_json::to_string(orders).map_err(RestError::Serialize)?;
        let req = RestRequest::post("/future/trade/v2/order/create-batch")
            .form(Params::new().with("list", list))
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: i64) -> RestResult<EntityId> {
        debug!("Cancelling order {}", order_id);
        let req = RestRequest::post(format!("{}/cancel", ORDER))
            .form(Params::new().with("orderId", order_id))
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel all orders, of one symbol or of every symbol
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self, symbol: Option<&str>) -> RestResult<bool> {
        debug!("Cancelling all orders");
        // An empty symbol means every symbol
        let req = RestRequest::post(format!("{}/cancel-all", ORDER))
            .form(Params::new().with("symbol", symbol.unwrap_or("")))
            .private();
        self.client.dispatch(req).await
    }

    /// Get an order by id
    #[instrument(skip(self))]
    pub async fn order(&self, order_id: i64) -> RestResult<Order> {
        debug!("Fetching order {}", order_id);
        let req = RestRequest::get(format!("{}/detail", ORDER))
            .param("orderId", order_id)
            .private();
        self.client.dispatch(req).await
    }

    /// List orders
    #[instrument(skip(self))]
    pub async fn orders(&self, query: &OrderListQuery) -> RestResult<Page<Order>> {
        debug!("Fetching orders");
        let req = RestRequest::get(format!("{}/list", ORDER))
            .query(query.params())
            .private();
        self.client.dispatch(req).await
    }

    /// List finished orders of a symbol
    #[instrument(skip(self))]
    pub async fn order_history(&self, symbol: &str, query: &CursorQuery) -> RestResult<Cursor<Order>> {
        debug!("Fetching order history for {}", symbol);
        let req = RestRequest::get(format!("{}/list-history", ORDER))
            .query(cursor_params(symbol, query))
            .private();
        self.client.dispatch(req).await
    }

    /// List fills
    #[instrument(skip(self))]
    pub async fn fills(&self, query: &FillQuery) -> RestResult<Page<Fill>> {
        debug!("Fetching fills");
        let req = RestRequest::get(format!("{}/trade-list", ORDER))
            .query(query.params())
            .private();
        self.client.dispatch(req).await
    }

    /// Change price, size or attached triggers of an open order
    #[instrument(skip(self, update), fields(order_id = update.order_id))]
    pub async fn update_order(&self, update: &UpdateOrderRequest) -> RestResult<()> {
        debug!("Updating order");
        let req = RestRequest::post(format!("{}/update", ORDER))
            .json(update)?
            .private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }

    // ========================================================================
    // Plan (Trigger) Orders
    // ========================================================================

    /// Create a plan order
    ///
    /// Limit entrust types without a price are rejected before any request
    /// is sent.
    #[instrument(skip(self, order), fields(symbol = %order.symbol, entrust_type = %order.entrust_type))]
    pub async fn create_plan_order(&self, order: &CreatePlanOrderRequest) -> RestResult<EntityId> {
        order.validate()?;
        debug!("Creating plan order");
        let req = RestRequest::post(format!("{}/create-plan", ENTRUST))
            .json(order)?
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel a plan order
    #[instrument(skip(self))]
    pub async fn cancel_plan_order(&self, entrust_id: i64) -> RestResult<()> {
        debug!("Cancelling plan order {}", entrust_id);
        self.post_form("/cancel-plan", Params::new().with("entrustId", entrust_id))
            .await
    }

    /// Cancel every plan order of a symbol
    #[instrument(skip(self))]
    pub async fn cancel_all_plan_orders(&self, symbol: &str) -> RestResult<()> {
        debug!("Cancelling plan orders for {}", symbol);
        self.post_form("/cancel-all-plan", Params::new().with("symbol", symbol))
            .await
    }

    /// List plan orders
    #[instrument(skip(self))]
    pub async fn plan_orders(&self, query: &EntrustListQuery) -> RestResult<Page<PlanOrder>> {
        debug!("Fetching plan orders for {}", query.symbol);
        self.get(format!("{}/plan-list", ENTRUST), query.params()).await
    }

    /// Get a plan order
    #[instrument(skip(self))]
    pub async fn plan_order(&self, entrust_id: i64) -> RestResult<PlanOrder> {
        debug!("Fetching plan order {}", entrust_id);
        self.get(
            format!("{}/plan-detail", ENTRUST),
            Params::new().with("entrustId", entrust_id),
        )
        .await
    }

    /// List finished plan orders of a symbol
    #[instrument(skip(self))]
    pub async fn plan_order_history(
        &self,
        symbol: &str,
        query: &CursorQuery,
    ) -> RestResult<Cursor<PlanOrder>> {
        debug!("Fetching plan order history for {}", symbol);
        self.get(
            format!("{}/plan-list-history", ENTRUST),
            cursor_params(symbol, query),
        )
        .await
    }

    // ========================================================================
    // Take-Profit / Stop-Loss
    // ========================================================================

    /// Attach take-profit and stop-loss to a position
    #[instrument(skip(self, order), fields(symbol = %order.symbol))]
    pub async fn create_profit_stop(&self, order: &CreateProfitStopRequest) -> RestResult<EntityId> {
        debug!("Creating profit/stop order");
        let req = RestRequest::post(format!("{}/create-profit", ENTRUST))
            .json(order)?
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel a take-profit / stop-loss
    #[instrument(skip(self))]
    pub async fn cancel_profit_stop(&self, profit_id: i64) -> RestResult<()> {
        debug!("Cancelling profit/stop {}", profit_id);
        self.post_form("/cancel-profit-stop", Params::new().with("profitId", profit_id))
            .await
    }

    /// Cancel every take-profit / stop-loss of a symbol
    #[instrument(skip(self))]
    pub async fn cancel_all_profit_stops(&self, symbol: &str) -> RestResult<()> {
        debug!("Cancelling profit/stop orders for {}", symbol);
        self.post_form("/cancel-all-profit-stop", Params::new().with("symbol", symbol))
            .await
    }

    /// List take-profit / stop-loss orders
    #[instrument(skip(self))]
    pub async fn profit_stops(&self, query: &EntrustListQuery) -> RestResult<Page<ProfitStop>> {
        debug!("Fetching profit/stop orders for {}", query.symbol);
        self.get(format!("{}/profit-list", ENTRUST), query.params()).await
    }

    /// Get a take-profit / stop-loss
    #[instrument(skip(self))]
    pub async fn profit_stop(&self, profit_id: i64) -> RestResult<ProfitStop> {
        debug!("Fetching profit/stop {}", profit_id);
        self.get(
            format!("{}/profit-detail", ENTRUST),
            Params::new().with("profitId", profit_id),
        )
        .await
    }

    /// Move the trigger prices of a take-profit / stop-loss
    #[instrument(skip(self, update), fields(profit_id = update.profit_id))]
    pub async fn update_profit_stop(&self, update: &UpdateProfitStopRequest) -> RestResult<()> {
        if update.trigger_profit_price.is_none() && update.trigger_stop_price.is_none() {
            return Err(RestError::InvalidParameter(
                "update must change a trigger price".to_string(),
            ));
        }

        debug!("Updating profit/stop");
        let req = RestRequest::post(format!("{}/update-profit-stop", ENTRUST))
            .json(update)?
            .private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }

    // ========================================================================
    // Track (Trailing) Orders
    // ========================================================================

    /// Create a track order
    #[instrument(skip(self, order), fields(symbol = %order.symbol))]
    pub async fn create_track_order(&self, order: &CreateTrackOrderRequest) -> RestResult<EntityId> {
        let params = order.params()?;
        debug!("Creating track order");
        let req = RestRequest::post(format!("{}/create-track", ENTRUST))
            .form(params)
            .private();
        self.client.dispatch(req).await
    }

    /// Cancel a track order
    #[instrument(skip(self))]
    pub async fn cancel_track_order(&self, track_id: i64) -> RestResult<()> {
        debug!("Cancelling track order {}", track_id);
        self.post_form("/cancel-track", Params::new().with("trackId", track_id))
            .await
    }

    /// Get a track order
    #[instrument(skip(self))]
    pub async fn track_order(&self, track_id: i64) -> RestResult<TrackOrder> {
        debug!("Fetching track order {}", track_id);
        self.get(
            format!("{}/track-detail", ENTRUST),
            Params::new().with("trackId", track_id),
        )
        .await
    }

    /// List open track orders
    #[instrument(skip(self))]
    pub async fn track_orders(
        &self,
        symbol: Option<&str>,
        query: &PageQuery,
    ) -> RestResult<Page<TrackOrder>> {
        debug!("Fetching track orders");
        let mut params = Params::new().with_opt("symbol", symbol);
        query.apply(&mut params);
        self.get(format!("{}/track-list", ENTRUST), params).await
    }

    /// Cancel every track order
    #[instrument(skip(self))]
    pub async fn cancel_all_track_orders(&self) -> RestResult<()> {
        debug!("Cancelling all track orders");
        let req = RestRequest::post(format!("{}/cancel-all-track", ENTRUST)).private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }

    /// List finished track orders
    #[instrument(skip(self))]
    pub async fn track_order_history(
        &self,
        symbol: Option<&str>,
        query: &CursorQuery,
    ) -> RestResult<Cursor<TrackOrder>> {
        debug!("Fetching track order history");
        let mut params = Params::new().with_opt("symbol", symbol);
        query.apply(&mut params);
        self.get(format!("{}/track-list-history", ENTRUST), params).await
    }

    async fn get<T>(&self, path: String, params: Params) -> RestResult<T>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let req = RestRequest::get(path).query(params).private();
        self.client.dispatch(req).await
    }

    /// Form POST under the entrust path whose result carries nothing of interest
    async fn post_form(&self, suffix: &str, params: Params) -> RestResult<()> {
        let req = RestRequest::post(format!("{}{}", ENTRUST, suffix))
            .form(params)
            .private();
        let _: IgnoredAny = self.client.dispatch(req).await?;
        Ok(())
    }
}

fn cursor_params(symbol: &str, query: &CursorQuery) -> Params {
    let mut params = Params::new().with("symbol", symbol);
    query.apply(&mut params);
    params
}
