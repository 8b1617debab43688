//! HTTP integration tests for the XT.com client
//!
//! Drives the client against a local mock server and checks what reaches
//! the wire as well as how envelopes are classified.

mod common;

use std::time::Duration;

use common::*;
use perp_rest::{ExchangeClient, RestRequest};
use perp_xt::{
    CancellationToken, ClientConfig, CursorQuery, Direction, MarginAdjust, OrderListQuery,
    OrderSide, PlaceOrderRequest, PositionSide, RestError, Underlying, XtClient,
};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_public_ticker_never_signed() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/market/v1/public/q/ticker"))
        .and(query_param("symbol", "btc_usdt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(TICKER)))
        .expect(1)
        .mount(&server)
        .await;

    // Credentials present, still unsigned
    let client = private_client(&server);
    let ticker = client.get_ticker("btc_usdt").await.unwrap();

    assert_eq!(ticker.symbol, "btc_usdt");
    assert_eq!(ticker.close, dec!(65000.1));

    let requests = server.received_requests().await.unwrap();
    assert!(header(&requests[0], "validate-appkey").is_none());
    assert!(header(&requests[0], "validate-signature").is_none());
}

#[tokio::test]
async fn test_depth_levels() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/market/v1/public/q/depth"))
        .and(query_param("symbol", "btc_usdt"))
        .and(query_param("level", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(DEPTH)))
        .expect(1)
        .mount(&server)
        .await;

    let depth = public_client(&server).get_depth("btc_usdt", 5).await.unwrap();

    assert_eq!(depth.asks.len(), 2);
    assert_eq!(depth.best_bid(), Some(dec!(65000)));
    assert_eq!(depth.spread(), Some(dec!(0.2)));
}

#[tokio::test]
async fn test_coin_underlying_routes_to_coin_host() {
    let usdt = setup_mock_server().await;
    let coin = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/market/v1/public/time"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("1700000000000")))
        .expect(1)
        .mount(&coin)
        .await;

    let client = XtClient::with_config(
        ClientConfig::new()
            .with_usdt_base_url(usdt.uri())
            .with_coin_base_url(coin.uri())
            .with_underlying(Underlying::CoinMargined),
    )
    .unwrap();

    assert_eq!(client.market().server_time().await.unwrap(), 1_700_000_000_000);
    assert!(usdt.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cursor_query_on_the_wire() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/market/v1/public/q/funding-rate-record"))
        .and(query_param("symbol", "btc_usdt"))
        .and(query_param("direction", "NEXT"))
        .and(query_param("id", "42"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(
            r#"{"hasPrev":true,"hasNext":false,"items":[]}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let query = CursorQuery::new().from_id(42, Direction::Next).limit(2);
    let records = public_client(&server)
        .market()
        .funding_rate_records("btc_usdt", &query)
        .await
        .unwrap();

    assert!(records.has_prev);
    assert!(!records.has_next);
    assert!(records.items.is_empty());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_private_call_without_credentials_never_sends() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(BALANCES)))
        .expect(0)
        .mount(&server)
        .await;

    let client = public_client(&server);
    assert!(matches!(client.get_balances().await, Err(RestError::AuthRequired)));

    let req = RestRequest::get("/future/user/v1/balance/list").private();
    let result: Result<serde_json::Value, _> = client.dispatch(req).await;
    assert!(matches!(result, Err(RestError::AuthRequired)));
}

#[tokio::test]
async fn test_private_get_signature_covers_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/trade/v1/order/list"))
        .and(query_param("symbol", "btc_usdt"))
        .and(query_param("state", "NEW"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(&format!(
            r#"{{"items":[{}],"page":1,"ps":10,"total":1}}"#,
            ORDER
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let query = OrderListQuery::new().state("NEW").symbol("btc_usdt");
    let page = client.trading().unwrap().orders(&query).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].remaining(), dec!(6));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(request.url.query(), Some("state=NEW&symbol=btc_usdt"));
    assert_eq!(header(request, "validate-appkey"), Some(API_KEY));
    assert_eq!(header(request, "validate-timestamp").map(str::len), Some(13));
    assert_eq!(
        header(request, "validate-signature"),
        Some(expected_signature(request).as_str())
    );
    assert!(header(request, "validate-recvwindow").is_none());
}

#[tokio::test]
async fn test_form_post_signs_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/future/user/v1/position/margin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("null")))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    client
        .account()
        .unwrap()
        .adjust_margin("btc_usdt", dec!(12.5), MarginAdjust::Add, Some(PositionSide::Long))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(
        body_text(request),
        "margin=12.5&positionSide=LONG&symbol=btc_usdt&type=ADD"
    );
    assert_eq!(
        header(request, "content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        header(request, "validate-signature"),
        Some(expected_signature(request).as_str())
    );
}

#[tokio::test]
async fn test_recv_window_header_only_when_configured() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/user/v1/balance/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(BALANCES)))
        .mount(&server)
        .await;

    let client = XtClient::with_config(
        config(&server)
            .with_credentials(credentials())
            .with_recv_window(3000),
    )
    .unwrap();
    let balances = client.get_balances().await.unwrap();
    assert_eq!(balances[0].available_balance, dec!(900.25));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(header(&requests[0], "validate-recvwindow"), Some("3000"));
    // Window is not part of the signed payload
    assert_eq!(
        header(&requests[0], "validate-signature"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_compat_balances_signed_with_account_filter() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/user/v1/compat/balance/list"))
        .and(query_param("queryAccountId", "9001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(
            r#"[{"accountId":9001,"userId":7,"coin":"usdt","underlyingType":2,
                "walletBalance":"1000.5","amount":"990","totalAmount":"1010",
                "notProfit":"-3.2"}]"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let balances = client
        .account()
        .unwrap()
        .compat_balances(Some("9001"))
        .await
        .unwrap();

    assert_eq!(balances[0].account_id, 9001);
    assert_eq!(balances[0].underlying(), Some(Underlying::UsdtMargined));
    assert_eq!(balances[0].not_profit, dec!(-3.2));

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(request.url.query(), Some("queryAccountId=9001"));
    assert_eq!(
        header(request, "validate-signature"),
        Some(expected_signature(request).as_str())
    );
}

#[tokio::test]
async fn test_compat_balances_without_filter_sends_no_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/future/user/v1/compat/balance/list"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let balances = private_client(&server)
        .account()
        .unwrap()
        .compat_balances(None)
        .await
        .unwrap();
    assert!(balances.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
    assert!(header(&requests[0], "validate-signature").is_some());
}

// =============================================================================
// Trading
// =============================================================================

#[tokio::test]
async fn test_place_order_json_body_is_signed_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/future/trade/v1/order/create"))
        .and(body_json(json!({
            "clientOrderId": "abc",
            "symbol": "btc_usdt",
            "orderSide": "BUY",
            "orderType": "LIMIT",
            "origQty": "10",
            "price": "30000",
            "timeInForce": "GTX",
            "positionSide": "LONG"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(r#""387276361016770176""#)))
        .expect(1)
        .mount(&server)
        .await;

    let order = PlaceOrderRequest::limit(
        "btc_usdt",
        OrderSide::Buy,
        PositionSide::Long,
        dec!(10),
        dec!(30000),
    )
    .with_client_order_id("abc")
    .post_only();
    let id = private_client(&server).place_order(&order).await.unwrap();
    assert_eq!(id.as_deref(), Some("387276361016770176"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(header(&requests[0], "content-type"), Some("application/json"));
    assert_eq!(
        header(&requests[0], "validate-signature"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_batch_orders_sent_as_list_field() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/future/trade/v2/order/create-batch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("true")))
        .expect(1)
        .mount(&server)
        .await;

    let orders = vec![
        PlaceOrderRequest::market("btc_usdt", OrderSide::Buy, PositionSide::Long, dec!(1)),
        PlaceOrderRequest::market("eth_usdt", OrderSide::Sell, PositionSide::Short, dec!(2)),
    ];
    let placed = private_client(&server)
        .trading()
        .unwrap()
        .place_batch_orders(&orders)
        .await
        .unwrap();
    assert!(placed);

    let requests = server.received_requests().await.unwrap();
    let pairs = form_pairs(&requests[0]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "list");

    let list: serde_json::Value = serde_json::from_str(&pairs[0].1).unwrap();
    assert_eq!(list[0]["symbol"], "btc_usdt");
    assert_eq!(list[1]["orderSide"], "SELL");
    assert_eq!(list[1]["origQty"], "2");
}

#[tokio::test]
async fn test_invalid_orders_rejected_before_sending() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("true")))
        .expect(0)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let trading = client.trading().unwrap();

    let err = trading.place_batch_orders(&[]).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)), "{:?}", err);

    let mut no_price = PlaceOrderRequest::limit(
        "btc_usdt",
        OrderSide::Buy,
        PositionSide::Long,
        dec!(1),
        dec!(30000),
    );
    no_price.price = None;
    let err = trading.place_order(&no_price).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)), "{:?}", err);
}

#[tokio::test]
async fn test_cancel_all_without_symbol_sends_empty_symbol() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/future/trade/v1/order/cancel-all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("true")))
        .expect(1)
        .mount(&server)
        .await;

    let cancelled = private_client(&server)
        .trading()
        .unwrap()
        .cancel_all_orders(None)
        .await
        .unwrap();
    assert!(cancelled);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(body_text(&requests[0]), "symbol=");
}

#[tokio::test]
async fn test_cancel_tolerates_empty_object_result() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/future/trade/v1/order/cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok("{}")))
        .expect(1)
        .mount(&server)
        .await;

    let id = private_client(&server).cancel_order(7).await.unwrap();
    assert_eq!(id.as_deref(), None);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(body_text(&requests[0]), "orderId=7");
}

// =============================================================================
// Error Handling
// =============================================================================

#[tokio::test]
async fn test_rejection_on_http_200() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rejected(1, "bar")))
        .mount(&server)
        .await;

    let err = public_client(&server).get_ticker("btc_usdt").await.unwrap_err();
    match err {
        RestError::Exchange(e) => {
            assert_eq!(e.status, 200);
            assert_eq!(e.code(), Some(1));
            assert_eq!(e.message, "bar");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_on_http_400() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"returnCode":1,"msgInfo":"failure","error":{"code":"invalid_symbol","msg":"bad symbol"},"result":null}"#,
        ))
        .mount(&server)
        .await;

    let err = public_client(&server).get_ticker("nope").await.unwrap_err();
    assert!(!err.is_retryable());
    match err {
        RestError::Exchange(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.code(), Some(1));
            assert!(e.detail.unwrap().contains("invalid_symbol"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_html_gateway_error_is_unexpected_response() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = public_client(&server).get_ticker("btc_usdt").await.unwrap_err();
    assert!(err.is_retryable());
    match err {
        RestError::UnexpectedResponse { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ok(r#"{"s":"btc_usdt"}"#)))
        .mount(&server)
        .await;

    let err = public_client(&server).get_ticker("btc_usdt").await.unwrap_err();
    assert!(matches!(err, RestError::Decode { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_timeout() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ok(TICKER))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, Duration::from_millis(100));
    let err = client.get_ticker("btc_usdt").await.unwrap_err();
    assert!(matches!(err, RestError::Timeout), "{:?}", err);
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_call() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ok(TICKER))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let client = public_client(&server).with_cancellation(token.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let err = client.get_ticker("btc_usdt").await.unwrap_err();
    assert!(matches!(err, RestError::Cancelled), "{:?}", err);
    canceller.await.unwrap();
}
