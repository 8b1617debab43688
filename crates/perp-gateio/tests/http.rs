//! HTTP integration tests for the Gate.io client
//!
//! Drives the client against a local mock server and checks what reaches
//! the wire as well as how responses are classified.

mod common;

use std::time::Duration;

use common::*;
use perp_gateio::{
    AmendOrder, CancellationToken, CandleQuery, CountdownCancelAll, CreateFuturesOrderRequest,
    CreatePriceOrderRequest, HistoryQuery, OrderStatus, RestError, Settle, TriggerRule,
};
use perp_rest::{ExchangeClient, RestRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wiremock::matchers::{self, body_json, body_string, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_public_tickers_unsigned_without_credentials() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/tickers"))
        .and(query_param("contract", "BTC_USDT"))
        .and(matchers::header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TICKERS))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server);
    let tickers = client.get_tickers(Some("BTC_USDT")).await.unwrap();

    assert_eq!(tickers.len(), 1);
    assert_eq!(tickers[0].last_price(), Some(dec!(65000.1)));
    assert_eq!(tickers[0].mid_price(), Some(dec!(65000.1)));

    let requests = server.received_requests().await.unwrap();
    assert!(header(&requests[0], "KEY").is_none());
    assert!(header(&requests[0], "SIGN").is_none());
}

#[tokio::test]
async fn test_public_call_signed_when_credentials_present() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/tickers"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TICKERS))
        .mount(&server)
        .await;

    let client = private_client(&server);
    client.market().tickers(None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(header(&requests[0], "KEY"), Some(API_KEY));
    assert_eq!(
        header(&requests[0], "SIGN"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_order_book_tagged_with_contract() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/btc/order_book"))
        .and(query_param("contract", "BTC_USD"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORDER_BOOK))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server).with_settle(Settle::Btc);
    let book = client.get_order_book("BTC_USD", Some(2)).await.unwrap();

    assert_eq!(book.contract, "BTC_USD");
    assert_eq!(book.best_bid(), Some(dec!(65000)));
    assert_eq!(book.spread(), Some(dec!(0.2)));
}

#[tokio::test]
async fn test_candlesticks_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/candlesticks"))
        .and(query_param("contract", "ETH_USDT"))
        .and(query_param("interval", "1h"))
        .and(query_param("from", "1700000000"))
        .and(query_param("to", "1700003600"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"t":1700000000,"v":97,"c":"2010.5","h":"2020","l":"2000","o":"2001","sum":"195000.5"}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = public_client(&server);
    let candles = client
        .market()
        .candlesticks(
            "ETH_USDT",
            &CandleQuery::new().interval("1h").range(1_700_000_000, 1_700_003_600),
        )
        .await
        .unwrap();

    assert_eq!(candles.len(), 1);
    assert_eq!(candles[0].c, dec!(2010.5));
    assert_eq!(candles[0].v, Some(97));
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_private_call_without_credentials_never_sends() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACCOUNT))
        .expect(0)
        .mount(&server)
        .await;

    let client = public_client(&server);

    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));

    // The shared pipeline refuses as well
    let err = client
        .dispatch::<serde_json::Value>(RestRequest::get("/futures/usdt/accounts").private())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::AuthRequired));
}

#[tokio::test]
async fn test_private_get_signature_matches_wire() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/orders"))
        .and(query_param("status", "open"))
        .and(query_param("contract", "BTC_USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("[{}]", ORDER)))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let orders = client
        .trading()
        .unwrap()
        .orders(OrderStatus::Open, Some("BTC_USDT"), &HistoryQuery::new().limit(10))
        .await
        .unwrap();
    assert_eq!(orders[0].id, 15675394);

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(request.url.query(), Some("contract=BTC_USDT&limit=10&status=open"));
    assert_eq!(header(request, "SIGN"), Some(expected_signature(request).as_str()));
    assert_eq!(header(request, "Timestamp").map(str::len), Some(10));
}

#[tokio::test]
async fn test_create_order_wire_body_is_signed_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/futures/usdt/orders"))
        .and(matchers::header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_string(ORDER))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let order = CreateFuturesOrderRequest::limit("BTC_USDT", 6024, dec!(3765)).with_text("t-my-custom-id");
    let placed = client.create_order(&order).await.unwrap();
    assert!(placed.is_open());

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    let sent = String::from_utf8(request.body.clone()).unwrap();

    assert_eq!(sent, serde_json::to_string(&order).unwrap());
    assert_eq!(header(request, "SIGN"), Some(expected_signature(request).as_str()));
}

#[tokio::test]
async fn test_empty_body_delete_is_signed() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/futures/usdt/orders/15675394"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORDER))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    client.cancel_order("15675394").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert_eq!(header(&requests[0], "content-type"), Some("application/json"));
    assert_eq!(
        header(&requests[0], "SIGN"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_dual_comp_contracts_signed_with_contract_shape() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/btc/dual_comp/contracts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"name":"BTC_USD","type":"inverse","leverage_max":"100","order_size_min":1}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server).with_settle(Settle::Btc);
    let contracts = client.account().unwrap().dual_comp_contracts().await.unwrap();
    assert_eq!(contracts[0].name, "BTC_USD");
    assert_eq!(contracts[0].order_size_min, 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(header(&requests[0], "KEY"), Some(API_KEY));
    assert_eq!(
        header(&requests[0], "SIGN"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_dual_comp_index_constituents_keyed_by_exchange() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/dual_comp/index_constituents/BTC_USDT_DUAL"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"binance":["BTC_USDT"],"okx":["BTC_USDT","BTC_USDC"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let constituents = client
        .account()
        .unwrap()
        .dual_comp_index_constituents("BTC_USDT_DUAL")
        .await
        .unwrap();
    assert_eq!(constituents["okx"].len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        header(&requests[0], "SIGN"),
        Some(expected_signature(&requests[0]).as_str())
    );
}

#[tokio::test]
async fn test_dual_comp_endpoints_require_credentials() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = public_client(&server);
    assert!(matches!(client.account().err(), Some(RestError::AuthRequired)));

    let req = RestRequest::get("/futures/usdt/dual_comp/contracts").private();
    let result: Result<serde_json::Value, _> = client.dispatch(req).await;
    assert!(matches!(result, Err(RestError::AuthRequired)));
}

// =============================================================================
// Trading Endpoints
// =============================================================================

#[tokio::test]
async fn test_open_orders_require_contract() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client
        .trading()
        .unwrap()
        .orders(OrderStatus::Open, None, &HistoryQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)));
}

#[tokio::test]
async fn test_batch_cancel_sends_id_array() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v4/futures/usdt/orders"))
        .and(body_string(r#"["1","2"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let cancelled = client.trading().unwrap().cancel_orders(&["1", "2"]).await.unwrap();
    assert!(cancelled.is_empty());
}

#[tokio::test]
async fn test_amend_order_uses_query() {
    let server = setup_mock_server().await;
    Mock::given(method("PUT"))
        .and(path("/api/v4/futures/usdt/orders/15675394"))
        .and(query_param("price", "3770.5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ORDER))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    client
        .trading()
        .unwrap()
        .amend_order("15675394", &AmendOrder::default().price(dec!(3770.5)))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_price_order_carries_settle() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/futures/usdt/price_orders"))
        .and(body_json(serde_json::json!({
            "initial": {"contract": "BTC_USDT", "size": -1, "price": "0", "tif": "ioc"},
            "trigger": {"price_type": 0, "price": "60000", "rule": 2, "expiration": 0},
            "settle": "usdt"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":1432329}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    let order = CreatePriceOrderRequest::new(
        "BTC_USDT",
        -1,
        Decimal::ZERO,
        dec!(60000),
        TriggerRule::LessOrEqual,
    );
    let created = client.trading().unwrap().create_price_order(&order).await.unwrap();
    assert_eq!(created.id, 1432329);
}

#[tokio::test]
async fn test_countdown_ignores_result_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/futures/usdt/countdown_cancel_all"))
        .and(body_json(serde_json::json!({"timeout": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"triggerTime":1700000030}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server);
    client
        .trading()
        .unwrap()
        .countdown_cancel_all(&CountdownCancelAll {
            timeout: 30,
            contract: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ids_that_reshape_the_url_never_send() {
    let server = setup_mock_server().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_string(ORDER))
        .expect(0)
        .mount(&server)
        .await;

    let client = private_client(&server);
    for id in ["1?contract=ETH_USDT", "1#x", "a b", "../accounts"] {
        let err = client.cancel_order(id).await.unwrap_err();
        assert!(matches!(err, RestError::InvalidParameter(_)), "{}: {:?}", id, err);
    }

    let err = client.market().contract("BTC_USDT/x").await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)), "{:?}", err);

    let err = client.account().unwrap().position("BTC USDT").await.unwrap_err();
    assert!(matches!(err, RestError::InvalidParameter(_)), "{:?}", err);
}

// =============================================================================
// Error Classification
// =============================================================================

#[tokio::test]
async fn test_labelled_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/accounts"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"label":"INVALID_PARAM","message":"foo"}"#),
        )
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client.get_account().await.unwrap_err();
    let exchange = err.exchange().expect("exchange error");

    assert_eq!(exchange.label(), Some("INVALID_PARAM"));
    assert_eq!(exchange.message, "foo");
    assert_eq!(exchange.status, 400);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_unrecognized_error_keeps_status_and_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = public_client(&server);
    let err = client.market().contracts().await.unwrap_err();
    match err {
        RestError::UnexpectedResponse { status, ref body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        ref other => panic!("unexpected {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/futures/usdt/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"total":"abc"}"#))
        .mount(&server)
        .await;

    let client = private_client(&server);
    let err = client.get_account().await.unwrap_err();
    assert!(matches!(err, RestError::Decode { .. }), "{:?}", err);
}

// =============================================================================
// Deadlines and Cancellation
// =============================================================================

#[tokio::test]
async fn test_timeout() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(TICKERS)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = client_with_timeout(&server, Duration::from_millis(100));
    let err = client.get_tickers(None).await.unwrap_err();
    assert!(matches!(err, RestError::Timeout), "{:?}", err);
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_call() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(TICKERS)
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

    let err = client.get_tickers(None).await.unwrap_err();
    assert!(matches!(err, RestError::Cancelled), "{:?}", err);
    canceller.await.unwrap();
}
