//! Common test utilities and fixtures for XT.com integration tests
//!
//! Fixtures are wrapped in the `{returnCode, msgInfo, error, result}` envelope
//! the exchange puts around every response.

#![allow(dead_code)]

use std::time::Duration;

use hmac::{Hmac, Mac};
use perp_xt::{ClientConfig, Credentials, XtClient};
use sha2::Sha256;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-xt-key";
pub const API_SECRET: &str = "test-xt-secret";

pub const TICKER: &str = r#"{
    "s": "btc_usdt",
    "t": 1700000000000,
    "c": "65000.1",
    "o": "64000",
    "h": "66000",
    "l": "63000",
    "a": "123456.7",
    "v": "1.9",
    "r": "0.0156"
}"#;

pub const DEPTH: &str = r#"{
    "s": "btc_usdt",
    "t": 1700000000000,
    "u": 77,
    "a": [["65000.2", "12"], ["65000.5", "4"]],
    "b": [["65000", "30"]]
}"#;

pub const BALANCES: &str = r#"[{
    "coin": "usdt",
    "walletBalance": "1000.5",
    "availableBalance": "900.25",
    "isolatedMargin": "0",
    "crossedMargin": "100.25",
    "openOrderMarginFrozen": "0",
    "bonus": "0",
    "coupon": "0"
}]"#;

pub const ORDER: &str = r#"{
    "orderId": 387276361016770176,
    "clientOrderId": "abc",
    "symbol": "btc_usdt",
    "orderSide": "BUY",
    "orderType": "LIMIT",
    "positionSide": "LONG",
    "timeInForce": "GTC",
    "price": "30000",
    "origQty": "10",
    "executedQty": "4",
    "avgPrice": "30000",
    "marginFrozen": "12",
    "closeProfit": "0",
    "state": "PARTIALLY_FILLED",
    "createdTime": 1700000000000
}"#;

/// Wrap a result payload in a successful envelope
pub fn ok(result: &str) -> String {
    format!(
        r#"{{"returnCode":0,"msgInfo":"success","error":null,"result":{}}}"#,
        result
    )
}

/// A rejection envelope
pub fn rejected(code: i64, message: &str) -> String {
    format!(
        r#"{{"returnCode":{},"msgInfo":"{}","error":null,"result":null}}"#,
        code, message
    )
}

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new().with_base_url(server.uri())
}

pub fn public_client(server: &MockServer) -> XtClient {
    XtClient::with_config(config(server)).unwrap()
}

pub fn private_client(server: &MockServer) -> XtClient {
    XtClient::with_config(config(server).with_credentials(credentials())).unwrap()
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> XtClient {
    XtClient::with_config(config(server).with_timeout(timeout)).unwrap()
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

pub fn body_text(request: &Request) -> String {
    String::from_utf8(request.body.clone()).unwrap()
}

/// Decode a form body into sorted pairs
pub fn form_pairs(request: &Request) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(&request.body).unwrap()
}

/// Recompute the XT signature from what actually reached the server
pub fn expected_signature(request: &Request) -> String {
    let mut payload = format!(
        "validate-appkey={}&validate-timestamp={}#{}",
        API_KEY,
        header(request, "validate-timestamp").unwrap(),
        request.url.path()
    );

    let query = request.url.query().unwrap_or("");
    let method = request.method.as_str();
    if (method == "GET" || method == "DELETE") && !query.is_empty() {
        payload.push('#');
        payload.push_str(query);
    }
    let body = body_text(request);
    if !body.is_empty() {
        payload.push('#');
        payload.push_str(&body);
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(API_SECRET.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
