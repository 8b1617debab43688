//! Common test utilities and fixtures for Gate.io integration tests
//!
//! Response bodies are trimmed copies of documented API v4 payloads.

#![allow(dead_code)]

use std::time::Duration;

use hmac::{Hmac, Mac};
use perp_gateio::{ClientConfig, Credentials, GateClient};
use sha2::{Digest, Sha512};
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "test-gate-key";
pub const API_SECRET: &str = "test-gate-secret";

/// Tickers for a single contract
pub const TICKERS: &str = r#"[{
    "contract": "BTC_USDT",
    "last": "65000.1",
    "change_percentage": "1.2",
    "total_size": "123456",
    "low_24h": "63000",
    "high_24h": "66000",
    "volume_24h": "1000",
    "mark_price": "65001.2",
    "funding_rate": "0.0001",
    "funding_rate_indicative": "0.0001",
    "index_price": "65000.9",
    "highest_bid": "65000",
    "lowest_ask": "65000.2"
}]"#;

/// Order book without id
pub const ORDER_BOOK: &str = r#"{
    "current": 1700000000.123,
    "update": 1700000000.100,
    "asks": [{"p": "65000.2", "s": 120}, {"p": "65000.5", "s": 40}],
    "bids": [{"p": "65000", "s": 300}]
}"#;

/// Futures account
pub const ACCOUNT: &str = r#"{
    "user": 1666,
    "currency": "USDT",
    "total": "9707.803567115145",
    "unrealised_pnl": "3371.248828",
    "position_margin": "38.712189181",
    "order_margin": "0",
    "available": "9669.091377934145",
    "point": "0",
    "bonus": "0",
    "in_dual_mode": false,
    "history": {"dnw": "10000", "pnl": "68.3685", "fee": "-1.645812875", "fund": "-0.000"}
}"#;

/// Order returned after placement
pub const ORDER: &str = r#"{
    "id": 15675394,
    "user": 100000,
    "contract": "BTC_USDT",
    "create_time": 1546569968.0,
    "size": 6024,
    "iceberg": 0,
    "left": 6024,
    "price": "3765",
    "fill_price": "0",
    "status": "open",
    "tif": "gtc",
    "text": "t-my-custom-id",
    "tkfr": "0.0005",
    "mkfr": "-0.00025"
}"#;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

pub fn public_client(server: &MockServer) -> GateClient {
    GateClient::with_config(ClientConfig::new().with_base_url(server.uri())).unwrap()
}

pub fn private_client(server: &MockServer) -> GateClient {
    GateClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_credentials(credentials()),
    )
    .unwrap()
}

pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> GateClient {
    GateClient::with_config(
        ClientConfig::new()
            .with_base_url(server.uri())
            .with_timeout(timeout),
    )
    .unwrap()
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

/// Recompute the Gate.io signature from what actually reached the server
pub fn expected_signature(request: &Request) -> String {
    let body = String::from_utf8(request.body.clone()).unwrap();
    let body_hash = hex::encode(Sha512::digest(body.as_bytes()));
    let payload = format!(
        "{}\n{}\n{}\n{}\n{}",
        request.method.as_str(),
        request.url.path(),
        request.url.query().unwrap_or(""),
        body_hash,
        header(request, "Timestamp").unwrap()
    );

    let mut mac = Hmac::<Sha512>::new_from_slice(API_SECRET.as_bytes()).unwrap();
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
