//! Gate.io error body

use perp_rest::{ErrorCode, ExchangeError};
use serde::Deserialize;

/// Error body returned with non-2xx statuses: `{"label": "...", "message": "..."}`
#[derive(Debug, Clone, Deserialize)]
pub struct GateApiError {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub message: String,
}

/// Parse a Gate.io error body
///
/// Returns `None` unless the body is JSON with a non-empty `label`.
pub fn parse_error(status: u16, body: &str) -> Option<ExchangeError> {
    let err: GateApiError = serde_json::from_str(body).ok()?;
    if err.label.is_empty() {
        return None;
    }

    Some(ExchangeError {
        exchange: crate::EXCHANGE,
        status,
        code: ErrorCode::Label(err.label),
        message: err.message,
        detail: None,
    })
}
