//! XT.com response envelope
//!
//! Every response, successful or not, is wrapped as
//! `{"returnCode": 0, "msgInfo": "success", "error": null, "result": ...}`.
//! A non-zero `returnCode` is a rejection whatever the HTTP status.

use perp_rest::{decode_json, ErrorCode, ExchangeError, RestError, RestResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// The common response wrapper
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XtResponse<T> {
    pub return_code: i64,
    #[serde(default)]
    pub msg_info: String,
    /// `null` or an object such as `{"code": "...", "msg": "..."}`
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> XtResponse<T> {
    pub fn is_success(&self) -> bool {
        self.return_code == 0
    }

    /// Convert a rejected envelope into an exchange error
    pub fn to_error(&self, status: u16) -> ExchangeError {
        let detail = match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        };

        ExchangeError {
            exchange: crate::EXCHANGE,
            status,
            code: ErrorCode::Numeric(self.return_code),
            message: self.msg_info.clone(),
            detail,
        }
    }
}

/// Parse an XT.com error body
///
/// Returns `None` unless the body is an envelope with a non-zero `returnCode`.
pub fn parse_error(status: u16, body: &str) -> Option<ExchangeError> {
    let envelope: XtResponse<Value> = serde_json::from_str(body).ok()?;
    if envelope.is_success() {
        return None;
    }
    Some(envelope.to_error(status))
}

/// Unwrap the `result` of a 2xx envelope
///
/// A missing or `null` result decodes as JSON `null`.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> RestResult<T> {
    let envelope: XtResponse<Value> = decode_json(body)?;
    if !envelope.is_success() {
        return Err(RestError::Exchange(envelope.to_error(status)));
    }

    let result = envelope.result.unwrap_or(Value::Null);
    serde_json::from_value(result).map_err(|source| RestError::Decode {
        source,
        body: body.to_string(),
    })
}
