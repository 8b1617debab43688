//! Shared REST plumbing for the futures exchange clients
//!
//! This crate turns a logical API call into signed HTTP traffic and turns the
//! response into a typed value or a classified error.
//!
//! # Components
//!
//! - [`RestRequest`] / [`Params`]: describe a call; parameters are always
//!   emitted in sorted key order
//! - [`PreparedRequest`]: the exact path, query and body that are both
//!   signed and transmitted
//! - [`Dispatcher`]: one HTTP attempt with timeout and cancellation
//! - [`ExchangeClient`]: per-exchange signing and error shapes behind a
//!   shared `dispatch` pipeline
//!
//! # Errors
//!
//! Every call returns [`RestResult`]. [`RestError`] separates failures
//! detected before I/O ([`RestError::AuthRequired`]), transport failures,
//! exchange rejections ([`RestError::Exchange`]), error bodies of an unknown
//! shape, and success bodies that fail to decode.

pub mod dispatcher;
pub mod error;
pub mod exchange;
pub mod request;

pub use dispatcher::{Dispatcher, RawResponse, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use error::{ErrorCode, ExchangeError, RestError, RestResult};
pub use exchange::{decode_json, ExchangeClient};
pub use request::{Access, Body, Params, PreparedRequest, RestRequest};

// Re-exported so clients can take them without naming the underlying crates
pub use perp_auth::{Credentials, SignedEnvelope, Signer};
pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;
