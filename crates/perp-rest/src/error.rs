//! Error types for REST API operations

use std::fmt;

/// How the exchange identified a rejection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// Gate.io style string label, e.g. `INVALID_PARAM`
    Label(String),
    /// XT.com style numeric return code
    Numeric(i64),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Numeric(code) => write!(f, "{}", code),
        }
    }
}

/// Structured error returned by an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeError {
    /// Exchange that produced the error
    pub exchange: &'static str,
    /// HTTP status of the response
    pub status: u16,
    /// Label or numeric code
    pub code: ErrorCode,
    /// Human readable message
    pub message: String,
    /// Extra payload some exchanges attach (XT `error` field)
    pub detail: Option<String>,
}

impl ExchangeError {
    /// String label, when the exchange uses labels
    pub fn label(&self) -> Option<&str> {
        match &self.code {
            ErrorCode::Label(label) => Some(label),
            ErrorCode::Numeric(_) => None,
        }
    }

    /// Numeric code, when the exchange uses numbers
    pub fn code(&self) -> Option<i64> {
        match self.code {
            ErrorCode::Numeric(code) => Some(code),
            ErrorCode::Label(_) => None,
        }
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} API error (status {}): {}: {}",
            self.exchange, self.status, self.code, self.message
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExchangeError {}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Connection, TLS or body read failure
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request did not complete within the deadline
    #[error("Request timed out")]
    Timeout,

    /// Request was cancelled by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credentials could not be built
    #[error(transparent)]
    Credentials(#[from] perp_auth::AuthError),

    /// Exchange rejected the request
    #[error(transparent)]
    Exchange(ExchangeError),

    /// Error response in a shape the exchange does not document
    #[error("Unexpected response (status {status}): {body}")]
    UnexpectedResponse {
        /// HTTP status
        status: u16,
        /// Raw body text
        body: String,
    },

    /// Success response that does not match the expected type
    #[error("Decode error: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw body text
        body: String,
    },

    /// Request payload could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Classify a transport failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Structured exchange error, if this is one
    pub fn exchange(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange(err) => Some(err),
            _ => None,
        }
    }

    /// Failed before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired | Self::Credentials(_) | Self::Serialize(_) | Self::InvalidParameter(_)
        )
    }

    /// Failed in transit
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout | Self::Cancelled)
    }

    /// Check if a caller may reasonably retry
    ///
    /// Advisory only: the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::Exchange(err) => err.status == 429 || err.status >= 500,
            Self::UnexpectedResponse { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
