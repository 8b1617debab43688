//! Credentials and request signing for Gate.io and XT.com futures APIs
//!
//! Both exchanges authenticate private REST calls with an HMAC over a
//! canonical rendering of the request. This crate owns the credentials and
//! the two signing schemes; it performs no I/O.
//!
//! - [`GateSigner`]: HMAC-SHA512 over `METHOD\nPATH\nQUERY\nSHA512(BODY)\nTIMESTAMP`
//! - [`XtSigner`]: HMAC-SHA256 over `validate-appkey=..&validate-timestamp=..#path#query#body`
//!
//! # Example
//!
//! ```
//! use perp_auth::{CanonicalRequest, Credentials, GateSigner, Signer};
//!
//! let creds = Credentials::new("my-key", "my-secret").unwrap();
//! let request = CanonicalRequest::new("GET", "/api/v4/futures/usdt/accounts", "", "");
//!
//! let envelope = GateSigner.sign_at(&creds, &request, "1700000000");
//! assert_eq!(envelope.header("KEY"), Some("my-key"));
//! assert_eq!(envelope.signature.len(), 128);
//! ```

mod credentials;
mod error;
mod gate;
mod signer;
mod xt;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use gate::GateSigner;
pub use signer::{CanonicalRequest, SignedEnvelope, Signer};
pub use xt::{XtSigner, DEFAULT_RECV_WINDOW};
