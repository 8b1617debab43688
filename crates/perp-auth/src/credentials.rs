//! API credentials
//!
//! # Security
//!
//! Secret keys are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Keeps the secret out of `Debug` output
//! - Requires explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};

/// API key and secret for authenticated requests
///
/// Both exchanges key their HMAC with the raw bytes of the secret string,
/// so no decoding happens here.
pub struct Credentials {
    /// API key (sent in clear as a header)
    api_key: String,
    /// Secret key bytes (zeroized on drop)
    secret_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create credentials from an API key and secret
    ///
    /// # Arguments
    /// * `api_key` - The exchange API key
    /// * `secret_key` - The exchange secret, used verbatim as the HMAC key
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] when either value is empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.as_ref();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials("secret key is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret_key: SecretBox::new(Box::new(secret_key.as_bytes().to_vec())),
        })
    }

    /// Build credentials only when both halves are present
    ///
    /// An empty key or secret means the client runs in public-only mode.
    pub fn from_pair(api_key: &str, secret_key: &str) -> Option<Self> {
        Self::new(api_key, secret_key).ok()
    }

    /// Load credentials from the named environment variables
    ///
    /// ```no_run
    /// # use perp_auth::Credentials;
    /// let creds = Credentials::from_env("GATE_API_KEY", "GATE_API_SECRET")?;
    /// # Ok::<(), perp_auth::AuthError>(())
    /// ```
    pub fn from_env(key_var: &str, secret_var: &str) -> AuthResult<Self> {
        let api_key =
            std::env::var(key_var).map_err(|_| AuthError::EnvVarNotSet(key_var.to_string()))?;
        let secret_key = std::env::var(secret_var)
            .map_err(|_| AuthError::EnvVarNotSet(secret_var.to_string()))?;

        Self::new(api_key, secret_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret_key.expose_secret()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(idx, _)| &self.api_key[..idx]);
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", shown))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("abcdefghijklmnop", "super-secret-value").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("ijklmnop"));
        assert!(debug.contains("abcdefgh..."));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_empty_halves_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_from_pair_public_only() {
        assert!(Credentials::from_pair("", "").is_none());
        assert!(Credentials::from_pair("key", "").is_none());
        let creds = Credentials::from_pair("key", "secret").unwrap();
        assert_eq!(creds.api_key(), "key");
        assert_eq!(creds.secret(), b"secret");
    }

    #[test]
    fn test_from_env_missing() {
        let err = Credentials::from_env("PERP_AUTH_TEST_UNSET_KEY", "PERP_AUTH_TEST_UNSET_SECRET")
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::EnvVarNotSet("PERP_AUTH_TEST_UNSET_KEY".to_string())
        );
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("key", "secret").unwrap();
        let cloned = creds.clone();
        assert_eq!(cloned.secret(), creds.secret());
    }
}
