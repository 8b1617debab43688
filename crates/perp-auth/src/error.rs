//! Error types for credential handling

/// Errors that can occur while building credentials
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Key or secret is missing or malformed
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for credential operations
pub type AuthResult<T> = Result<T, AuthError>;
