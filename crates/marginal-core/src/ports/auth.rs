//! Authentication ports for the single admin user.

/// Issues and checks admin session tokens stored in the admin cookie.
pub trait SessionService: Send + Sync {
    /// Issue a fresh admin session token.
    fn issue(&self) -> Result<String, AuthError>;

    /// Check that a token is an unexpired admin session.
    fn validate(&self, token: &str) -> Result<(), AuthError>;

    /// Lifetime of an issued token in seconds.
    fn ttl_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Missing admin cookie")]
    MissingSession,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
