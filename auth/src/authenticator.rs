use chrono::Duration;

use crate::gate::AuthenticationGate;
use crate::gate::Rejection;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::secret::SecretProvider;

/// Authentication coordinator combining password hashing, token issuance and the
/// request gate, all bound to one resolved secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    gate: AuthenticationGate,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator issuing tokens with the default 24 hour lifetime.
    pub fn new(secret: &SecretProvider) -> Self {
        Self::with_ttl(secret, Duration::hours(TokenIssuer::DEFAULT_TTL_HOURS))
    }

    pub fn with_ttl(secret: &SecretProvider, ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::with_ttl(secret, ttl),
            gate: AuthenticationGate::new(TokenVerifier::new(secret)),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored hash and issue a token for the identity.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
        email: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issuer.issue(user_id, email)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Resolve an `Authorization` header value to an authenticated user id.
    pub fn authenticate_header(&self, header: Option<&str>) -> Result<i64, Rejection> {
        self.gate.authenticate(header)
    }
}
