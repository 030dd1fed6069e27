use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use crate::secret::SecretProvider;

/// Builds signed, time-bounded tokens binding a user identity (HS256).
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Create an issuer with the default 24 hour lifetime.
    pub fn new(secret: &SecretProvider) -> Self {
        Self::with_ttl(secret, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    pub fn with_ttl(secret: &SecretProvider, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.key()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user_id` / `email`, valid from now until now + ttl.
    ///
    /// # Errors
    /// * `IssuanceFailed` - The signing primitive failed or the ttl overflows the clock
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, JwtError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// Identical inputs produce identical tokens.
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, email, now, self.ttl)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::IssuanceFailed(e.to_string()))
    }
}
