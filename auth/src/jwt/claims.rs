use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Payload carried by every issued token.
///
/// Field names are part of the wire format: `user_id`, `email`, `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, expiring `ttl` after `issued_at`.
    ///
    /// # Errors
    /// * `IssuanceFailed` - The expiry falls outside the representable time range
    pub fn for_user(
        user_id: i64,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::IssuanceFailed(format!("token lifetime {} is out of range", ttl))
        })?;

        Ok(Self {
            user_id,
            email: email.into(),
            exp: expires_at.timestamp(),
        })
    }
}

/// Identity extracted from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: i64,
    pub email: String,
}
