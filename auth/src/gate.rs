use thiserror::Error;

use crate::jwt::JwtError;
use crate::jwt::TokenVerifier;

const BEARER_SCHEME: &str = "Bearer";

/// Why a request was refused at the authentication boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Token not provided")]
    NoToken,

    #[error("Malformed Authorization header, expected: Bearer <token>")]
    BadScheme,

    /// Every verification failure collapses into this variant; the cause is kept for logs.
    #[error("Invalid token")]
    InvalidToken(#[source] JwtError),
}

/// Request-level authentication decision shared by all protected endpoints.
///
/// Stateless per call: the outcome depends only on the presented header and the clock.
pub struct AuthenticationGate {
    verifier: TokenVerifier,
}

impl AuthenticationGate {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self { verifier }
    }

    /// Resolve an `Authorization` header value to the bound user id.
    ///
    /// The value must be exactly two fields separated by a single space, the first being
    /// the literal `Bearer`.
    ///
    /// # Errors
    /// * `NoToken` - Header absent or empty
    /// * `BadScheme` - Header is not `Bearer <token>`
    /// * `InvalidToken` - Token failed verification
    pub fn authenticate(&self, header: Option<&str>) -> Result<i64, Rejection> {
        let header = match header {
            Some(value) if !value.is_empty() => value,
            _ => return Err(Rejection::NoToken),
        };

        let token = match header.split(' ').collect::<Vec<_>>().as_slice() {
            [scheme, token] if *scheme == BEARER_SCHEME => *token,
            _ => return Err(Rejection::BadScheme),
        };

        self.verifier
            .verify(token)
            .map(|identity| identity.user_id)
            .map_err(Rejection::InvalidToken)
    }
}
