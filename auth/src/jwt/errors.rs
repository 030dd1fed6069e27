use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Verification failures are kept distinct here; callers at the transport boundary
/// collapse them into a single "invalid token" outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to issue token: {0}")]
    IssuanceFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Unexpected signing algorithm: {0}")]
    UnexpectedAlgorithm(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token does not carry a valid user_id")]
    MissingIdentity,
}
