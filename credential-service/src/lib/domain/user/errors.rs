use thiserror::Error;

/// Top-level error for registration, login and listing.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Email and password are required")]
    MissingField,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Incorrect password")]
    BadPassword,

    // Uniqueness violations are not told apart from other insert failures.
    #[error("Failed to insert user: {0}")]
    InsertionFailure(String),

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),

    #[error("Token generation failed: {0}")]
    IssuanceFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::HashingFailure(err.to_string())
    }
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::BadPassword,
            auth::AuthenticationError::PasswordError(e) => UserError::HashingFailure(e.to_string()),
            auth::AuthenticationError::JwtError(e) => UserError::IssuanceFailure(e.to_string()),
        }
    }
}
