use std::fmt;

use crate::user::errors::UserError;

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registered user as exposed outside the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
}

/// Identity plus its stored password hash. Never leaves the domain service.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identity: Identity,
    pub password_hash: String,
}

/// Registration input with both fields present.
#[derive(Debug)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// # Errors
    /// * `MissingField` - Email or password is empty
    pub fn new(email: String, password: String) -> Result<Self, UserError> {
        if email.is_empty() || password.is_empty() {
            return Err(UserError::MissingField);
        }
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Login input, taken as presented.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}
