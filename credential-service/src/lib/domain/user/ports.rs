use async_trait::async_trait;

use crate::domain::user::models::CredentialRecord;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, storing only a hash of the password.
    ///
    /// # Errors
    /// * `HashingFailure` - Password hashing failed
    /// * `InsertionFailure` - Store rejected the insert (including duplicate email)
    async fn register(&self, credentials: Credentials) -> Result<Identity, UserError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `BadPassword` - Password does not match
    /// * `IssuanceFailure` - Token signing failed
    /// * `DatabaseError` - Store lookup failed
    async fn login(&self, command: LoginCommand) -> Result<String, UserError>;

    /// List every registered user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<Identity>, UserError>;
}

/// Credential store, keyed by unique email.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new email / password hash pair.
    ///
    /// # Errors
    /// * `InsertionFailure` - Any insert failure, duplicates included
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, UserError>;

    /// Retrieve the credential record for an email.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, UserError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Identity>, UserError>;
}
