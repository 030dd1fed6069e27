use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::Identity;
use crate::domain::user::models::LoginCommand;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Registration and login flows over a credential store.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance bound to the process secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, credentials: Credentials) -> Result<Identity, UserError> {
        let password_hash = self.authenticator.hash_password(credentials.password())?;

        let identity = self
            .repository
            .insert(credentials.email(), &password_hash)
            .await?;

        tracing::info!(user_id = %identity.id, "User registered");

        Ok(identity)
    }

    async fn login(&self, command: LoginCommand) -> Result<String, UserError> {
        let record = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::NotFound(command.email.clone()))?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &record.password_hash,
                record.identity.id.0,
                &record.identity.email,
            )
            .map_err(|e| {
                tracing::debug!(user_id = %record.identity.id, "Login rejected: {}", e);
                UserError::from(e)
            })?;

        tracing::info!(user_id = %record.identity.id, "Token issued");

        Ok(result.access_token)
    }

    async fn list_users(&self) -> Result<Vec<Identity>, UserError> {
        self.repository.list_all().await
    }
}
