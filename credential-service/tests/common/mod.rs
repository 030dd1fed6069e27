use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SecretProvider;
use credential_service::domain::user::models::CredentialRecord;
use credential_service::domain::user::models::Identity;
use credential_service::domain::user::models::UserId;
use credential_service::domain::user::ports::UserRepository;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::user::errors::UserError;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing";

/// Credential store kept in memory, enforcing unique emails like the users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: Mutex<Vec<CredentialRecord>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<Identity, UserError> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.identity.email == email) {
            return Err(UserError::InsertionFailure(format!(
                "duplicate key value violates unique constraint: {}",
                email
            )));
        }

        let identity = Identity {
            id: UserId(records.len() as i64 + 1),
            email: email.to_string(),
        };
        records.push(CredentialRecord {
            identity: identity.clone(),
            password_hash: password_hash.to_string(),
        });

        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, UserError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.identity.email == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Identity>, UserError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().map(|r| r.identity.clone()).collect())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(&SecretProvider::new(TEST_SECRET)));
        let repository = Arc::new(InMemoryUserRepository::default());
        let user_service = Arc::new(UserService::new(repository, Arc::clone(&authenticator)));

        let router = create_router(user_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
