//! Authentication core for the credential service
//!
//! - Signing secret resolution (`JWT_SECRET` with a fixed fallback)
//! - Password hashing (Argon2id)
//! - HS256 token issuance and verification
//! - The bearer-token gate every protected endpoint goes through
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SecretProvider, TokenIssuer, TokenVerifier};
//!
//! let secret = SecretProvider::new("secret_key");
//! let token = TokenIssuer::new(&secret).issue(1, "a@x.com").unwrap();
//! let identity = TokenVerifier::new(&secret).verify(&token).unwrap();
//! assert_eq!(identity.user_id, 1);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SecretProvider};
//!
//! let auth = Authenticator::new(&SecretProvider::new("secret_key"));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, 1, "a@x.com").unwrap();
//!
//! // Protected request
//! let header = format!("Bearer {}", result.access_token);
//! assert_eq!(auth.authenticate_header(Some(&header)), Ok(1));
//! ```

pub mod authenticator;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod secret;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AuthenticationGate;
pub use gate::Rejection;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIdentity;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use secret::SecretProvider;
