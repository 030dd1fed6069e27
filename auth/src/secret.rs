use std::env;
use std::fmt;

/// Environment variable holding the token signing secret.
pub const SECRET_ENV_VAR: &str = "JWT_SECRET";

/// Key used when no secret is configured. Known and weak; deployments must set `JWT_SECRET`.
pub const DEFAULT_SECRET: &str = "secret_jwt_chave_trocar";

/// Symmetric signing key shared by the token issuer and verifier.
///
/// Resolved once at startup and immutable afterwards, so every token issued and verified
/// by a process uses the same key.
#[derive(Clone)]
pub struct SecretProvider {
    key: Vec<u8>,
    is_default: bool,
}

impl SecretProvider {
    /// Create a provider from explicit key material.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            is_default: false,
        }
    }

    /// Resolve the key from `JWT_SECRET`, falling back to [`DEFAULT_SECRET`].
    pub fn resolve() -> Self {
        Self::resolve_from(env::var(SECRET_ENV_VAR).ok())
    }

    /// Resolve the key from an already-read configuration value.
    ///
    /// An absent or empty value selects [`DEFAULT_SECRET`].
    pub fn resolve_from(secret: Option<String>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => Self::new(secret),
            _ => Self {
                key: DEFAULT_SECRET.as_bytes().to_vec(),
                is_default: true,
            },
        }
    }

    /// Key bytes used for HMAC signing.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Whether the built-in fallback secret is in use.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

impl fmt::Debug for SecretProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretProvider")
            .field("key", &"<redacted>")
            .field("is_default", &self.is_default)
            .finish()
    }
}
