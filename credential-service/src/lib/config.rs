use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgSslMode;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; takes precedence over the individual fields when set.
    #[serde(default)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    #[serde(default)]
    pub secret: Option<String>,
    pub expiration_hours: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Longest token lifetime accepted from configuration (100 years).
pub const MAX_EXPIRATION_HOURS: i64 = 100 * 365 * 24;

/// Single-variable settings honoured for compatibility with existing deployments.
const LEGACY_VARIABLES: [(&str, &str); 7] = [
    ("PORT", "server.http_port"),
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("JWT_SECRET", "jwt.secret"),
];

impl Config {
    /// Load configuration from defaults, files and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (PORT, DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, JWT_SECRET)
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "123")?
            .set_default("database.name", "schudy")?
            .set_default("jwt.expiration_hours", auth::TokenIssuer::DEFAULT_TTL_HOURS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"));

        for (variable, key) in LEGACY_VARIABLES {
            let value = env::var(variable).ok().filter(|v| !v.is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Token lifetime must be positive and small enough to add to the current time.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.expiration_hours
            )));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Connection options for the credential store.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => url.parse(),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)
                .ssl_mode(PgSslMode::Disable)),
        }
    }
}
