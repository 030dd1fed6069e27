use std::sync::Arc;

use auth::Authenticator;
use auth::SecretProvider;
use credential_service::config::Config;
use credential_service::domain::user::ports::UserServicePort;
use credential_service::domain::user::service::UserService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_host = %config.database.host,
        database_name = %config.database.name,
        http_port = config.server.http_port,
        token_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let secret = SecretProvider::resolve_from(config.jwt.secret.clone());
    if secret.is_default() {
        tracing::warn!("JWT_SECRET is not set, signing tokens with the built-in default secret");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(config.database.connect_options()?)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_ttl(
        &secret,
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
