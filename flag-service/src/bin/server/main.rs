use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use flag_service::config::Config;
use flag_service::domain::flag::service::FlagService;
use flag_service::domain::user::service::AuthService;
use flag_service::inbound::http::router::create_router;
use flag_service::outbound::repositories::PostgresCredentialStore;
use flag_service::outbound::repositories::PostgresFlagStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flag_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "flag-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.token.ttl_seconds,
        password_memory_kib = config.password.memory_kib,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_cost(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let authenticator = Arc::new(
        Authenticator::new(config.token.secret.as_bytes())?
            .with_password_hasher(password_hasher)
            .with_token_ttl(config.token.ttl_seconds),
    );

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let flag_store = Arc::new(PostgresFlagStore::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        credential_store,
        Arc::clone(&authenticator),
    ));
    let flag_service = Arc::new(FlagService::new(flag_store));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, flag_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
