use std::sync::Arc;

use anyhow::Context;
use auth::TokenCodec;
use auth_service::bootstrap;
use auth_service::config::Config;
use auth_service::domain::account::service::AuthenticationService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::directory::HttpDirectoryNotifier;
use auth_service::repositories::PostgresAccountRepository;
use auth_service::repositories::PostgresRoleStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        http_port = config.server.http_port,
        directory_url = %config.directory.url,
        token_ttl_minutes = config.jwt.expires_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to the database")?;
    tracing::info!(max_connections = 5, "Database connection pool created");

    sqlx::migrate!("./migrations")
        .run(&pg_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations completed");

    // A missing or undecodable signing secret must stop the service here,
    // not at the first sign-in
    let token_codec = Arc::new(
        TokenCodec::new(&config.jwt.secret, config.jwt.expires_minutes)
            .context("Signing secret rejected")?,
    );

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let role_store = Arc::new(PostgresRoleStore::new(pg_pool));
    let directory = Arc::new(
        HttpDirectoryNotifier::new(&config.directory)
            .context("Failed to build the directory client")?,
    );

    bootstrap::seed_roles(role_store.as_ref())
        .await
        .context("Failed to seed built-in roles")?;
    bootstrap::seed_admin(account_repository.as_ref(), role_store.as_ref(), &config.bootstrap)
        .await
        .context("Failed to seed the administrator account")?;

    let auth_service = Arc::new(AuthenticationService::new(
        account_repository,
        role_store,
        directory,
        Arc::clone(&token_codec),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {}", http_address))?;
    tracing::info!(address = %http_address, "Http server listening");

    let application = create_router(auth_service, token_codec);
    axum::serve(http_listener, application)
        .await
        .context("Http server stopped")?;

    Ok(())
}
