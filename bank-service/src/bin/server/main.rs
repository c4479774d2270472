use std::sync::Arc;

use auth::Authenticator;
use auth::Clock;
use auth::IdentifierFormat;
use auth::IdentifierGenerator;
use auth::SigningKey;
use auth::SystemClock;
use bank_service::config::Config;
use bank_service::domain::account::ports::CredentialStore;
use bank_service::domain::account::service::AccountService;
use bank_service::inbound::http::access::AccessPolicy;
use bank_service::inbound::http::router::create_router;
use bank_service::outbound::repositories::InMemoryCredentialStore;
use bank_service::outbound::repositories::PostgresCredentialStore;
use bank_service::outbound::repositories::TimeoutCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "bank-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        store_timeout_ms = config.database.timeout_ms,
        jwt_expiration_hours = config.jwt.expiration_hours,
        user_id_length = config.identifiers.user_id_length,
        max_attempts = config.identifiers.max_attempts,
        "Configuration loaded"
    );

    let signing_key = SigningKey::new(config.jwt.secret.as_bytes())?;
    let authenticator = Arc::new(Authenticator::new(&signing_key, config.jwt.ttl()?));

    let store: Arc<dyn CredentialStore> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(config.database.timeout())
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(PostgresCredentialStore::new(pg_pool))
        }
        None => {
            tracing::warn!(
                database = "memory",
                "No database.url configured, accounts will not survive a restart"
            );
            Arc::new(InMemoryCredentialStore::new())
        }
    };
    let store: Arc<dyn CredentialStore> = Arc::new(TimeoutCredentialStore::new(
        store,
        config.database.timeout(),
    ));

    let generator = IdentifierGenerator::new(IdentifierFormat {
        user_id_length: config.identifiers.user_id_length,
        pin_length: config.identifiers.pin_length,
        ..IdentifierFormat::default()
    });
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&store),
        Arc::clone(&authenticator),
        generator,
        Arc::clone(&clock),
        config.identifiers.max_attempts,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        store,
        authenticator,
        clock,
        AccessPolicy::default(),
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}
