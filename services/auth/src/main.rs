use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auth::{
    config::AuthConfig, credentials::CredentialVerifier, repositories::UserRepository, routes,
    session::SessionStore, state::AppState,
};
use common::database::{DatabaseConfig, health_check, init_pool};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication service");

    let config = AuthConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let user_repository = UserRepository::new(pool);
    user_repository.ensure_schema().await?;

    // The dummy hash is computed here, at the configured cost
    let password_config = config.password;
    let credentials =
        tokio::task::spawn_blocking(move || CredentialVerifier::new(password_config)).await??;

    let sessions = SessionStore::new(config.session_ttl_seconds);

    let app_state = AppState {
        user_store: user_repository,
        credentials,
        sessions,
        cookie_secure: config.cookie_secure,
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Authentication service listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Authentication service stopped");
    Ok(())
}

/// Resolve once Ctrl+C or SIGTERM arrives
///
/// A handler that cannot be installed never resolves, so the server keeps
/// running instead of stopping right after it starts.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
