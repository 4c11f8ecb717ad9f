use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use directory_api::{build_router, AppState};
use directory_core::providers::{AddressLookup, AuthProvider};
use directory_infrastructure::{
    create_pool, run_migrations, PgCompanyRepository, PgEmployeeRepository, PgUserRepository,
    TurkiyeApiClient,
};
use directory_security::JwtAuthProvider;
use directory_shared::config::{AppConfig, CorsSettings};
use directory_shared::utils::mask_email;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    directory_shared::telemetry::init_telemetry();

    info!("Directory server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;
    info!("Database connection established.");

    // Wire adapters and services
    let auth: Arc<dyn AuthProvider> = Arc::new(JwtAuthProvider::new(
        &config.jwt.secret,
        config.jwt.token_expiry_hours,
        config.auth.bcrypt_cost,
    ));
    let address: Arc<dyn AddressLookup> = Arc::new(TurkiyeApiClient::new(&config.address)?);
    let state = AppState::new(
        Arc::new(PgCompanyRepository::new(pool.clone())),
        Arc::new(PgEmployeeRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool.clone())),
        address,
        auth,
    );

    // Bootstrap super admin
    if let (Some(email), Some(password)) = (
        config.auth.bootstrap_admin_email.as_deref(),
        config.auth.bootstrap_admin_password.as_deref(),
    ) {
        let admin = state.accounts.ensure_admin(email, password).await?;
        info!("Bootstrap admin ready: {} (id {})", mask_email(&admin.email), admin.id);
    }

    // Build router
    let app = build_router(state).layer(cors_layer(&config.cors));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Directory server stopped");
    Ok(())
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
