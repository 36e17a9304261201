use std::net::SocketAddr;

use ontdek_core::permissions::Permissions;
use ontdek_db::models::user::CreateUser;
use ontdek_db::repositories::{SessionRepo, UserRepo};
use ontdek_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ontdek_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use ontdek_api::config::ServerConfig;
use ontdek_api::router::build_app_router;
use ontdek_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ontdek_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        platform = %config.platform,
        uploads_enabled = config.uploads_enabled(),
        "Loaded server configuration"
    );

    // --- Database ---
    let db_config = ontdek_db::DbConfig::from_env(config.platform);
    let pool = ontdek_db::create_pool(&db_config)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections = db_config.max_connections, "Database connection pool created");

    ontdek_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    ontdek_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await;

    match SessionRepo::cleanup_expired(&pool).await {
        Ok(removed) => tracing::info!(removed, "Expired sessions cleaned up"),
        Err(e) => tracing::warn!(error = %e, "Session cleanup failed"),
    }

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let state = AppState::new(pool, config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the first admin from `ADMIN_USERNAME` / `ADMIN_PASSWORD` /
/// `ADMIN_EMAIL` when the users table is empty.
async fn bootstrap_admin(pool: &DbPool) {
    let count = UserRepo::count(pool)
        .await
        .expect("Failed to count users");
    if count > 0 {
        return;
    }

    let (Ok(username), Ok(password)) = (
        std::env::var("ADMIN_USERNAME"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::warn!("No users exist and ADMIN_USERNAME/ADMIN_PASSWORD are not set");
        return;
    };
    if let Err(msg) = validate_password_strength(&password, MIN_PASSWORD_LENGTH) {
        panic!("ADMIN_PASSWORD is too weak: {msg}");
    }

    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| format!("{username}@localhost"));
    let password_hash = hash_password(&password).expect("Failed to hash ADMIN_PASSWORD");
    let admin = UserRepo::create(
        pool,
        &CreateUser {
            username,
            email,
            password_hash,
            permissions: Permissions::admin(),
        },
    )
    .await
    .expect("Failed to create the initial admin");
    tracing::info!(user_id = admin.id, username = %admin.username, "Initial admin created");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
