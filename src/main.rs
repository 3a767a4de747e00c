//! HM Auth Service entry point
//!
//! Reads configuration from TOML file (~/.config/hm-auth/config.toml),
//! runs migrations, seeds the default admin, and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use hm_auth::application::AuthService;
use hm_auth::auth::password::hash_password;
use hm_auth::config::AppConfig;
use hm_auth::domain::{CreateUserDto, RoleName, UserRepositoryInterface};
use hm_auth::infrastructure::database::migrator::Migrator;
use hm_auth::{create_api_router, default_config_path, init_database, DatabaseConfig, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("HM_AUTH_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting HM Auth Service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let repo: Arc<dyn UserRepositoryInterface> = Arc::new(UserRepository::new(db));

    create_default_admin(repo.as_ref(), &app_cfg).await;

    // ── Services & router ──────────────────────────────────────
    let jwt_config = app_cfg.security.jwt_config();
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let auth_service = Arc::new(AuthService::new(repo.clone(), jwt_config.clone()));
    let router = create_api_router(repo, jwt_config, auth_service);

    // ── Serve ──────────────────────────────────────────────────
    let addr = app_cfg.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Seed an admin user on first start so the search endpoints are
/// reachable before any manual registration.
async fn create_default_admin(repo: &dyn UserRepositoryInterface, app_cfg: &AppConfig) {
    let users_count = repo.count_users().await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Creating default admin user...");

    let password_hash = match hash_password(&app_cfg.admin.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin_role = match repo.find_role_by_name(RoleName::Admin).await {
        Ok(Some(role)) => role,
        Ok(None) => {
            error!("Admin role row missing; role seeding migration did not run");
            return;
        }
        Err(e) => {
            error!("Failed to look up admin role: {}", e);
            return;
        }
    };

    let dto = CreateUserDto {
        username: app_cfg.admin.username.clone(),
        email: app_cfg.admin.email.clone(),
        password_hash,
        first_name: "Default".to_string(),
        last_name: "Admin".to_string(),
        mobile_number: "0000000000".to_string(),
        address: "N/A".to_string(),
        pin: "000000".to_string(),
        roles: vec![admin_role],
    };

    match repo.create_user(dto).await {
        Ok(user) => {
            info!("Default admin created: {}", user.email);
            warn!("Please change the admin password immediately!");
        }
        Err(e) => {
            error!("Failed to create admin user: {}", e);
        }
    }
}
