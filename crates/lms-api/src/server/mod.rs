//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use lms_cache::RedisPool;
use lms_common::{AppConfig, AppError, JwtService, StoreBackend};
use lms_core::SnowflakeGenerator;
use lms_db::{create_pool, run_migrations, MemoryStore};
use lms_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Wire the store, Redis and auth into a service context
///
/// Postgres is migrated on connect unless `DATABASE_RUN_MIGRATIONS=false`.
pub async fn build_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let mut builder = ServiceContextBuilder::new()
        .jwt_service(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.token_expiry,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.node_id)))
        .certificate_policy(config.certificate.clone());

    builder = match (config.store, &config.database) {
        (StoreBackend::Postgres, Some(database)) => {
            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&lms_db::DatabaseConfig::from(database))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            if database.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }
            info!("PostgreSQL connection established");
            builder.postgres(pool)
        }
        (StoreBackend::Postgres, None) => {
            return Err(AppError::Config(
                "DATABASE_URL is required for the postgres store".into(),
            ));
        }
        (StoreBackend::Memory, _) => {
            info!("Using in-memory store; data is lost on shutdown");
            builder.memory(MemoryStore::new())
        }
    };

    if let Some(redis) = &config.redis {
        let redis_pool =
            RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
        builder = builder.redis_pool(redis_pool);
    } else {
        info!("REDIS_URL not set; notifications are stored but not published");
    }

    builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let service_context = build_service_context(&config).await?;
    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &addr).await
}
