use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aegis_api::{app::create_app, routes::health::HealthChecks, routes::AppState};
use aegis_core::services::{
    AuthEnforcer, AuthService, TokenBlacklist, TokenCleanupConfig, TokenCleanupService,
    TokenCodec, TokenIssuer, TokenService, TokenServiceConfig,
};
use aegis_infra::cache::{RedisClient, RedisRevocationCache};
use aegis_infra::database::{DatabasePool, PgTokenRepository, PgUserRepository};
use aegis_shared::config::environment::LogFormat;
use aegis_shared::{AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Aegis API server");

    config
        .validate()
        .map_err(|reason| anyhow::anyhow!("invalid configuration: {}", reason))?;
    if config.auth.jwt.validate().is_err() {
        warn!("Signing secrets are incomplete; token operations will fail");
    }

    // Stores
    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to apply database migrations")?;
    }
    let redis = RedisClient::new(&config.cache)
        .await
        .context("failed to connect to Redis")?;

    let tokens = Arc::new(PgTokenRepository::new(database.get_pool().clone()));
    let users = Arc::new(PgUserRepository::new(database.get_pool().clone()));
    let health = HealthChecks::new()
        .with(Arc::new(database.clone()))
        .with(Arc::new(redis.clone()));
    let cache = Arc::new(RedisRevocationCache::new(redis));

    // Services
    let token_config = TokenServiceConfig::from(&config.auth);
    let store_timeout = token_config.store_timeout;
    let codec = Arc::new(
        TokenCodec::from_config(&token_config)
            .map_err(|e| anyhow::anyhow!("token codec: {:?}", e.detail()))?,
    );
    let issuer = Arc::new(TokenIssuer::new(codec.clone(), tokens.clone(), store_timeout));
    let blacklist = Arc::new(TokenBlacklist::new(cache, store_timeout));
    let token_service = Arc::new(TokenService::new(
        codec.clone(),
        issuer.clone(),
        tokens.clone(),
        users.clone(),
        blacklist.clone(),
        store_timeout,
    ));
    let enforcer = Arc::new(AuthEnforcer::new(codec, blacklist));
    let auth_service = Arc::new(AuthService::new(users, issuer, store_timeout));

    let cleanup = Arc::new(TokenCleanupService::new(
        tokens,
        TokenCleanupConfig::from(&config.auth.cleanup),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState {
        auth_service,
        token_service,
        enforcer,
        health,
    });

    let bind_address = config.server.bind_address();
    let json_limit = config.server.max_payload_size;
    info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone(), json_limit));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    database.close().await;
    info!("Server stopped");
    Ok(())
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
