use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use portfolio_site::{
    cache::redis::create_redis_pool,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    limiter::rate_limiter::RateHybridLimiterStore,
    middlewares::{auth::AuthMiddleware, rate_limit::RateLimitMiddleware},
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    AppState,
};

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
        ])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::new().context("Failed to load configuration")?;
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = create_pool(&config.database_url)
        .await
        .context("Failed to create database connection pool")?;

    if config.run_migrations {
        run_migrations(&pool).await.context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let redis_pool = config.redis_url.as_deref().and_then(create_redis_pool);
    if redis_pool.is_none() {
        tracing::warn!("Redis not configured; revoked tokens stay valid until they expire");
    }

    let app_state = web::Data::new(AppState::new(&config, pool, redis_pool));

    let limiter_store = RateHybridLimiterStore::for_auth(
        config.rate_limit_capacity,
        config.rate_limit_refill_per_sec,
    );
    limiter_store.spawn_eviction();

    let server_addr = format!("{}:{}", config.host, config.port);
    let cors_origins = config.cors_origins();
    let trust_xff = config.trust_x_forwarded_for;

    tracing::info!(
        "🚀 Starting {} v{} on {} with {} workers",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.worker_count
    );

    let server = HttpServer::new(move || {
        let limiter = RateLimitMiddleware::new(limiter_store.clone(), trust_xff);

        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(|cfg| configure_routes(cfg, limiter))
    })
    .workers(config.worker_count)
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run();

    tokio::select! {
        res = server => res.context("Server error")?,
        _ = shutdown_signal() => tracing::info!("Shutdown complete"),
    }

    Ok(())
}
