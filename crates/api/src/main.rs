use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use masjid_core::clock::SystemClock;
use masjid_core::method::CalculationMethod;
use masjid_core::resolver::{MethodPolicy, ScheduleResolver, SourceTier};
use masjid_sources::{AladhanSource, BmkgFeed, OpenWeatherFeed, PrayZoneSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use masjid_api::config::ServerConfig;
use masjid_api::router::build_app_router;
use masjid_api::state::AppState;
use masjid_db::PgSettingsStore;

/// Slack added to the HTTP client timeout for a whole resolver tier.
const TIER_TIMEOUT_SLACK: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masjid_api=debug,masjid_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let mut config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = masjid_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    masjid_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    masjid_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Upstream providers ---
    let upstream_timeout = Duration::from_secs(config.upstream_timeout_secs);
    let client = masjid_sources::http::build_client(upstream_timeout)
        .expect("Failed to build reqwest HTTP client");
    let upstreams = &config.upstreams;

    let resolver = ScheduleResolver::new(vec![
        SourceTier::new(
            Arc::new(AladhanSource::new(client.clone(), &upstreams.aladhan_base_url)),
            MethodPolicy::Configured,
        ),
        SourceTier::new(
            Arc::new(PrayZoneSource::new(client.clone(), &upstreams.prayzone_base_url)),
            MethodPolicy::Fixed(CalculationMethod::Mwl),
        ),
    ])
    .with_tier_timeout(upstream_timeout + TIER_TIMEOUT_SLACK);
    tracing::info!(tiers = ?resolver.tiers(), "Prayer time resolver configured");

    let budget = resolver.worst_case_latency();
    let configured = config.request_timeout_secs;
    if config.fit_request_timeout(budget) {
        tracing::warn!(
            configured,
            effective = config.request_timeout_secs,
            budget_secs = budget.as_secs_f64(),
            "REQUEST_TIMEOUT_SECS is shorter than the resolver fallback chain, raising it"
        );
    }

    let upstreams = &config.upstreams;
    if upstreams.openweather_api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set, weather widget will show fallback values");
    }
    let weather = OpenWeatherFeed::new(
        client.clone(),
        &upstreams.openweather_base_url,
        upstreams.openweather_api_key.clone(),
    );
    let hazards = BmkgFeed::new(client, &upstreams.bmkg_base_url);

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        settings: Arc::new(PgSettingsStore::new(pool.clone())),
        clock: Arc::new(SystemClock),
        resolver: Arc::new(resolver),
        weather: Arc::new(weather),
        hazards: Arc::new(hazards),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, closing database pool");
    pool.close().await;
    tracing::info!("Graceful shutdown complete");
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
