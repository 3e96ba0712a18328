//! pgfinder API server
//!
//! HTTP backend for the PG/flat finder marketplace: listing directory and
//! detail views, email/password auth, owner and admin dashboards, and the
//! subscription paywall driven by the Razorpay orders API.

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tokio::time::{interval, Duration};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use pgfinder_server::app_state::AppState;
use pgfinder_server::config::AppConfig;
use pgfinder_server::routes;

const SUBSCRIPTION_SWEEP_INTERVAL_SECONDS: u64 = 3600;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("invalid configuration");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState::build(pool, &config).expect("failed to build application state");

    // Periodically clear the active flag on expired subscriptions so the
    // stored data converges with what the gate enforces at read time.
    let sweeper = state.subscription_service.clone();
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(SUBSCRIPTION_SWEEP_INTERVAL_SECONDS));
        loop {
            ticker.tick().await;
            match sweeper.deactivate_expired().await {
                Ok(0) => {}
                Ok(count) => info!(count, "deactivated expired subscriptions"),
                Err(e) => error!(error = %e, "subscription expiry sweep failed"),
            }
        }
    });

    let app = routes::app(state, build_cors_layer(&config));

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let allowed_origins = config
        .cors_allowed_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}
