//! Route definitions for the pgfinder API

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::{admin, auth, payments, properties, users};
use crate::middleware::{require_admin, require_auth, require_owner};

/// Assemble the full application router
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let media_dir = ServeDir::new(state.media_store.root());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(public_property_routes())
        .merge(account_routes(&state))
        .merge(payment_routes(&state))
        .merge(owner_routes(&state))
        .merge(admin_routes(&state))
        .nest_service("/media", media_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/session", get(auth::session))
}

pub fn public_property_routes() -> Router<AppState> {
    Router::new()
        .route("/api/properties", get(properties::list_properties))
        .route("/api/properties/:id", get(properties::property_detail))
}

pub fn account_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(users::me).put(users::update_me))
        .route("/api/users/me/avatar", post(users::upload_avatar))
        .route("/api/users/me/become-owner", post(users::become_owner))
        .route("/api/subscriptions/current", get(users::current_subscription))
        .layer(from_fn_with_state(state.clone(), require_auth))
}

pub fn payment_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/payments", get(payments::list_payments))
        .route("/api/payments/orders", post(payments::create_order))
        .route("/api/payments/verify", post(payments::verify_payment))
        .route("/api/payments/failed", post(payments::payment_failed))
        .layer(from_fn_with_state(state.clone(), require_auth))
}

pub fn owner_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/owner/properties",
            get(properties::my_properties).post(properties::create_property),
        )
        .route(
            "/api/owner/properties/:id",
            put(properties::update_property).delete(properties::delete_property),
        )
        .route("/api/owner/properties/:id/book", post(properties::mark_booked))
        .route(
            "/api/owner/properties/:id/available",
            post(properties::mark_available),
        )
        .route(
            "/api/owner/properties/:id/images",
            post(properties::upload_property_images),
        )
        .layer(from_fn_with_state(state.clone(), require_owner))
        .layer(from_fn_with_state(state.clone(), require_auth))
}

pub fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/stats", get(admin::dashboard_stats))
        .route("/api/admin/properties", get(admin::list_properties_for_review))
        .route("/api/admin/properties/:id/approve", post(admin::approve_property))
        .route("/api/admin/properties/:id/reject", post(admin::reject_property))
        .layer(from_fn_with_state(state.clone(), require_admin))
        .layer(from_fn_with_state(state.clone(), require_auth))
}

async fn root() -> &'static str {
    "pgfinder API Server"
}

async fn health_check() -> &'static str {
    "OK"
}
