//! Admin review and dashboard handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::handlers::{failure, HandlerResult};
use crate::models::{ApiResponse, DashboardStats, Property, PropertyStatus};

pub async fn dashboard_stats(State(state): State<AppState>) -> HandlerResult<DashboardStats> {
    match state.admin_service.dashboard_stats().await {
        Ok(stats) => Ok(Json(ApiResponse::ok(stats))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load dashboard stats: {e}"),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewQueueQuery {
    pub status: Option<PropertyStatus>,
}

/// Review queue; defaults to pending listings
pub async fn list_properties_for_review(
    State(state): State<AppState>,
    Query(query): Query<ReviewQueueQuery>,
) -> HandlerResult<Vec<Property>> {
    let status = query.status.unwrap_or(PropertyStatus::Pending);

    match state.property_service.list_by_status(status).await {
        Ok(properties) => Ok(Json(ApiResponse::ok(properties))),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to list properties: {e}"),
        )),
    }
}

pub async fn approve_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<Property> {
    review(state, id, true).await
}

pub async fn reject_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<Property> {
    review(state, id, false).await
}

async fn review(state: AppState, id: Uuid, approve: bool) -> HandlerResult<Property> {
    match state.property_service.review(id, approve).await {
        Ok(Some(property)) => Ok(Json(ApiResponse::ok(property))),
        Ok(None) => Err(failure(
            StatusCode::NOT_FOUND,
            "No pending listing with this id",
        )),
        Err(e) => Err(failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to review listing: {e}"),
        )),
    }
}
