//! API handlers

pub mod admin;
pub mod auth;
pub mod payments;
pub mod properties;
pub mod users;

use axum::http::StatusCode;
use axum::Json;

use crate::models::ApiResponse;

pub(crate) type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

pub(crate) fn failure<T>(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (status, Json(ApiResponse::err(message)))
}
